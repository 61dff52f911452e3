//! Sources of raw dumps.
//!
//! The parser only needs two strings: the contacts dump and the SMS dump.
//! [`DumpSource`] abstracts where they come from:
//!
//! - [`AdbSource`] - queries a connected Android device through `adb`
//! - [`FileSource`] - reads dumps saved earlier (`adb shell content query ... > sms.txt`)
//! - [`StaticSource`] - in-memory strings, for tests and embedding

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info};

use crate::error::{Result, SmsBackupError};

/// Content query listing phone numbers with their display names.
pub const CONTACTS_QUERY: &str =
    "content query --uri content://contacts/phones --projection display_name:number";

/// Content query listing every SMS.
pub const SMS_QUERY: &str = "content query --uri content://sms";

/// Marker printed by `adb devices` when the server has to be started.
const DAEMON_NOT_RUNNING: &str = "* daemon not running";

/// Where raw dumps come from.
pub trait DumpSource {
    /// Raw output of the contacts query.
    fn contacts_dump(&self) -> Result<String>;

    /// Raw output of the SMS query.
    fn sms_dump(&self) -> Result<String>;

    /// Short human-readable description for logs and the CLI header.
    fn describe(&self) -> String;
}

// =============================================================================
// adb
// =============================================================================

/// Queries a device through the `adb` command-line tool.
///
/// The device is the one pinned with [`with_serial`](AdbSource::with_serial),
/// or else the first device `adb devices` lists as ready.
#[derive(Debug, Clone)]
pub struct AdbSource {
    adb: PathBuf,
    serial: Option<String>,
}

impl Default for AdbSource {
    fn default() -> Self {
        Self::new("adb")
    }
}

impl AdbSource {
    /// Uses the adb executable at `adb` (a bare name is looked up in `PATH`).
    pub fn new(adb: impl Into<PathBuf>) -> Self {
        Self {
            adb: adb.into(),
            serial: None,
        }
    }

    /// Pins a device serial instead of picking the first ready device.
    #[must_use]
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// Path of the adb executable.
    pub fn adb_path(&self) -> &Path {
        &self.adb
    }

    /// Starts the adb server if `adb devices` reports it is not running.
    pub fn ensure_server(&self) -> Result<()> {
        let listing = self.run(&["devices"])?;
        if listing.contains(DAEMON_NOT_RUNNING) {
            info!("adb server not running, starting it");
            self.run(&["start-server"])?;
        } else {
            debug!("adb server already running");
        }
        Ok(())
    }

    /// Starts the server if needed, picks the device and pins its serial so
    /// later queries skip the device listing.
    pub fn connect(self) -> Result<Self> {
        self.ensure_server()?;
        let serial = self.resolve_serial()?;
        match self.device_model(&serial) {
            Ok(model) => info!(%serial, %model, "device detected"),
            Err(err) => debug!(%serial, error = %err, "could not read device model"),
        }
        Ok(self.with_serial(serial))
    }

    /// Resolves the device serial to query.
    pub fn resolve_serial(&self) -> Result<String> {
        if let Some(serial) = &self.serial {
            return Ok(serial.clone());
        }
        let listing = self.run(&["devices"])?;
        parse_device_list(&listing)
            .into_iter()
            .next()
            .ok_or(SmsBackupError::NoDevice)
    }

    /// Reads the device model, for logging.
    pub fn device_model(&self, serial: &str) -> Result<String> {
        let model = self.run(&["-s", serial, "shell", "getprop", "ro.product.model"])?;
        Ok(model.trim().to_string())
    }

    /// Runs `adb -s <serial> shell <query>` on the resolved device.
    pub fn query(&self, query: &str) -> Result<String> {
        let serial = self.resolve_serial()?;
        let mut args = vec!["-s", serial.as_str(), "shell"];
        args.extend(query.split_whitespace());
        self.run(&args)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!(adb = %self.adb.display(), %command, "running adb");
        let output = Command::new(&self.adb)
            .args(args)
            .output()
            .map_err(|err| self.spawn_error(err))?;
        check_output(&command, output)
    }

    fn spawn_error(&self, err: io::Error) -> SmsBackupError {
        if err.kind() == io::ErrorKind::NotFound {
            SmsBackupError::AdbNotFound {
                path: self.adb.clone(),
            }
        } else {
            SmsBackupError::Io(err)
        }
    }
}

fn check_output(command: &str, output: Output) -> Result<String> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = if stderr.trim().is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr.trim().to_string()
    };
    Err(SmsBackupError::device(command, message))
}

/// Extracts the serials of ready devices from `adb devices` output.
///
/// Devices in another state (`unauthorized`, `offline`) are ignored.
pub fn parse_device_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .skip_while(|line| !line.starts_with("List of devices attached"))
        .skip(1)
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(serial), Some("device")) => Some(serial.to_string()),
                _ => None,
            }
        })
        .collect()
}

impl DumpSource for AdbSource {
    fn contacts_dump(&self) -> Result<String> {
        self.query(CONTACTS_QUERY)
    }

    fn sms_dump(&self) -> Result<String> {
        self.query(SMS_QUERY)
    }

    fn describe(&self) -> String {
        match &self.serial {
            Some(serial) => format!("adb device {serial}"),
            None => "first adb device".to_string(),
        }
    }
}

// =============================================================================
// Saved dumps
// =============================================================================

/// Reads dumps saved to disk.
///
/// Without a contacts file the contacts dump is empty and every sender is
/// shown by number.
#[derive(Debug, Clone)]
pub struct FileSource {
    contacts: Option<PathBuf>,
    sms: PathBuf,
}

impl FileSource {
    /// Creates a source reading the SMS dump from `sms`.
    pub fn new(sms: impl Into<PathBuf>) -> Self {
        Self {
            contacts: None,
            sms: sms.into(),
        }
    }

    /// Adds a contacts dump file.
    #[must_use]
    pub fn with_contacts(mut self, contacts: impl Into<PathBuf>) -> Self {
        self.contacts = Some(contacts.into());
        self
    }
}

impl DumpSource for FileSource {
    fn contacts_dump(&self) -> Result<String> {
        match &self.contacts {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => Ok(String::new()),
        }
    }

    fn sms_dump(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.sms)?)
    }

    fn describe(&self) -> String {
        format!("saved dump {}", self.sms.display())
    }
}

/// Dumps held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    /// Contacts dump text.
    pub contacts: String,
    /// SMS dump text.
    pub sms: String,
}

impl StaticSource {
    /// Creates a source from two dump strings.
    pub fn new(contacts: impl Into<String>, sms: impl Into<String>) -> Self {
        Self {
            contacts: contacts.into(),
            sms: sms.into(),
        }
    }
}

impl DumpSource for StaticSource {
    fn contacts_dump(&self) -> Result<String> {
        Ok(self.contacts.clone())
    }

    fn sms_dump(&self) -> Result<String> {
        Ok(self.sms.clone())
    }

    fn describe(&self) -> String {
        "in-memory dump".to_string()
    }
}
