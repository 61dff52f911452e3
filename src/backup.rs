//! A complete backup run: fetch, parse, render, write.
//!
//! # Example
//!
//! ```rust,no_run
//! use sauvesms::backup::run_backup;
//! use sauvesms::config::BackupConfig;
//! use sauvesms::device::AdbSource;
//!
//! let source = AdbSource::default().connect()?;
//! let report = run_backup(&source, &BackupConfig::new(), |pct| eprintln!("{pct}%"))?;
//! println!("{} messages saved to {}", report.records, report.path.display());
//! # Ok::<(), sauvesms::SmsBackupError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, info, warn};

use crate::config::BackupConfig;
use crate::contacts::ContactDirectory;
use crate::device::DumpSource;
use crate::error::Result;
use crate::sms::{ParseStats, SmsParser};
use crate::transcript::render;

/// Outcome of a successful backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    /// The transcript file that was written.
    pub path: PathBuf,
    /// Number of messages in the transcript.
    pub records: usize,
    /// Parse counters for the SMS dump.
    pub stats: ParseStats,
    /// Number of distinct numbers in the contact directory.
    pub contacts: usize,
}

/// Transcript file name for a run started at `started`:
/// `<prefix>_<YYYYMMDDHHMMSS>.txt`.
pub fn backup_file_name<Tz>(prefix: &str, started: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.txt", prefix, started.format("%Y%m%d%H%M%S"))
}

/// Fetches the contacts dump and builds the directory.
///
/// A failing contacts query is not fatal: the run continues and senders are
/// shown by number.
pub fn load_contacts(source: &dyn DumpSource) -> ContactDirectory {
    match source.contacts_dump() {
        Ok(dump) => {
            let directory = ContactDirectory::from_dump(&dump);
            info!(contacts = directory.len(), "contacts loaded");
            directory
        }
        Err(err) => {
            warn!(error = %err, "could not load contacts, numbers will not be resolved");
            ContactDirectory::new()
        }
    }
}

/// Runs a full backup and writes the transcript into `config.output_dir`.
///
/// The file only appears once the whole transcript has been rendered and
/// written; any error leaves no file behind.
pub fn run_backup<F>(
    source: &dyn DumpSource,
    config: &BackupConfig,
    on_progress: F,
) -> Result<BackupReport>
where
    F: FnMut(u8),
{
    let started = Local::now();
    info!(source = %source.describe(), "starting SMS backup");

    let directory = load_contacts(source);
    let dump = source.sms_dump()?;
    let parsed = SmsParser::with_config(config.sms.clone()).parse(&dump)?;
    let transcript = render(&parsed.records, &directory, on_progress);

    fs::create_dir_all(&config.output_dir)?;
    let path = config
        .output_dir
        .join(backup_file_name(&config.file_prefix, &started));
    write_atomically(&path, &transcript)?;
    info!(path = %path.display(), records = parsed.records.len(), "backup written");

    Ok(BackupReport {
        path,
        records: parsed.records.len(),
        stats: parsed.stats,
        contacts: directory.len(),
    })
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let partial = path.with_extension("txt.part");
    if let Err(err) = fs::write(&partial, contents) {
        let _ = fs::remove_file(&partial);
        return Err(err.into());
    }
    if let Err(err) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(err.into());
    }
    Ok(())
}

/// Command that opens a folder in the platform's file manager.
pub fn file_manager_command() -> &'static str {
    if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Opens `dir` in the platform's file manager.
///
/// Fails with a `NotFound` I/O error when `dir` is not an existing
/// directory.
pub fn open_folder(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("backup folder {} does not exist", dir.display()),
        )
        .into());
    }
    let opener = file_manager_command();
    info!(%opener, dir = %dir.display(), "opening backup folder");
    // explorer exits non-zero even on success
    let status = Command::new(opener).arg(dir).status()?;
    debug!(%status, "file manager launcher exited");
    Ok(())
}
