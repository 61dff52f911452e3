//! Configuration types for parsing and backup runs.
//!
//! These are plain structs without any CLI framework dependency; the binary
//! maps its flags onto them.
//!
//! # Example
//!
//! ```rust
//! use sauvesms::config::{BackupConfig, SmsConfig};
//!
//! let config = BackupConfig::new()
//!     .with_output_dir("/tmp/sms")
//!     .with_file_prefix("pixel7")
//!     .with_sms(SmsConfig::new().with_skip_invalid_timestamps(true));
//!
//! assert!(config.sms.skip_invalid_timestamps);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the backup folder created under the user's home directory.
pub const DEFAULT_BACKUP_FOLDER: &str = "Mes_SMS";

/// Default transcript file name prefix.
pub const DEFAULT_FILE_PREFIX: &str = "sms_backup";

/// Configuration for SMS dump parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Drop rows whose `date` is not a millisecond timestamp instead of
    /// aborting the run (default: false)
    pub skip_invalid_timestamps: bool,
}

impl SmsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether rows with an unparsable `date` are dropped.
    #[must_use]
    pub fn with_skip_invalid_timestamps(mut self, skip: bool) -> Self {
        self.skip_invalid_timestamps = skip;
        self
    }
}

/// Configuration for a full backup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Directory the transcript is written to; created if missing
    /// (default: `~/Mes_SMS`)
    pub output_dir: PathBuf,

    /// Transcript file name prefix (default: `sms_backup`)
    pub file_prefix: String,

    /// SMS dump parsing settings
    #[serde(default)]
    pub sms: SmsConfig,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            output_dir: default_backup_dir(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            sms: SmsConfig::default(),
        }
    }
}

impl BackupConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the transcript file name prefix.
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Sets the SMS parsing configuration.
    #[must_use]
    pub fn with_sms(mut self, sms: SmsConfig) -> Self {
        self.sms = sms;
        self
    }
}

/// Returns `<home>/Mes_SMS`, or `./Mes_SMS` when no home directory is known.
pub fn default_backup_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_BACKUP_FOLDER)
}
