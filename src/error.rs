//! Unified error types for sauvesms.
//!
//! This module provides a single [`SmsBackupError`] enum that covers every
//! fatal condition of a backup run. Non-fatal conditions (a row without a
//! `date` or `address`) never surface as errors; they are counted in
//! [`ParseStats`](crate::sms::ParseStats) instead.
//!
//! Each group of fatal errors has an `is_*` predicate:
//!
//! - [`is_io`](SmsBackupError::is_io): a saved dump or the transcript file
//! - [`is_device`](SmsBackupError::is_device): adb missing, failing, or no device
//! - [`is_invalid_timestamp`](SmsBackupError::is_invalid_timestamp): a `date`
//!   outside what can be rendered as a calendar date

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for sauvesms operations.
///
/// # Example
///
/// ```rust
/// use sauvesms::error::Result;
/// use sauvesms::SmsRecord;
///
/// fn my_function() -> Result<Vec<SmsRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SmsBackupError>;

/// The error type for all sauvesms operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SmsBackupError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - A saved dump file doesn't exist
    /// - The backup directory can't be created
    /// - Disk is full (when writing the transcript)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A row carried a `date` value that is not a millisecond timestamp.
    ///
    /// Also raised when the integer is outside the range chrono can
    /// represent as a calendar date.
    #[error("Invalid SMS timestamp '{value}': expected milliseconds since the Unix epoch")]
    InvalidTimestamp {
        /// The raw `date` value as it appeared in the dump
        value: String,
    },

    /// The adb executable could not be launched.
    #[error("adb executable not found at {}", path.display())]
    AdbNotFound {
        /// Path (or bare program name) that was tried
        path: PathBuf,
    },

    /// An adb command ran but failed.
    #[error("adb command '{command}' failed: {message}")]
    Device {
        /// The command line that was run, without the adb path
        command: String,
        /// Captured stderr or a description of the failure
        message: String,
    },

    /// adb is running but no device is attached and authorized.
    #[error("No Android device connected")]
    NoDevice,

    /// The logging subscriber could not be installed.
    #[error("Failed to initialize logging: {message}")]
    Logging {
        /// Description of what went wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SmsBackupError {
    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        SmsBackupError::InvalidTimestamp {
            value: value.into(),
        }
    }

    /// Creates a device command error.
    pub fn device(command: impl Into<String>, message: impl Into<String>) -> Self {
        SmsBackupError::Device {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a logging initialization error.
    pub fn logging(message: impl Into<String>) -> Self {
        SmsBackupError::Logging {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SmsBackupError::Io(_))
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, SmsBackupError::InvalidTimestamp { .. })
    }

    /// Returns `true` if the error came from the device side (adb, no device).
    pub fn is_device(&self) -> bool {
        matches!(
            self,
            SmsBackupError::AdbNotFound { .. }
                | SmsBackupError::Device { .. }
                | SmsBackupError::NoDevice
        )
    }
}
