//! # SauveSMS
//!
//! A Rust library for turning the SMS of an Android device into a readable,
//! dated text transcript, with senders and recipients shown by contact name.
//!
//! ## Overview
//!
//! The device side is two `adb shell content query` calls, one for the
//! contacts (`content://contacts/phones`) and one for the messages
//! (`content://sms`). Their output is an unquoted `Row: <n> key=value, ...`
//! listing where a message body may itself contain commas and line breaks.
//! This crate:
//!
//! - cuts the dump into rows and extracts fields ([`dump`])
//! - builds a number-to-name directory from the contacts ([`contacts`], [`phone`])
//! - builds typed [`SmsRecord`]s, dropping incomplete rows ([`sms`])
//! - renders the transcript with progress reporting ([`transcript`], [`progress`])
//! - fetches dumps and writes the backup file ([`device`], [`backup`])
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use sauvesms::prelude::*;
//!
//! let contacts = "Row: 0 display_name=Bob, number=555-1234";
//! let sms = "Row: 0 date=1700000000000, address=5551234, type=1, body=Hello, world, sub_id=1";
//!
//! let directory = ContactDirectory::from_dump(contacts);
//! let parsed = SmsParser::new().parse(sms)?;
//! let transcript = render_with_timezone(&parsed.records, &directory, &Utc, |_| {});
//!
//! assert_eq!(
//!     transcript,
//!     "Date: 2023-11-14\nHeure: 22:13:20\nDe: Bob (5551234)\nMessage: Hello, world\n\n"
//! );
//! # Ok::<(), SmsBackupError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`phone`] - digits-only normalization used as the join key
//! - [`contacts`] - [`ContactDirectory`]
//! - [`dump`] - row splitting and field extraction
//! - [`sms`] - [`SmsRecord`], [`Direction`](sms::Direction), [`SmsParser`](sms::SmsParser)
//! - [`transcript`] - [`render`](transcript::render), [`format_record`](transcript::format_record)
//! - [`progress`] - progress callbacks
//! - [`device`] - [`DumpSource`](device::DumpSource) and its adb / file implementations
//! - [`backup`] - [`run_backup`](backup::run_backup)
//! - [`config`] - [`SmsConfig`](config::SmsConfig), [`BackupConfig`](config::BackupConfig)
//! - [`error`] - [`SmsBackupError`], [`Result`]

pub mod backup;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod contacts;
pub mod device;
pub mod dump;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod phone;
pub mod progress;
pub mod sms;
pub mod transcript;

// Re-export the main types at the crate root for convenience
pub use contacts::ContactDirectory;
pub use error::{Result, SmsBackupError};
pub use sms::SmsRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use sauvesms::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ContactDirectory;
    pub use crate::SmsRecord;

    pub use crate::error::{Result, SmsBackupError};

    pub use crate::config::{BackupConfig, SmsConfig};
    pub use crate::phone::normalize;
    pub use crate::sms::{Direction, ParseStats, ParsedSms, SmsParser};

    pub use crate::transcript::{format_record, render, render_with_timezone};

    pub use crate::progress::{ProgressCallback, channel_progress, percent_complete};

    pub use crate::backup::{BackupReport, run_backup};
    pub use crate::device::{AdbSource, DumpSource, FileSource, StaticSource};
}
