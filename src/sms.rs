//! SMS records and the dump parser that produces them.
//!
//! A row becomes an [`SmsRecord`] only if it carries both a `date` and an
//! `address`. Rows missing either are dropped and counted. A `date` that is
//! not an integer either aborts the parse with
//! [`SmsBackupError::InvalidTimestamp`] or, with
//! [`SmsConfig::skip_invalid_timestamps`], is dropped like a malformed row.
//!
//! # Example
//!
//! ```rust
//! use sauvesms::sms::{Direction, SmsParser};
//!
//! let dump = "Row: 0 _id=1, address=5551234, date=1700000000000, type=1, body=Hello, world, sub_id=1\n\
//!             Row: 1 _id=2, date=1700000060000, type=2, body=draft, sub_id=1\n";
//!
//! let parsed = SmsParser::new().parse(dump)?;
//! assert_eq!(parsed.records.len(), 1);
//! assert_eq!(parsed.records[0].direction, Direction::Inbound);
//! assert_eq!(parsed.records[0].body, "Hello, world");
//! assert_eq!(parsed.stats.missing_fields, 1);
//! # Ok::<(), sauvesms::SmsBackupError>(())
//! ```

use std::sync::OnceLock;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SmsConfig;
use crate::dump::{ScalarField, extract_body, record_blocks};
use crate::error::{Result, SmsBackupError};

/// Provider `type` code for a received message.
pub const TYPE_INBOX: &str = "1";

/// Whether a message was received or sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Received by the device (`type=1`)
    Inbound,
    /// Anything else: sent, outbox, draft, failed, queued
    Outbound,
}

impl Direction {
    /// Classifies a provider `type` value. Only `"1"` is inbound.
    pub fn from_type_code(code: &str) -> Self {
        if code == TYPE_INBOX {
            Direction::Inbound
        } else {
            Direction::Outbound
        }
    }

    /// Transcript label: `De` (from) for inbound, `À` (to) for outbound.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Inbound => "De",
            Direction::Outbound => "À",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One message extracted from the SMS provider dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRecord {
    /// When the message was received or sent.
    pub timestamp: DateTime<Utc>,

    /// Phone number exactly as the provider reported it.
    pub address: String,

    /// Received or sent.
    pub direction: Direction,

    /// Message text; may contain commas and newlines.
    pub body: String,
}

fn date_field() -> &'static ScalarField {
    static FIELD: OnceLock<ScalarField> = OnceLock::new();
    FIELD.get_or_init(|| ScalarField::new("date"))
}

fn address_field() -> &'static ScalarField {
    static FIELD: OnceLock<ScalarField> = OnceLock::new();
    FIELD.get_or_init(|| ScalarField::new("address"))
}

fn type_field() -> &'static ScalarField {
    static FIELD: OnceLock<ScalarField> = OnceLock::new();
    FIELD.get_or_init(|| ScalarField::new("type"))
}

/// Parses a provider `date` value (milliseconds since the Unix epoch).
///
/// Instants within a day of chrono's representable range are rejected too,
/// so that shifting them into any time zone cannot overflow.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    value
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .filter(|ts| {
            ts.checked_add_signed(TimeDelta::days(1)).is_some()
                && ts.checked_sub_signed(TimeDelta::days(1)).is_some()
        })
        .ok_or_else(|| SmsBackupError::invalid_timestamp(value))
}

impl SmsRecord {
    /// Creates a record from a millisecond timestamp.
    pub fn new(
        timestamp_millis: i64,
        address: impl Into<String>,
        direction: Direction,
        body: impl Into<String>,
    ) -> Result<Self> {
        let timestamp = DateTime::from_timestamp_millis(timestamp_millis)
            .ok_or_else(|| SmsBackupError::invalid_timestamp(timestamp_millis.to_string()))?;
        Ok(Self {
            timestamp,
            address: address.into(),
            direction,
            body: body.into(),
        })
    }

    /// Builds a record from one row block.
    ///
    /// Returns `Ok(None)` when `date` or `address` is missing or empty, and
    /// an error when `date` is present but not a valid timestamp.
    pub fn from_block(block: &str) -> Result<Option<Self>> {
        let date = date_field().extract(block);
        let address = address_field().extract(block);
        if date.is_empty() || address.is_empty() {
            return Ok(None);
        }

        let timestamp = parse_timestamp(date)?;
        let direction = Direction::from_type_code(type_field().extract(block));

        Ok(Some(Self {
            timestamp,
            address: address.to_string(),
            direction,
            body: extract_body(block),
        }))
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// The timestamp in an arbitrary time zone.
    pub fn timestamp_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.timestamp.with_timezone(tz)
    }

    /// The timestamp in the process's local time zone.
    pub fn local_timestamp(&self) -> DateTime<Local> {
        self.timestamp_in(&Local)
    }
}

/// Counters collected while parsing a dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Row blocks found (preamble excluded).
    pub rows: usize,
    /// Records produced.
    pub records: usize,
    /// Rows dropped for a missing `date` or `address`.
    pub missing_fields: usize,
    /// Rows dropped for an unparsable `date` (only with skipping enabled).
    pub invalid_timestamps: usize,
}

impl ParseStats {
    /// Total rows that did not become records.
    pub fn dropped(&self) -> usize {
        self.missing_fields + self.invalid_timestamps
    }
}

/// Records of one dump, in dump order, with parse counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSms {
    /// Surviving records, in the order the provider returned them.
    pub records: Vec<SmsRecord>,
    /// Counters for the parse.
    pub stats: ParseStats,
}

/// Parser for `content://sms` dumps.
#[derive(Debug, Clone, Default)]
pub struct SmsParser {
    config: SmsConfig,
}

impl SmsParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: SmsConfig) -> Self {
        Self { config }
    }

    /// Returns the parser's configuration.
    pub fn config(&self) -> &SmsConfig {
        &self.config
    }

    /// Parses a whole dump. Records keep dump order; no sorting is done.
    pub fn parse(&self, dump: &str) -> Result<ParsedSms> {
        let blocks = record_blocks(dump);
        let mut parsed = ParsedSms {
            records: Vec::with_capacity(blocks.len()),
            stats: ParseStats {
                rows: blocks.len(),
                ..ParseStats::default()
            },
        };

        for (index, block) in blocks.iter().enumerate() {
            match SmsRecord::from_block(block) {
                Ok(Some(record)) => parsed.records.push(record),
                Ok(None) => {
                    debug!(row = index, "dropping SMS row without date or address");
                    parsed.stats.missing_fields += 1;
                }
                Err(err) if self.config.skip_invalid_timestamps && err.is_invalid_timestamp() => {
                    warn!(row = index, error = %err, "dropping SMS row");
                    parsed.stats.invalid_timestamps += 1;
                }
                Err(err) => return Err(err),
            }
        }

        parsed.stats.records = parsed.records.len();
        info!(
            rows = parsed.stats.rows,
            records = parsed.stats.records,
            dropped = parsed.stats.dropped(),
            "SMS dump parsed"
        );
        Ok(parsed)
    }
}
