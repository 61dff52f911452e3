//! Transcript rendering.
//!
//! Each record becomes a four-line block followed by a blank line:
//!
//! ```text
//! Date: 2023-11-14
//! Heure: 22:13:20
//! De: Bob (5551234)
//! Message: Hello, world
//!
//! ```
//!
//! Records are rendered in the order given; nothing is sorted. Dates and
//! times are shown in the local time zone ([`render`]) or in an explicit one
//! ([`render_with_timezone`]).

use std::fmt::Display;

use chrono::{Local, TimeZone};

use crate::contacts::ContactDirectory;
use crate::progress::percent_complete;
use crate::sms::SmsRecord;

/// `strftime` pattern for the `Date:` line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `strftime` pattern for the `Heure:` line.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Renders one record block, including its trailing blank line.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use sauvesms::{ContactDirectory, SmsRecord};
/// use sauvesms::sms::Direction;
/// use sauvesms::transcript::format_record;
///
/// let directory = ContactDirectory::from_dump("Row: 0 display_name=Bob, number=555-1234");
/// let record = SmsRecord::new(1700000000000, "5551234", Direction::Inbound, "Hello, world")?;
///
/// assert_eq!(
///     format_record(&record, &directory, &Utc),
///     "Date: 2023-11-14\nHeure: 22:13:20\nDe: Bob (5551234)\nMessage: Hello, world\n\n"
/// );
/// # Ok::<(), sauvesms::SmsBackupError>(())
/// ```
pub fn format_record<Tz>(record: &SmsRecord, directory: &ContactDirectory, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let when = record.timestamp_in(tz);
    format!(
        "Date: {}\nHeure: {}\n{}: {} ({})\nMessage: {}\n\n",
        when.format(DATE_FORMAT),
        when.format(TIME_FORMAT),
        record.direction.label(),
        directory.lookup(&record.address),
        record.address,
        record.body
    )
}

/// Renders all records in local time.
///
/// `on_progress` is called once per record with `i * 100 / n` (1-based
/// `i`), ending at 100. It is never called for an empty slice.
pub fn render<F>(records: &[SmsRecord], directory: &ContactDirectory, on_progress: F) -> String
where
    F: FnMut(u8),
{
    render_with_timezone(records, directory, &Local, on_progress)
}

/// Renders all records with dates and times in `tz`.
pub fn render_with_timezone<Tz, F>(
    records: &[SmsRecord],
    directory: &ContactDirectory,
    tz: &Tz,
    mut on_progress: F,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
    F: FnMut(u8),
{
    let total = records.len();
    let mut transcript = String::new();

    for (index, record) in records.iter().enumerate() {
        transcript.push_str(&format_record(record, directory, tz));
        if let Some(pct) = percent_complete(index + 1, total) {
            on_progress(pct);
        }
    }

    transcript
}
