//! Splitting a dump into row blocks.

use std::sync::OnceLock;

use regex::Regex;

fn row_marker() -> &'static Regex {
    static ROW_MARKER: OnceLock<Regex> = OnceLock::new();
    ROW_MARKER.get_or_init(|| Regex::new(r"Row: [0-9]+\s+").expect("valid row marker regex"))
}

/// Splits a dump on every `Row: <n>` marker.
///
/// The marker itself (and the whitespace after it) is discarded. Element 0
/// is whatever preceded the first marker and is never a record; a dump with
/// no marker at all yields exactly one element.
///
/// # Example
///
/// ```rust
/// use sauvesms::dump::split_rows;
///
/// let rows = split_rows("Row: 0 date=1, address=5\nRow: 1 date=2, address=6");
/// assert_eq!(rows, vec!["", "date=1, address=5\n", "date=2, address=6"]);
///
/// assert_eq!(split_rows("No result found.").len(), 1);
/// ```
pub fn split_rows(dump: &str) -> Vec<&str> {
    row_marker().split(dump).collect()
}

/// Returns only the genuine record blocks of a dump, preamble dropped.
///
/// Equivalent to `split_rows(dump)[1..]`.
pub fn record_blocks(dump: &str) -> Vec<&str> {
    row_marker().split(dump).skip(1).collect()
}

/// Splits a contacts dump on the bare `Row:` marker, dropping empty pieces.
///
/// The contacts query only ever returns two short scalar fields per row, so
/// the looser split is enough: each entry still starts with the row index,
/// which field extraction ignores.
pub fn split_contact_entries(dump: &str) -> impl Iterator<Item = &str> {
    dump.split("Row:").filter(|entry| !entry.is_empty())
}
