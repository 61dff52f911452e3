//! Field extraction from a single row block.
//!
//! Two rules apply:
//!
//! - **Scalar fields** end at the first comma or newline. Every provider
//!   column except `body` is safe under this rule (numbers, addresses,
//!   display names without commas).
//! - **The body** can contain commas and newlines, so it runs from `body=` up
//!   to the next `, sub_id=` (the column the SMS provider prints right after
//!   it) or to the end of the block.
//!
//! Both rules are total: a missing key yields an empty string.

use std::sync::OnceLock;

use regex::Regex;

/// Sentinel that terminates the free-text body.
pub const BODY_TERMINATOR: &str = ", sub_id=";

/// A compiled extractor for one scalar `key=value` field.
///
/// Compile once and reuse across blocks; [`extract_scalar`] is the one-shot
/// form.
///
/// # Example
///
/// ```rust
/// use sauvesms::dump::ScalarField;
///
/// let address = ScalarField::new("address");
/// assert_eq!(address.extract("_id=4, address= +33612345678 , type=1"), "+33612345678");
/// assert_eq!(address.extract("_id=4, type=1"), "");
/// ```
#[derive(Debug, Clone)]
pub struct ScalarField {
    key: String,
    pattern: Regex,
}

impl ScalarField {
    /// Builds the extractor for `key`.
    ///
    /// The key must start on a word boundary, so `id` does not match inside
    /// `thread_id=`.
    pub fn new(key: &str) -> Self {
        let pattern = Regex::new(&format!(r"\b{}=([^,\n]+)", regex::escape(key)))
            .expect("escaped field key is a valid regex");
        Self {
            key: key.to_string(),
            pattern,
        }
    }

    /// Returns the field name this extractor looks for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the trimmed value of the first occurrence with a non-empty
    /// value, or `""` if there is none.
    pub fn extract<'a>(&self, block: &'a str) -> &'a str {
        self.pattern
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .unwrap_or("")
    }
}

/// Extracts a scalar field from a block in one call.
pub fn extract_scalar(block: &str, key: &str) -> String {
    ScalarField::new(key).extract(block).to_string()
}

fn body_pattern() -> &'static Regex {
    static BODY: OnceLock<Regex> = OnceLock::new();
    BODY.get_or_init(|| {
        Regex::new(&format!(
            r"(?s)\bbody=(.*?)(?:{}|\z)",
            regex::escape(BODY_TERMINATOR)
        ))
        .expect("valid body regex")
    })
}

/// Extracts the free-text `body` field.
///
/// Captures everything after `body=`, across newlines, up to the nearest
/// `, sub_id=` or the end of the block. The capture is trimmed, then one pair
/// of enclosing double quotes is removed if present.
///
/// # Example
///
/// ```rust
/// use sauvesms::dump::extract_body;
///
/// let block = "date=1700000000000, address=5551234, type=1, body=Hello, world, sub_id=1";
/// assert_eq!(extract_body(block), "Hello, world");
/// ```
pub fn extract_body(block: &str) -> String {
    body_pattern()
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| strip_quotes(m.as_str().trim()).to_string())
        .unwrap_or_default()
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
