//! Phone number normalization.
//!
//! Numbers in the SMS provider and in the contacts provider rarely share a
//! spelling (`+33 6 12 34 56 78` vs `0612345678` vs `06-12-34-56-78`).
//! [`normalize`] reduces a number to its digits so both sides can be joined
//! on a common key. No country-code handling is attempted: `+33612345678`
//! and `0612345678` stay distinct keys.

/// Strips every character that is not an ASCII digit.
///
/// Total and idempotent. The result is only used as a lookup key and is
/// never displayed.
///
/// # Example
///
/// ```rust
/// use sauvesms::phone::normalize;
///
/// assert_eq!(normalize("+1 (555) 123-4567"), "15551234567");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_spaces() {
        assert_eq!(normalize("+1 (555) 123-4567"), "15551234567");
        assert_eq!(normalize("06.12.34.56.78"), "0612345678");
    }

    #[test]
    fn test_empty_and_digitless() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("Orange"), "");
        assert_eq!(normalize("+-() "), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("+33 6 12 34 56 78");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_non_ascii_digits_removed() {
        // Arabic-Indic digits are not part of the key.
        assert_eq!(normalize("٥٥٥123"), "123");
    }
}
