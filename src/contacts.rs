//! Contact directory: normalized phone number to display name.
//!
//! Built once per backup run from the contacts provider dump
//! (`content://contacts/phones`, projection `display_name:number`) and then
//! only read. When two entries normalize to the same key, the one seen last
//! wins.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::dump::{ScalarField, split_contact_entries};
use crate::phone::normalize;

fn display_name_field() -> &'static ScalarField {
    static FIELD: OnceLock<ScalarField> = OnceLock::new();
    FIELD.get_or_init(|| ScalarField::new("display_name"))
}

fn number_field() -> &'static ScalarField {
    static FIELD: OnceLock<ScalarField> = OnceLock::new();
    FIELD.get_or_init(|| ScalarField::new("number"))
}

/// Lookup table from a [normalized](crate::phone::normalize) number to a
/// contact's display name.
///
/// # Example
///
/// ```rust
/// use sauvesms::ContactDirectory;
///
/// let dump = "Row: 0 display_name=Alice, number=555-1234\nRow: 1 display_name=Bob, number=555-1234";
/// let directory = ContactDirectory::from_dump(dump);
///
/// assert_eq!(directory.lookup("(555) 1234"), "Bob");
/// assert_eq!(directory.lookup("+44 20 7946 0000"), "+44 20 7946 0000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDirectory {
    names: HashMap<String, String>,
}

impl ContactDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from a raw contacts dump.
    ///
    /// Entries without a `number` are skipped. A missing `display_name` maps
    /// the number to an empty name.
    pub fn from_dump(dump: &str) -> Self {
        let mut directory = Self::new();
        for entry in split_contact_entries(dump) {
            let number = number_field().extract(entry);
            if number.is_empty() {
                continue;
            }
            let name = display_name_field().extract(entry);
            directory.insert(number, name);
        }
        directory
    }

    /// Inserts a contact, replacing any name already stored for the same
    /// normalized number.
    pub fn insert(&mut self, number: &str, name: impl Into<String>) {
        let key = normalize(number);
        let name = name.into();
        if let Some(previous) = self.names.insert(key, name.clone()) {
            if previous != name {
                debug!(number, previous = %previous, name = %name, "contact number reassigned");
            }
        }
    }

    /// Returns the display name for `number`, if one is known.
    pub fn get(&self, number: &str) -> Option<&str> {
        self.names.get(&normalize(number)).map(String::as_str)
    }

    /// Returns the display name for `number`, or `number` itself when the
    /// directory has no entry for it.
    pub fn lookup<'a>(&'a self, number: &'a str) -> &'a str {
        self.get(number).unwrap_or(number)
    }

    /// Number of distinct normalized numbers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the directory holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
