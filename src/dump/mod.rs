//! Reading `content query` dumps.
//!
//! `adb shell content query` prints one line per provider row:
//!
//! ```text
//! Row: 0 _id=12, thread_id=3, address=+33612345678, date=1700000000000, type=1, body=Salut, ça va ?, sub_id=1
//! Row: 1 _id=13, thread_id=3, address=+33612345678, date=1700000060000, type=2, body=Oui
//! et toi ?, sub_id=1
//! ```
//!
//! There is no quoting: a message body may contain commas and line breaks,
//! which are also the separators of every other field. This module contains
//! the two pieces that cope with that format:
//!
//! - [`splitter`] - cuts a dump into per-row blocks
//! - [`fields`] - pulls `key=value` fields (and the free-text `body`) out of a block

pub mod fields;
pub mod splitter;

pub use fields::{ScalarField, extract_body, extract_scalar};
pub use splitter::{record_blocks, split_contact_entries, split_rows};
