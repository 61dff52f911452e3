//! Progress reporting for transcript rendering.
//!
//! Rendering reports an integer percentage after each record. The renderer
//! takes any `FnMut(u8)`, so a closure collecting values into a `Vec` is
//! enough in tests. For long-lived or cross-thread observers this module
//! provides [`ProgressCallback`], a shareable callback type, and
//! [`channel_progress`] to build one.
//!
//! # Example
//!
//! ```rust
//! use sauvesms::progress::{channel_progress, percent_complete};
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let callback = channel_progress(tx);
//!
//! for done in 1..=4 {
//!     if let Some(pct) = percent_complete(done, 4) {
//!         callback(pct);
//!     }
//! }
//!
//! let seen: Vec<u8> = rx.try_iter().collect();
//! assert_eq!(seen, vec![25, 50, 75, 100]);
//! ```

use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Percentage of `done` out of `total`, rounded down.
///
/// Returns `None` when `total` is zero; callers skip reporting in that case.
pub fn percent_complete(done: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = done.min(total) * 100 / total;
    Some(pct as u8)
}

/// Callback type for receiving progress updates.
///
/// Thread-safe, so the producer can run on a worker thread while the
/// observer lives elsewhere.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Creates a progress callback that forwards each value over a channel.
///
/// Send errors (observer gone) are ignored: losing the observer must not
/// abort the backup.
pub fn channel_progress(tx: Sender<u8>) -> ProgressCallback {
    let tx = std::sync::Mutex::new(tx);
    Arc::new(move |pct| {
        if let Ok(tx) = tx.lock() {
            let _ = tx.send(pct);
        }
    })
}
