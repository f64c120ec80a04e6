//! Progress and status history entries.
//!
//! Both histories are append-only in well-formed data, but nothing here
//! trusts array order: the current value is always the entry with the
//! greatest `created_at`.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Status;

/// A timestamped snapshot of how far into the book the reader is.
///
/// Pages for physical and e-books, minutes for audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub current_progress: u32,
    pub created_at: Timestamp,
}

/// A timestamped status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub status: Status,
    pub created_at: Timestamp,
}

/// The most recent entry by creation time.
///
/// Entries sharing a timestamp resolve to the one appended last.
pub fn latest<T>(entries: &[T], created_at: impl Fn(&T) -> Timestamp) -> Option<&T> {
    // `max_by_key` keeps the last of equal maxima.
    entries.iter().max_by_key(|e| created_at(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(progress: u32, secs: i64) -> ProgressEntry {
        ProgressEntry {
            current_progress: progress,
            created_at: Timestamp::new(secs, 0).unwrap(),
        }
    }

    #[test]
    fn latest_ignores_array_order() {
        let entries = vec![entry(120, 3_000), entry(200, 5_000), entry(80, 1_000)];
        let found = latest(&entries, |e| e.created_at).unwrap();
        assert_eq!(found.current_progress, 200);
    }

    #[test]
    fn latest_tie_prefers_last_appended() {
        let entries = vec![entry(10, 1_000), entry(20, 1_000)];
        let found = latest(&entries, |e| e.created_at).unwrap();
        assert_eq!(found.current_progress, 20);
    }

    #[test]
    fn latest_of_empty_is_none() {
        let entries: Vec<ProgressEntry> = Vec::new();
        assert!(latest(&entries, |e| e.created_at).is_none());
    }
}
