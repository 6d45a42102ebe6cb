use serde::{Deserialize, Serialize, Serializer};
use std::collections::VecDeque;
use std::num::NonZeroU32;

use crate::model::{Operation, Range, RecordId};

/// Number of answers kept in the answer history.
pub const HISTORY_LIMIT: usize = 10;

/// Number of broken or flushed streaks kept in the streak log.
pub const STREAK_RECORD_LIMIT: usize = 50;

//
// ─── BOUNDED LOG ───────────────────────────────────────────────────────────────
//

/// Newest-first log that evicts its oldest entries past a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuilds a log from entries already ordered newest-first, keeping only
    /// the newest `capacity` of them.
    #[must_use]
    pub fn from_newest_first(capacity: usize, entries: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: entries.into_iter().take(capacity).collect(),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    #[must_use]
    pub fn newest(&self) -> Option<&T> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Serialize> Serialize for BoundedLog<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

//
// ─── HISTORY ITEM ──────────────────────────────────────────────────────────────
//

/// One submitted answer, as shown in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: RecordId,
    pub question: String,
    pub user_answer: String,
    pub correct: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryItem {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        user_answer: impl Into<String>,
        correct: bool,
        timestamp: i64,
    ) -> Self {
        Self {
            id: RecordId::new(),
            question: question.into(),
            user_answer: user_answer.into(),
            correct,
            timestamp,
        }
    }
}

//
// ─── STREAK RECORD ─────────────────────────────────────────────────────────────
//

/// A streak archived at the moment it was broken or flushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub id: RecordId,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub value: NonZeroU32,
    pub operation: Operation,
    pub range: Range,
}

impl StreakRecord {
    /// Archives a streak. Returns `None` for a zero streak, which is never
    /// recorded.
    #[must_use]
    pub fn new(operation: Operation, value: u32, range: Range, timestamp: i64) -> Option<Self> {
        NonZeroU32::new(value).map(|value| Self {
            id: RecordId::new(),
            timestamp,
            value,
            operation,
            range,
        })
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_evicts_oldest_first() {
        let mut log = BoundedLog::new(3);
        for n in 1..=5 {
            log.push(n);
        }
        let entries: Vec<_> = log.iter().copied().collect();
        assert_eq!(entries, vec![5, 4, 3]);
        assert_eq!(log.newest(), Some(&5));
    }

    #[test]
    fn from_newest_first_truncates_old_tail() {
        let log = BoundedLog::from_newest_first(2, vec!["c", "b", "a"]);
        let entries: Vec<_> = log.iter().copied().collect();
        assert_eq!(entries, vec!["c", "b"]);
    }

    #[test]
    fn zero_streaks_are_not_recorded() {
        let range = Range::new(1, 10).unwrap();
        assert!(StreakRecord::new(Operation::Add, 0, range, 0).is_none());
        let record = StreakRecord::new(Operation::Add, 3, range, 42).unwrap();
        assert_eq!(record.value(), 3);
    }

    #[test]
    fn streak_record_json_shape() {
        let range = Range::new(1, 10).unwrap();
        let record = StreakRecord::new(Operation::Sub, 2, range, 1_000).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["value"], 2);
        assert_eq!(value["operation"], "sub");
        assert_eq!(value["timestamp"], 1_000);
        assert_eq!(value["range"]["min"], 1);
        assert_eq!(value["range"]["max"], 10);
        assert_eq!(value["id"], record.id.to_string());
    }

    #[test]
    fn history_item_uses_camel_case() {
        let item = HistoryItem::new("3 + 4", "7", true, 5);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["userAnswer"], "7");
        assert_eq!(value["correct"], true);
    }

    #[test]
    fn zero_valued_record_fails_to_decode() {
        let raw = format!(
            r#"{{"id":"{}","timestamp":1,"value":0,"operation":"add","range":{{"min":1,"max":2}}}}"#,
            RecordId::new()
        );
        assert!(serde_json::from_str::<StreakRecord>(&raw).is_err());
    }

    #[test]
    fn log_serializes_newest_first() {
        let mut log = BoundedLog::new(HISTORY_LIMIT);
        log.push(1);
        log.push(2);
        assert_eq!(serde_json::to_string(&log).unwrap(), "[2,1]");
    }
}
