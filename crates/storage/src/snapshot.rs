//! Encoding of session state into the persisted key-value entries.
//!
//! Every field is read independently: a missing, unreadable or malformed
//! entry falls back to its default and never prevents the others from
//! loading.

use flipp_core::model::{BoundedLog, STREAK_RECORD_LIMIT, StreakRecord, StreakState};
use serde_json::Value;

use crate::repository::{KeyValueStore, StorageError};

pub const SCORE_KEY: &str = "score";
pub const STREAK_KEY: &str = "streak";
pub const HIGH_SCORE_KEY: &str = "highScore";
pub const STREAK_HISTORY_KEY: &str = "streakHistory";

/// The persisted part of a practice session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub score: u32,
    pub streak: StreakState,
    pub high_score: u32,
    pub streak_history: BoundedLog<StreakRecord>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            score: 0,
            streak: StreakState::default(),
            high_score: 0,
            streak_history: BoundedLog::new(STREAK_RECORD_LIMIT),
        }
    }
}

impl SessionSnapshot {
    /// Encodes the snapshot as `(key, value)` entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if JSON encoding fails.
    pub fn to_entries(&self) -> Result<Vec<(&'static str, String)>, StorageError> {
        let streak = serde_json::to_string(&self.streak)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let history = serde_json::to_string(&self.streak_history)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(vec![
            (SCORE_KEY, self.score.to_string()),
            (STREAK_KEY, streak),
            (HIGH_SCORE_KEY, self.high_score.to_string()),
            (STREAK_HISTORY_KEY, history),
        ])
    }
}

/// Loads a snapshot, tolerating any subset of fields being absent or bad.
pub async fn load_snapshot(store: &dyn KeyValueStore) -> SessionSnapshot {
    let mut snapshot = SessionSnapshot::default();

    if let Some(score) = read_field(store, SCORE_KEY, parse_count).await {
        snapshot.score = score;
    }
    if let Some(streak) = read_field(store, STREAK_KEY, parse_streak).await {
        snapshot.streak = streak;
    }
    if let Some(high_score) = read_field(store, HIGH_SCORE_KEY, parse_count).await {
        snapshot.high_score = high_score;
    }
    if let Some(history) = read_field(store, STREAK_HISTORY_KEY, parse_streak_history).await {
        snapshot.streak_history = history;
    }

    // High score is a running maximum of the score.
    snapshot.high_score = snapshot.high_score.max(snapshot.score);
    snapshot
}

/// Writes every field of the snapshot.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub async fn save_snapshot(
    store: &dyn KeyValueStore,
    snapshot: &SessionSnapshot,
) -> Result<(), StorageError> {
    let entries = snapshot.to_entries()?;
    store.set_many(&entries).await
}

async fn read_field<T>(
    store: &dyn KeyValueStore,
    key: &'static str,
    parse: fn(&str) -> Result<T, String>,
) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read persisted field, using default");
            return None;
        }
    };

    match parse(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding malformed persisted field");
            None
        }
    }
}

fn parse_count(raw: &str) -> Result<u32, String> {
    raw.trim().parse::<u32>().map_err(|e| e.to_string())
}

fn parse_streak(raw: &str) -> Result<StreakState, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

fn parse_streak_history(raw: &str) -> Result<BoundedLog<StreakRecord>, String> {
    let items: Vec<Value> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let total = items.len();
    let records: Vec<StreakRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        tracing::warn!(
            key = STREAK_HISTORY_KEY,
            skipped,
            "skipped malformed streak records"
        );
    }

    Ok(BoundedLog::from_newest_first(STREAK_RECORD_LIMIT, records))
}
