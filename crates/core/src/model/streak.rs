use serde::de::{Deserializer, IgnoredAny};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Operation;

/// Consecutive-correct counters, one per operation.
///
/// Serialized as `{"add":n,"sub":n,"mul":n,"div":n}`. Deserializing merges
/// every known key holding a non-negative count onto zeroed counters;
/// unknown keys and malformed values are skipped one by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakState {
    counts: [u32; 4],
}

impl StreakState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, operation: Operation) -> u32 {
        self.counts[operation.index()]
    }

    pub fn set(&mut self, operation: Operation, value: u32) {
        self.counts[operation.index()] = value;
    }

    /// Adds one to the operation's streak and returns the new value.
    pub fn increment(&mut self, operation: Operation) -> u32 {
        let slot = &mut self.counts[operation.index()];
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Zeroes the operation's streak, returning the value it had.
    pub fn reset(&mut self, operation: Operation) -> u32 {
        std::mem::take(&mut self.counts[operation.index()])
    }

    /// Operations whose streak is currently above zero, with their values.
    pub fn active(&self) -> impl Iterator<Item = (Operation, u32)> + '_ {
        Operation::ALL
            .into_iter()
            .map(|op| (op, self.get(op)))
            .filter(|(_, value)| *value > 0)
    }

    pub fn clear(&mut self) {
        self.counts = [0; 4];
    }
}

impl Serialize for StreakState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Operation::ALL.len()))?;
        for op in Operation::ALL {
            map.serialize_entry(op.key(), &self.get(op))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StreakState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, StoredCount>::deserialize(deserializer)?;
        let mut state = StreakState::new();
        for (key, value) in raw {
            if let (Ok(op), Some(count)) = (key.parse::<Operation>(), value.count()) {
                state.set(op, count);
            }
        }
        Ok(state)
    }
}

/// A persisted counter, or anything else that sits in its slot.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCount {
    Count(u32),
    Other(IgnoredAny),
}

impl StoredCount {
    fn count(self) -> Option<u32> {
        match self {
            StoredCount::Count(count) => Some(count),
            StoredCount::Other(IgnoredAny) => None,
        }
    }
}
