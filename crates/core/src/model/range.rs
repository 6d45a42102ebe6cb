use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeError {
    #[error("range minimum {min} is greater than maximum {max}")]
    Inverted { min: i32, max: i32 },
}

/// Inclusive operand bounds, always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct Range {
    min: i32,
    max: i32,
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    min: i32,
    max: i32,
}

impl Range {
    /// Operand range used by the generator when none is given.
    pub const GENERATOR_DEFAULT: Range = Range { min: -15, max: 15 };

    /// Range a fresh session starts with.
    pub const SESSION_DEFAULT: Range = Range { min: 1, max: 20 };

    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Inverted` if `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::GENERATOR_DEFAULT
    }
}

impl TryFrom<RawRange> for Range {
    type Error = RangeError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Range::new(raw.min, raw.max)
    }
}

impl From<Range> for RawRange {
    fn from(range: Range) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}
