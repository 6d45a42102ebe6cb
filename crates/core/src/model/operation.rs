use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown operation: {0:?}")]
pub struct ParseOperationError(pub String);

/// One of the four arithmetic operations a problem can exercise.
///
/// Serialized as the lowercase keys used in persisted state
/// (`add`, `sub`, `mul`, `div`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    /// Every operation, in display order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
    ];

    /// Persisted key for this operation.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
        }
    }

    /// Operator glyph used in question text.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "×",
            Operation::Div => "÷",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Operation::Add => 0,
            Operation::Sub => 1,
            Operation::Mul => 2,
            Operation::Div => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.key() == s)
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}
