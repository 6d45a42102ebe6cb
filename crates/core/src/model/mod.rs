mod history;
mod ids;
mod operation;
mod problem;
mod range;
mod streak;

pub use history::{
    BoundedLog, HISTORY_LIMIT, HistoryItem, STREAK_RECORD_LIMIT, StreakRecord,
};
pub use ids::{ParseIdError, RecordId};
pub use operation::{Operation, ParseOperationError};
pub use problem::Problem;
pub use range::{Range, RangeError};
pub use streak::StreakState;
