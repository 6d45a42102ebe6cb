use flipp_core::model::{HistoryItem, Operation, Problem, Range, StreakRecord, StreakState};

use super::feedback::Feedback;
use super::state::SessionState;

/// Presentation-agnostic copy of everything a front end renders.
///
/// No pre-formatted strings: timestamps stay epoch milliseconds and the
/// UI decides how to show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub operation: Operation,
    pub range: Range,
    pub problem: Option<Problem>,
    pub answer_text: String,
    pub feedback: Feedback,
    pub score: u32,
    pub high_score: u32,
    pub streak: StreakState,
    /// Newest first.
    pub history: Vec<HistoryItem>,
    /// Newest first.
    pub streak_history: Vec<StreakRecord>,
}

impl SessionView {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            operation: state.operation(),
            range: state.range(),
            problem: state.problem().cloned(),
            answer_text: state.answer_text().to_string(),
            feedback: state.feedback(),
            score: state.score(),
            high_score: state.high_score(),
            streak: *state.streak(),
            history: state.history().iter().cloned().collect(),
            streak_history: state.streak_history().iter().cloned().collect(),
        }
    }

    /// Streak of the operation currently being practiced.
    #[must_use]
    pub fn active_streak(&self) -> u32 {
        self.streak.get(self.operation)
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.feedback.is_idle()
    }
}
