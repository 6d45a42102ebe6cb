use flipp_core::model::{
    BoundedLog, HISTORY_LIMIT, HistoryItem, Operation, Problem, Range, RangeError,
    STREAK_RECORD_LIMIT, StreakRecord, StreakState,
};
use flipp_core::{Clock, Hint};
use storage::SessionSnapshot;

use super::feedback::{Feedback, FeedbackTicket};
use super::settings::{RangeDecision, RangeSettingsDraft};
use super::source::ProblemSource;

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Feedback for the previous answer is still showing.
    Locked,
    /// No problem has been drawn yet.
    NoProblem,
    /// The input is not an integer. Nothing changed.
    Unparsable,
    Correct {
        ticket: FeedbackTicket,
    },
    Incorrect {
        ticket: FeedbackTicket,
        /// The streak archived by this miss, if one was running.
        flushed: Option<StreakRecord>,
    },
}

impl SubmitOutcome {
    /// Ticket for the feedback timer, present only for accepted answers.
    #[must_use]
    pub fn ticket(&self) -> Option<FeedbackTicket> {
        match self {
            SubmitOutcome::Correct { ticket } | SubmitOutcome::Incorrect { ticket, .. } => {
                Some(*ticket)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.ticket().is_some()
    }
}

/// Single-owner state of one practice session.
///
/// Every mutation goes through the command methods below. Time-dependent
/// transitions are split in two: the command hands out a `FeedbackTicket`
/// and the caller redeems it with [`SessionState::finish_feedback`] once the
/// feedback delay has passed.
pub struct SessionState {
    clock: Clock,
    source: Box<dyn ProblemSource>,
    operation: Operation,
    range: Range,
    problem: Option<Problem>,
    answer_text: String,
    score: u32,
    high_score: u32,
    streak: StreakState,
    history: BoundedLog<HistoryItem>,
    streak_history: BoundedLog<StreakRecord>,
    feedback: Feedback,
    generation: u64,
}

impl SessionState {
    #[must_use]
    pub fn new(source: Box<dyn ProblemSource>) -> Self {
        Self {
            clock: Clock::system(),
            source,
            operation: Operation::default(),
            range: Range::SESSION_DEFAULT,
            problem: None,
            answer_text: String::new(),
            score: 0,
            high_score: 0,
            streak: StreakState::default(),
            history: BoundedLog::new(HISTORY_LIMIT),
            streak_history: BoundedLog::new(STREAK_RECORD_LIMIT),
            feedback: Feedback::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Restores the persisted counters and streak log.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: SessionSnapshot) -> Self {
        self.score = snapshot.score;
        self.high_score = snapshot.high_score.max(snapshot.score);
        self.streak = snapshot.streak;
        self.streak_history = snapshot.streak_history;
        self
    }

    // ─── Queries ────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    #[must_use]
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    #[must_use]
    pub fn streak_for(&self, operation: Operation) -> u32 {
        self.streak.get(operation)
    }

    #[must_use]
    pub fn history(&self) -> &BoundedLog<HistoryItem> {
        &self.history
    }

    #[must_use]
    pub fn streak_history(&self) -> &BoundedLog<StreakRecord> {
        &self.streak_history
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.feedback.is_idle()
    }

    /// The persisted subset of the state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            streak: self.streak,
            high_score: self.high_score,
            streak_history: self.streak_history.clone(),
        }
    }

    // ─── Commands ───────────────────────────────────────────────────────────────

    /// Switches operation and draws a problem for it. Preempts any feedback.
    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
        self.install_problem();
    }

    /// Draws a fresh problem for the current operation and range.
    pub fn next_problem(&mut self) {
        self.install_problem();
    }

    /// Stores new operand bounds. The current problem, score and streaks are
    /// left alone; see [`SessionState::apply_range_settings`] for the policy
    /// that resets on a difficulty change.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Inverted` if `min > max`; the range is unchanged.
    pub fn set_range(&mut self, min: i32, max: i32) -> Result<(), RangeError> {
        self.range = Range::new(min, max)?;
        Ok(())
    }

    /// Updates the in-progress answer text. Ignored while locked.
    pub fn set_answer_text(&mut self, text: impl Into<String>) -> bool {
        if self.is_locked() {
            return false;
        }
        self.answer_text = text.into();
        true
    }

    /// Scores `raw` against the current problem.
    pub fn submit_answer(&mut self, raw: &str) -> SubmitOutcome {
        if self.is_locked() {
            return SubmitOutcome::Locked;
        }
        let Some(problem) = self.problem.as_ref() else {
            return SubmitOutcome::NoProblem;
        };
        let Some(value) = parse_answer(raw) else {
            return SubmitOutcome::Unparsable;
        };

        let correct = problem.is_correct(value);
        let question = problem.question().to_string();
        let now = self.clock.now_millis();

        self.answer_text = raw.to_string();
        self.history.push(HistoryItem::new(question, raw, correct, now));

        if correct {
            self.score = self.score.saturating_add(1);
            let streak = self.streak.increment(self.operation);
            self.high_score = self.high_score.max(self.score);
            tracing::debug!(
                operation = %self.operation,
                score = self.score,
                streak,
                "correct answer"
            );
            SubmitOutcome::Correct {
                ticket: self.show_feedback(Feedback::Correct),
            }
        } else {
            let flushed = self.flush_streak(self.operation);
            self.score = self.score.saturating_sub(1);
            tracing::debug!(
                operation = %self.operation,
                score = self.score,
                flushed = flushed.as_ref().map(StreakRecord::value),
                "incorrect answer"
            );
            SubmitOutcome::Incorrect {
                ticket: self.show_feedback(Feedback::Incorrect),
                flushed,
            }
        }
    }

    /// Ends the feedback window a ticket was issued for.
    ///
    /// After a correct answer a new problem is drawn; after an incorrect one
    /// the answer text is cleared and the same problem stays up. Returns
    /// `false` and changes nothing if the ticket has been superseded.
    pub fn finish_feedback(&mut self, ticket: FeedbackTicket) -> bool {
        if ticket.generation != self.generation || ticket.feedback != self.feedback {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale feedback ticket"
            );
            return false;
        }

        match self.feedback {
            Feedback::Correct => self.install_problem(),
            Feedback::Incorrect => {
                self.generation += 1;
                self.feedback = Feedback::Idle;
                self.answer_text.clear();
            }
            Feedback::Idle => return false,
        }
        true
    }

    /// Archives running streaks, zeroes streaks and score, clears the answer
    /// history and draws a fresh problem. The high score is kept.
    pub fn reset_session(&mut self) -> Vec<StreakRecord> {
        self.reset_with(None)
    }

    /// Applies the settings panel's range edits.
    ///
    /// Unchanged bounds only draw a new problem. Changed bounds archive
    /// streaks under the old range, then install the new range and reset.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Inverted` for inverted bounds; nothing changes.
    pub fn apply_range_settings(
        &mut self,
        draft: &RangeSettingsDraft,
    ) -> Result<RangeDecision, RangeError> {
        let decision = draft.decide()?;
        match decision {
            RangeDecision::Refresh => self.install_problem(),
            RangeDecision::Reset(range) => {
                self.reset_with(Some(range));
            }
        }
        Ok(decision)
    }

    /// A worked example for the current operation.
    pub fn hint(&mut self) -> Hint {
        self.source.hint(self.operation)
    }

    // ─── Internals ──────────────────────────────────────────────────────────────

    fn install_problem(&mut self) {
        self.generation += 1;
        self.problem = Some(self.source.next_problem(self.operation, self.range));
        self.answer_text.clear();
        self.feedback = Feedback::Idle;
    }

    fn show_feedback(&mut self, feedback: Feedback) -> FeedbackTicket {
        self.generation += 1;
        self.feedback = feedback;
        FeedbackTicket {
            generation: self.generation,
            feedback,
        }
    }

    fn flush_streak(&mut self, operation: Operation) -> Option<StreakRecord> {
        let value = self.streak.reset(operation);
        let record = StreakRecord::new(operation, value, self.range, self.clock.now_millis())?;
        self.streak_history.push(record.clone());
        Some(record)
    }

    fn reset_with(&mut self, new_range: Option<Range>) -> Vec<StreakRecord> {
        let flushed: Vec<StreakRecord> = Operation::ALL
            .into_iter()
            .filter_map(|op| self.flush_streak(op))
            .collect();

        if let Some(range) = new_range {
            self.range = range;
        }
        self.streak.clear();
        self.score = 0;
        self.history.clear();
        self.install_problem();

        tracing::debug!(
            flushed = flushed.len(),
            min = self.range.min(),
            max = self.range.max(),
            "session reset"
        );
        flushed
    }
}

/// Trimmed, optionally signed base-10 integer.
///
/// Stricter than a lenient prefix parse: trailing text ("7abc") and
/// decimals ("7.0") are rejected rather than read as 7.
fn parse_answer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
