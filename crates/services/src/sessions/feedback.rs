use std::time::Duration;

/// How long answer feedback stays visible before the session moves on.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1000);

/// Outcome flag shown after a submission.
///
/// While it is anything but `Idle` the session is locked and further
/// submissions are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Feedback {
    #[default]
    Idle,
    Correct,
    Incorrect,
}

impl Feedback {
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Feedback::Idle)
    }
}

/// Handle for the delayed transition back to `Feedback::Idle`.
///
/// Tickets carry the generation they were issued in. Any command that
/// installs a new problem or feedback bumps the generation, so a ticket
/// from before that point resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTicket {
    pub(crate) generation: u64,
    pub(crate) feedback: Feedback,
}

impl FeedbackTicket {
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
