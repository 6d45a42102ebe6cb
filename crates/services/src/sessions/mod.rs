mod feedback;
mod settings;
mod source;
mod state;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::PracticeError;
pub use feedback::{FEEDBACK_DELAY, Feedback, FeedbackTicket};
pub use settings::{RangeDecision, RangeSettingsDraft};
pub use source::{ProblemSource, RandomProblems, ScriptedProblems};
pub use state::{SessionState, SubmitOutcome};
pub use view::SessionView;
pub use workflow::PracticeService;
