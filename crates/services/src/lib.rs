#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod sessions;

pub use flipp_core::Clock;

pub use app_services::PracticeServices;
pub use config::PracticeConfig;
pub use error::{AppServicesError, ConfigError, PracticeError};
pub use sessions::{
    FEEDBACK_DELAY, Feedback, PracticeService, RangeDecision, RangeSettingsDraft, SessionState,
    SessionView, SubmitOutcome,
};
