//! Shared error types for the services crate.

use thiserror::Error;

use flipp_core::model::RangeError;
use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `PracticeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("snapshot writer stopped unexpectedly: {0}")]
    Writer(String),
}

/// Errors emitted while reading `PracticeConfig` from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} has an invalid value: {raw:?}")]
    InvalidValue { var: &'static str, raw: String },
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Errors emitted while bootstrapping practice services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("invalid database url: {0}")]
    InvalidDbUrl(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Practice(#[from] PracticeError),
}
