use std::time::Duration;

use flipp_core::model::{Operation, Range};

use crate::error::ConfigError;
use crate::sessions::FEEDBACK_DELAY;

pub const ENV_FEEDBACK_DELAY_MS: &str = "FLIPP_FEEDBACK_DELAY_MS";
pub const ENV_RANGE_MIN: &str = "FLIPP_RANGE_MIN";
pub const ENV_RANGE_MAX: &str = "FLIPP_RANGE_MAX";
pub const ENV_SEED: &str = "FLIPP_SEED";
pub const ENV_DB_URL: &str = "FLIPP_DB_URL";

const DEFAULT_DB_URL: &str = "sqlite://flipp.sqlite3";

/// Tunables for a practice session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeConfig {
    feedback_delay: Duration,
    initial_range: Range,
    initial_operation: Operation,
    rng_seed: Option<u64>,
    db_url: String,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            feedback_delay: FEEDBACK_DELAY,
            initial_range: Range::SESSION_DEFAULT,
            initial_operation: Operation::Add,
            rng_seed: None,
            db_url: DEFAULT_DB_URL.to_string(),
        }
    }
}

impl PracticeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from `FLIPP_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64>(&lookup, ENV_FEEDBACK_DELAY_MS)? {
            config.feedback_delay = Duration::from_millis(ms);
        }

        let min = parse_var::<i32>(&lookup, ENV_RANGE_MIN)?;
        let max = parse_var::<i32>(&lookup, ENV_RANGE_MAX)?;
        if min.is_some() || max.is_some() {
            let current = config.initial_range;
            config.initial_range =
                Range::new(min.unwrap_or(current.min()), max.unwrap_or(current.max()))?;
        }

        config.rng_seed = parse_var::<u64>(&lookup, ENV_SEED)?;

        if let Some(url) = lookup(ENV_DB_URL) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: ENV_DB_URL,
                    raw: url.to_string(),
                });
            }
            config.db_url = url.to_string();
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    #[must_use]
    pub fn with_initial_range(mut self, range: Range) -> Self {
        self.initial_range = range;
        self
    }

    #[must_use]
    pub fn with_initial_operation(mut self, operation: Operation) -> Self {
        self.initial_operation = operation;
        self
    }

    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = url.into();
        self
    }

    #[must_use]
    pub fn feedback_delay(&self) -> Duration {
        self.feedback_delay
    }

    #[must_use]
    pub fn initial_range(&self) -> Range {
        self.initial_range
    }

    #[must_use]
    pub fn initial_operation(&self) -> Operation {
        self.initial_operation
    }

    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    #[must_use]
    pub fn db_url(&self) -> &str {
        &self.db_url
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let parsed = raw.trim().parse::<T>();
    match parsed {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::InvalidValue { var, raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let config = PracticeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PracticeConfig::default());
        assert_eq!(config.feedback_delay(), Duration::from_millis(1000));
        assert_eq!(config.initial_range(), Range::new(1, 20).unwrap());
    }

    #[test]
    fn overrides_are_applied() {
        let config = PracticeConfig::from_lookup(lookup(&[
            (ENV_FEEDBACK_DELAY_MS, "250"),
            (ENV_RANGE_MIN, "-10"),
            (ENV_SEED, "7"),
            (ENV_DB_URL, "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.feedback_delay(), Duration::from_millis(250));
        assert_eq!(config.initial_range(), Range::new(-10, 20).unwrap());
        assert_eq!(config.rng_seed(), Some(7));
        assert_eq!(config.db_url(), "sqlite::memory:");
    }

    #[test]
    fn malformed_values_are_reported() {
        let err = PracticeConfig::from_lookup(lookup(&[(ENV_SEED, "lots")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: ENV_SEED, .. }
        ));
    }

    #[test]
    fn inverted_range_is_reported() {
        let err = PracticeConfig::from_lookup(lookup(&[(ENV_RANGE_MIN, "30")])).unwrap_err();
        assert!(matches!(err, ConfigError::Range(_)));
    }
}
