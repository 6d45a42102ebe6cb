use chrono::{DateTime, TimeDelta, Utc};

/// Where history items and streak records get their timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Wall-clock time.
    #[default]
    System,
    /// Frozen at one instant until moved with [`Clock::advance`].
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Epoch milliseconds, the unit records are stamped with.
    #[must_use]
    pub fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Moves a fixed clock forward. The system clock ignores this.
    pub fn advance(&mut self, by: TimeDelta) {
        if let Clock::Fixed(at) = self {
            *at += by;
        }
    }
}

/// Seconds since the epoch that test clocks start at (2023-11-14T22:13:20Z).
pub const TEST_EPOCH_SECS: i64 = 1_700_000_000;

/// The instant test clocks start at.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(TEST_EPOCH_SECS, 0).unwrap_or_default()
}

/// A clock frozen at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
