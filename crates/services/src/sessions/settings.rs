use flipp_core::model::{Range, RangeError};

/// What applying the range settings did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDecision {
    /// Bounds are unchanged; only a fresh problem was drawn.
    Refresh,
    /// Bounds changed; streaks were archived and the score reset.
    Reset(Range),
}

/// Range edits made while the settings panel is open.
///
/// Captures the range at open time. A change of difficulty invalidates the
/// running score and streaks, so applying a draft with different bounds
/// resets the session instead of just drawing a new problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSettingsDraft {
    initial: Range,
    pub min: i32,
    pub max: i32,
}

impl RangeSettingsDraft {
    #[must_use]
    pub fn open(current: Range) -> Self {
        Self {
            initial: current,
            min: current.min(),
            max: current.max(),
        }
    }

    #[must_use]
    pub fn initial(&self) -> Range {
        self.initial
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.min != self.initial.min() || self.max != self.initial.max()
    }

    /// Decide how the session should react when the panel closes.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Inverted` if the edited bounds are inverted.
    pub fn decide(&self) -> Result<RangeDecision, RangeError> {
        if !self.is_changed() {
            return Ok(RangeDecision::Refresh);
        }
        Range::new(self.min, self.max).map(RangeDecision::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_draft_refreshes() {
        let draft = RangeSettingsDraft::open(Range::new(1, 20).unwrap());
        assert!(!draft.is_changed());
        assert_eq!(draft.decide().unwrap(), RangeDecision::Refresh);
    }

    #[test]
    fn edited_back_to_initial_refreshes() {
        let mut draft = RangeSettingsDraft::open(Range::new(1, 20).unwrap());
        draft.max = 30;
        draft.max = 20;
        assert_eq!(draft.decide().unwrap(), RangeDecision::Refresh);
    }

    #[test]
    fn changed_bounds_reset() {
        let mut draft = RangeSettingsDraft::open(Range::new(1, 20).unwrap());
        draft.min = -5;
        assert_eq!(
            draft.decide().unwrap(),
            RangeDecision::Reset(Range::new(-5, 20).unwrap())
        );
    }

    #[test]
    fn inverted_edit_is_rejected() {
        let mut draft = RangeSettingsDraft::open(Range::new(1, 20).unwrap());
        draft.min = 50;
        assert!(matches!(
            draft.decide(),
            Err(RangeError::Inverted { min: 50, max: 20 })
        ));
    }
}
