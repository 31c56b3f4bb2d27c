use serde::{Deserialize, Serialize};

/// Operating mode. Focus and away both make the no-rule-matched default
/// `Digest`; away takes precedence when both are requested, so the two are
/// modeled as one three-state value instead of independent booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Normal,
    Focus,
    Away,
}

/// Mutable session state read by the router and the ledger. Mutated only
/// by explicit toggle/set operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionState {
    #[serde(default)]
    pub mode: Mode,
    /// When set and in the future, every event is forced to `Digest`
    /// before rules are consulted. Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snooze_until: Option<i64>,
}

impl SessionState {
    pub fn snooze_active(&self, now_ms: i64) -> bool {
        self.snooze_until.is_some_and(|until| now_ms < until)
    }

    /// Whether the no-rule-matched default is `Digest` instead of `Allow`.
    pub fn digests_by_default(&self) -> bool {
        self.mode != Mode::Normal
    }

    /// Flip focus mode. Returns the new enabled flag.
    pub fn toggle_focus(&mut self) -> bool {
        self.mode = match self.mode {
            Mode::Focus => Mode::Normal,
            _ => Mode::Focus,
        };
        self.mode == Mode::Focus
    }

    /// Flip away mode. Entering away from focus drops focus rather than
    /// stacking the two. Returns the new enabled flag.
    pub fn toggle_away(&mut self) -> bool {
        self.mode = match self.mode {
            Mode::Away => Mode::Normal,
            _ => Mode::Away,
        };
        self.mode == Mode::Away
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_focus_round_trip() {
        let mut state = SessionState::default();
        assert!(state.toggle_focus());
        assert_eq!(state.mode, Mode::Focus);
        assert!(!state.toggle_focus());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_away_takes_precedence_over_focus() {
        let mut state = SessionState::default();
        state.toggle_focus();
        assert!(state.toggle_away());
        assert_eq!(state.mode, Mode::Away);

        // Leaving away lands in normal, not back in focus
        assert!(!state.toggle_away());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_snooze_active_window() {
        let state = SessionState {
            snooze_until: Some(1_000),
            ..Default::default()
        };
        assert!(state.snooze_active(999));
        assert!(!state.snooze_active(1_000));
        assert!(!state.snooze_active(1_001));
        assert!(!SessionState::default().snooze_active(0));
    }

    #[test]
    fn test_digest_default_in_focus_and_away() {
        let mut state = SessionState::default();
        assert!(!state.digests_by_default());
        state.toggle_focus();
        assert!(state.digests_by_default());
        state.toggle_away();
        assert!(state.digests_by_default());
    }
}
