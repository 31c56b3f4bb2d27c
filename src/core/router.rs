// First-match-wins rule routing.
//
// Pure and deterministic: no hidden state, no side effects. The ledger
// layers mention override and mode short-circuits on top of this.

use super::matchers::MatchCondition;
use super::model::{Action, Event, Rule};
use super::state::SessionState;

/// Classify one event against an ordered rule list.
///
/// 1. An active snooze forces `Digest`; rules are not consulted.
/// 2. Otherwise the first rule accepted by every condition decides.
/// 3. No match: `Digest` while focused/away, else `Allow`.
///
/// A catch-all rule placed before more specific ones legally shadows them;
/// the router does not warn or reorder.
pub fn route(
    event: &Event,
    state: &SessionState,
    rules: &[Rule],
    conditions: &[Box<dyn MatchCondition>],
    now_ms: i64,
) -> Action {
    if state.snooze_active(now_ms) {
        return Action::Digest;
    }

    for rule in rules {
        if conditions.iter().all(|c| c.matches(rule, event)) {
            return rule.action;
        }
    }

    if state.digests_by_default() {
        Action::Digest
    } else {
        Action::Allow
    }
}
