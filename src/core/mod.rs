// Triage core: pure rule routing plus the stateful ledger around it.
//
// Architecture:
// - model.rs: event, rule, action, and record types
// - matchers.rs: composable match conditions (the extension point)
// - router.rs: pure first-match-wins classification
// - state.rs: session mode and snooze state
// - ledger.rs: stateful wrapper tracking classified records
// - config.rs: caller-side settings persistence

pub mod config;
pub mod ledger;
pub mod matchers;
pub mod model;
pub mod router;
pub mod state;
