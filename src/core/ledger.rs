// Stateful triage ledger.
//
// Drives each event through mention override -> mode short-circuit ->
// router, records the outcome in the matching partition, and notifies
// count listeners synchronously. Owns the session state and the rule
// list; both are swapped atomically between classification calls.

use chrono::Utc;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use super::matchers::{default_conditions, MatchCondition};
use super::model::{Action, ClassifiedRecord, Event, Partition, Rule};
use super::router::route;
use super::state::{Mode, SessionState};

type CountCallback = Box<dyn Fn(usize)>;
type ToggleCallback = Box<dyn Fn(bool)>;
type Clock = Box<dyn Fn() -> i64>;

pub struct Ledger {
    state: SessionState,
    rules: Vec<Rule>,
    conditions: Vec<Box<dyn MatchCondition>>,
    user_name: Option<String>,
    /// Compiled `@name` token matcher, rebuilt whenever the name changes.
    mention_re: Option<Regex>,
    processed: Vec<ClassifiedRecord>,
    important: Vec<ClassifiedRecord>,
    digested: Vec<ClassifiedRecord>,
    on_important_count: Option<CountCallback>,
    on_digest_count: Option<CountCallback>,
    on_focus: Option<ToggleCallback>,
    on_away: Option<ToggleCallback>,
    clock: Clock,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_clock(Box::new(|| Utc::now().timestamp_millis()))
    }

    /// Ledger with an injected clock, for deterministic snooze and
    /// timestamp behavior in tests.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: SessionState::default(),
            rules: Vec::new(),
            conditions: default_conditions(),
            user_name: None,
            mention_re: None,
            processed: Vec::new(),
            important: Vec::new(),
            digested: Vec::new(),
            on_important_count: None,
            on_digest_count: None,
            on_focus: None,
            on_away: None,
            clock,
        }
    }

    /// Classify one event and record the outcome.
    ///
    /// A mention of the configured user name wins over snooze, mode, and
    /// rules. Focus/away send everything else straight to the digest, even
    /// events an allow rule would have caught.
    pub fn classify(&mut self, event: Event) -> Action {
        let now = (self.clock)();

        let action = if self.is_mention(&event) {
            Action::Allow
        } else if self.state.mode != Mode::Normal {
            Action::Digest
        } else {
            route(&event, &self.state, &self.rules, &self.conditions, now)
        };
        debug!("classified {:?} event from '{}'", action, event.source);

        let record = ClassifiedRecord {
            event,
            action,
            timestamp: now,
        };
        self.processed.push(record.clone());

        match action {
            Action::Allow => {
                self.important.push(record);
                // While focused the masked status indicator must not
                // flicker; the record is still retained for later reveal.
                if self.state.mode != Mode::Focus {
                    self.fire_important_count();
                }
            }
            Action::Digest => {
                self.digested.push(record);
                self.fire_digest_count();
            }
            Action::Suppress => {}
        }

        action
    }

    fn is_mention(&self, event: &Event) -> bool {
        self.mention_re
            .as_ref()
            .is_some_and(|re| re.is_match(&event.title) || re.is_match(&event.body))
    }

    // --- rule and state surface ---

    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    pub fn rules(&self) -> Vec<Rule> {
        self.rules.clone()
    }

    /// Replace the condition list. The default is source + contains; this
    /// is the only extension point of the classification path.
    pub fn set_conditions(&mut self, conditions: Vec<Box<dyn MatchCondition>>) {
        self.conditions = conditions;
    }

    pub fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    /// Flip focus mode and report the new flag to the change listener.
    pub fn toggle_focus(&mut self) -> bool {
        let enabled = self.state.toggle_focus();
        if let Some(cb) = &self.on_focus {
            cb(enabled);
        }
        enabled
    }

    /// Flip away mode. Entering away while focused also reports focus off,
    /// since the two modes never stack.
    pub fn toggle_away(&mut self) -> bool {
        let was_focused = self.state.mode == Mode::Focus;
        let enabled = self.state.toggle_away();
        if enabled && was_focused {
            if let Some(cb) = &self.on_focus {
                cb(false);
            }
        }
        if let Some(cb) = &self.on_away {
            cb(enabled);
        }
        enabled
    }

    /// Configure the name the mention override looks for as an `@name`
    /// token. `None` or a blank name disables the override.
    pub fn set_user_name(&mut self, name: Option<String>) {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        self.mention_re = name.as_deref().and_then(|n| {
            let pattern = format!(r"@{}\b", regex::escape(n));
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => Some(re),
                Err(err) => {
                    warn!("disabling mention override, bad name pattern: {err}");
                    None
                }
            }
        });
        self.user_name = name;
    }

    pub fn user_name(&self) -> Option<String> {
        self.user_name.clone()
    }

    // --- partition reads ---

    pub fn list_important(&self) -> Vec<ClassifiedRecord> {
        self.important.clone()
    }

    pub fn list_digested(&self) -> Vec<ClassifiedRecord> {
        self.digested.clone()
    }

    /// Snapshot of both partitions: important before digested, newest
    /// first within each, ties kept in insertion order.
    pub fn list_all_sorted_by_recency(&self) -> Vec<ClassifiedRecord> {
        let mut important = self.important.clone();
        important.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut digested = self.digested.clone();
        digested.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        important.into_iter().chain(digested).collect()
    }

    /// Full audit history including suppressed outcomes, in call order.
    pub fn processed(&self) -> Vec<ClassifiedRecord> {
        self.processed.clone()
    }

    pub fn important_count(&self) -> usize {
        self.important.len()
    }

    pub fn digest_count(&self) -> usize {
        self.digested.len()
    }

    // --- partition writes ---

    /// Remove the record at `index` in the partition's current ordering.
    /// An out-of-range index is a no-op: the presentation layer may hold a
    /// stale index under benign races.
    pub fn mark_read(&mut self, partition: Partition, index: usize) {
        let list = match partition {
            Partition::Important => &mut self.important,
            Partition::Digested => &mut self.digested,
        };
        if index >= list.len() {
            return;
        }
        list.remove(index);
        match partition {
            Partition::Important => self.fire_important_count(),
            Partition::Digested => self.fire_digest_count(),
        }
    }

    /// Empty a partition and report the zero count.
    pub fn clear(&mut self, partition: Partition) {
        match partition {
            Partition::Important => {
                self.important.clear();
                self.fire_important_count();
            }
            Partition::Digested => {
                self.digested.clear();
                self.fire_digest_count();
            }
        }
    }

    // --- change listeners, registered once, invoked synchronously ---

    pub fn on_important_count_changed(&mut self, cb: impl Fn(usize) + 'static) {
        self.on_important_count = Some(Box::new(cb));
    }

    pub fn on_digest_count_changed(&mut self, cb: impl Fn(usize) + 'static) {
        self.on_digest_count = Some(Box::new(cb));
    }

    pub fn on_focus_changed(&mut self, cb: impl Fn(bool) + 'static) {
        self.on_focus = Some(Box::new(cb));
    }

    pub fn on_away_changed(&mut self, cb: impl Fn(bool) + 'static) {
        self.on_away = Some(Box::new(cb));
    }

    fn fire_important_count(&self) {
        if let Some(cb) = &self.on_important_count {
            cb(self.important.len());
        }
    }

    fn fire_digest_count(&self) {
        if let Some(cb) = &self.on_digest_count {
            cb(self.digested.len());
        }
    }
}
