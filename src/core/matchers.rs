// Match conditions for triage rules.
//
// A rule applies to an event iff every condition in the configured list
// returns true. The list is ordered and injected into the router, so
// callers can extend matching (e.g. with a regex condition) without
// touching evaluation order logic.

use log::warn;
use regex::RegexBuilder;

use super::model::{Event, Rule, WILDCARD_SOURCE};

/// Pure predicate deciding whether a rule applies to an event.
pub trait MatchCondition {
    fn matches(&self, rule: &Rule, event: &Event) -> bool;
}

/// Passes when the rule names the event source case-insensitively, or is
/// the `*` wildcard.
pub struct SourceCondition;

impl MatchCondition for SourceCondition {
    fn matches(&self, rule: &Rule, event: &Event) -> bool {
        rule.source == WILDCARD_SOURCE
            || rule.source.to_lowercase() == event.source.to_lowercase()
    }
}

/// Passes when the rule has no content filter, or the trimmed filter text
/// occurs in the event's title/body (case-insensitive).
pub struct ContainsCondition;

impl MatchCondition for ContainsCondition {
    fn matches(&self, rule: &Rule, event: &Event) -> bool {
        let needle = match &rule.contains {
            Some(filter) => filter.trim().to_lowercase(),
            None => return true,
        };
        if needle.is_empty() {
            return true;
        }
        event.text().to_lowercase().contains(&needle)
    }
}

/// Interprets `rule.contains` as a case-insensitive regex over the event
/// text. Not part of the default list. An unparseable pattern fails
/// closed: the rule simply never matches instead of blocking
/// classification.
pub struct RegexCondition;

impl MatchCondition for RegexCondition {
    fn matches(&self, rule: &Rule, event: &Event) -> bool {
        let pattern = match rule.contains.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => return true,
        };
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => re.is_match(&event.text()),
            Err(err) => {
                warn!("ignoring rule with unparseable pattern {pattern:?}: {err}");
                false
            }
        }
    }
}

/// Built-in condition list in evaluation order: source first, content
/// filter second.
pub fn default_conditions() -> Vec<Box<dyn MatchCondition>> {
    vec![Box::new(SourceCondition), Box::new(ContainsCondition)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Action;

    fn event(source: &str, title: &str, body: &str) -> Event {
        Event::new(source, title, body)
    }

    #[test]
    fn test_source_match_case_insensitive() {
        let rule = Rule::new("Git", None, Action::Allow);
        assert!(SourceCondition.matches(&rule, &event("git", "a", "b")));
        assert!(SourceCondition.matches(&rule, &event("GIT", "a", "b")));
        assert!(!SourceCondition.matches(&rule, &event("chat", "a", "b")));
    }

    #[test]
    fn test_source_wildcard_matches_everything() {
        let rule = Rule::catch_all(Action::Digest);
        assert!(SourceCondition.matches(&rule, &event("anything", "", "")));
    }

    #[test]
    fn test_contains_blank_or_absent_passes() {
        let no_filter = Rule::new("git", None, Action::Allow);
        let blank = Rule::new("git", Some("   "), Action::Allow);
        let ev = event("git", "Done", "pull finished");
        assert!(ContainsCondition.matches(&no_filter, &ev));
        assert!(ContainsCondition.matches(&blank, &ev));
    }

    #[test]
    fn test_contains_case_insensitive_and_trimmed() {
        let rule = Rule::new("git", Some("  PULL "), Action::Suppress);
        assert!(ContainsCondition.matches(&rule, &event("git", "Done", "pull finished")));
        assert!(!ContainsCondition.matches(&rule, &event("git", "Done", "push finished")));
    }

    #[test]
    fn test_contains_searches_title_and_body() {
        let rule = Rule::new("*", Some("urgent"), Action::Allow);
        assert!(ContainsCondition.matches(&rule, &event("x", "URGENT: disk", "")));
        assert!(ContainsCondition.matches(&rule, &event("x", "", "this is urgent")));
    }

    #[test]
    fn test_regex_condition_matches() {
        let rule = Rule::new("*", Some(r"pull\s+finished"), Action::Suppress);
        assert!(RegexCondition.matches(&rule, &event("git", "Done", "Pull finished")));
        assert!(!RegexCondition.matches(&rule, &event("git", "Done", "pull started")));
    }

    #[test]
    fn test_regex_condition_fails_closed_on_bad_pattern() {
        let rule = Rule::new("*", Some("(unclosed"), Action::Suppress);
        assert!(!RegexCondition.matches(&rule, &event("git", "a", "b")));
    }

    #[test]
    fn test_default_conditions_order() {
        let conditions = default_conditions();
        assert_eq!(conditions.len(), 2);

        // Wrong source must veto even when the content filter would pass
        let rule = Rule::new("git", Some("pull"), Action::Suppress);
        let ev = event("chat", "Done", "pull finished");
        assert!(!conditions.iter().all(|c| c.matches(&rule, &ev)));
    }
}
