// Data model for triage classification.
//
// Rules are supplied by the caller and may be replaced wholesale at any
// time (e.g. on a mode change); the router never owns a rule list.

use serde::{Deserialize, Serialize};

pub type SourceName = String;

/// Rule source that matches every event.
pub const WILDCARD_SOURCE: &str = "*";

/// Incoming notification-like event, produced by an external collaborator.
/// Immutable once created; consumed once per classification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub source: SourceName,
    pub title: String,
    pub body: String,
}

impl Event {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Text that content filters search: title and body joined by a newline.
    pub fn text(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// Delivery outcome of a classification. Closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Show immediately.
    Allow,
    /// Drop silently.
    Suppress,
    /// Defer to the digest.
    Digest,
}

/// One triage rule. `source` is `"*"` or an exact, case-insensitive source
/// name. `contains`, when present and non-blank, is a case-insensitive
/// substring filter over the event text; blank/absent means no content
/// filter. Rules live in an ordered list and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    pub action: Action,
}

impl Rule {
    pub fn new(source: impl Into<String>, contains: Option<&str>, action: Action) -> Self {
        Self {
            source: source.into(),
            contains: contains.map(str::to_string),
            action,
        }
    }

    /// Rule that matches every event. Placed anywhere but last it shadows
    /// all rules after it, which the router deliberately does not guard
    /// against.
    pub fn catch_all(action: Action) -> Self {
        Self {
            source: WILDCARD_SOURCE.to_string(),
            contains: None,
            action,
        }
    }
}

/// Record of one classification, owned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub event: Event,
    pub action: Action,
    /// Epoch milliseconds from the ledger's clock.
    pub timestamp: i64,
}

/// Retained ledger partitions. Suppressed records are kept only in the
/// processed audit history, never in a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Important,
    Digested,
}
