use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::model::{Action, Rule};

/// Caller-side settings the host feeds into the triage core. The core
/// itself never touches the filesystem; persisting rules and identity is
/// the host's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Name the mention override watches for as `@name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Rule list installed in normal mode.
    pub rules: Vec<Rule>,
    /// Filtered rule list installed while focus mode is active (only the
    /// rules worth seeing while focused, ending in a catch-all digest).
    #[serde(default)]
    pub focus_rules: Vec<Rule>,
    /// Tick interval of the demo event feed.
    pub feed_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: None,
            rules: vec![
                Rule::new("ci", Some("failed"), Action::Allow),
                Rule::new("*", Some("heartbeat"), Action::Suppress),
                Rule::catch_all(Action::Allow),
            ],
            focus_rules: vec![
                Rule::new("pager", None, Action::Allow),
                Rule::catch_all(Action::Digest),
            ],
            feed_interval_ms: 1000,
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_path: config_dir.join("settings.json"),
        }
    }

    /// Load settings, falling back to defaults when the file is missing
    /// or unparseable.
    pub fn load(&self) -> Settings {
        if self.config_path.exists() {
            if let Ok(content) = fs::read_to_string(&self.config_path) {
                if let Ok(settings) = serde_json::from_str(&content) {
                    return settings;
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.config_path, content)
    }
}
