// Demo driver wiring the triage core to a mock event feed.
//
// Everything here is external-collaborator plumbing: the feed stands in
// for real notification producers and the status line stands in for a
// host UI. A real host would hang its panels off the same callbacks.

use std::path::PathBuf;

use log::info;
use tokio::time::{interval, Duration};

use crate::core::config::{ConfigManager, Settings};
use crate::core::ledger::Ledger;
use crate::core::model::Event;

/// Canned events the mock feed cycles through.
const FEED: &[(&str, &str, &str)] = &[
    ("git", "Push complete", "push finished on main"),
    ("ci", "Build failed", "job 1842 failed in 3m12s"),
    ("chat", "New message", "lunch at noon?"),
    ("monitor", "heartbeat", "all systems nominal heartbeat"),
    ("chat", "New message", "can you review this, @{user}?"),
    ("git", "Pull complete", "pull finished on main"),
];

fn config_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config/notify-triage")
}

fn feed_event(tick: u64, user_name: Option<&str>) -> Event {
    let (source, title, body) = FEED[(tick as usize) % FEED.len()];
    let body = body.replace("{user}", user_name.unwrap_or("nobody"));
    Event::new(source, title, body)
}

async fn feed_loop(settings: Settings) {
    let mut ledger = Ledger::new();
    ledger.set_user_name(settings.user_name.clone());
    ledger.set_rules(settings.rules.clone());

    ledger.on_important_count_changed(|n| info!("important: {n}"));
    ledger.on_digest_count_changed(|n| info!("digested: {n}"));
    ledger.on_focus_changed(|on| info!("focus mode: {on}"));
    ledger.on_away_changed(|on| info!("away mode: {on}"));

    let mut ticker = interval(Duration::from_millis(settings.feed_interval_ms));
    let mut tick: u64 = 0;

    loop {
        ticker.tick().await;

        // Flip focus periodically so the demo shows both rule lists; the
        // host installs the filtered list whenever focus turns on.
        if tick > 0 && tick % 12 == 0 {
            let focused = ledger.toggle_focus();
            if focused {
                ledger.set_rules(settings.focus_rules.clone());
            } else {
                ledger.set_rules(settings.rules.clone());
                for record in ledger.list_all_sorted_by_recency() {
                    info!(
                        "while you were busy: [{:?}] {} - {}",
                        record.action, record.event.source, record.event.title
                    );
                }
            }
        }

        let event = feed_event(tick, settings.user_name.as_deref());
        let action = ledger.classify(event.clone());
        info!("{} | {} -> {:?}", event.source, event.title, action);

        tick += 1;
    }
}

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let manager = ConfigManager::new(config_dir());
    let settings = manager.load();
    if let Err(err) = manager.save(&settings) {
        info!("could not persist settings: {err}");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("failed to build tokio runtime");
    runtime.block_on(feed_loop(settings));
}
