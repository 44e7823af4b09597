pub mod config;
pub mod db;
pub mod describe;
pub mod enter;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod pause;
pub mod start;
pub mod status;
pub mod toggle;
pub mod watch;

use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::tracker::Tracker;
use crate::db::SqliteStore;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::models::{Timer, TimerKey};
use crate::utils::formatting::untitled_label;
use tracing::warn;

pub(crate) type CliTracker = Tracker<SystemClock, SqliteStore>;

/// Open the configured database and rebuild the ledger from it.
pub(crate) fn open_tracker(cfg: &Config) -> AppResult<CliTracker> {
    let store = SqliteStore::open(&cfg.database)?;
    Tracker::load(SystemClock, store)
}

/// Audit trail row. A failing audit write never fails the command.
pub(crate) fn audit(tracker: &CliTracker, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(tracker.store().conn(), operation, target, message) {
        warn!(operation, error = %e, "audit log write failed");
    }
}

/// `#id`, or the in-memory key for a timer that could not be saved.
pub(crate) fn timer_ref(tracker: &CliTracker, key: TimerKey) -> String {
    match tracker.timer(key).and_then(|t| t.id) {
        Some(id) => format!("#{id}"),
        None => format!("{key} (unsaved)"),
    }
}

/// Description, or the default label derived from the creation time.
pub(crate) fn timer_title(timer: &Timer) -> String {
    match timer.title() {
        Some(t) => t.to_string(),
        None => untitled_label(&timer.created_on().with_timezone(&chrono::Local)),
    }
}
