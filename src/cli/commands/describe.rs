use crate::cli::commands::{audit, open_tracker, timer_ref};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Describe { id, text } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let key = tracker.resolve(*id)?;

        tracker.describe(key, text)?;

        let reference = timer_ref(&tracker, key);
        let text = text.trim();
        if text.is_empty() {
            audit(&tracker, "describe", &reference, "description cleared");
            success(format!("Description of timer {reference} cleared."));
        } else {
            audit(&tracker, "describe", &reference, text);
            success(format!("Timer {reference} described as \"{text}\"."));
        }
    }

    Ok(())
}
