use crate::cli::commands::{audit, open_tracker, timer_ref};
use crate::config::Config;
use crate::core::state::Transition;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::format_duration;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;

    match tracker.pause_running()? {
        Some((key, Transition::Paused { elapsed, .. })) => {
            let reference = timer_ref(&tracker, key);
            let logged = format_duration(elapsed, true);
            audit(&tracker, "pause", &reference, &format!("paused after {logged}"));
            success(format!("Timer {reference} paused, logged {logged}."));
        }
        Some((_, Transition::Started { .. })) | None => info("No timer is running."),
    }

    Ok(())
}
