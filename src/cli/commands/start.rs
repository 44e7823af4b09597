use crate::cli::commands::{audit, open_tracker, timer_ref, timer_title};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Start a new timer; the running one (if any) is paused first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { description } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let previous = tracker.running();

        let key = tracker.start_new(description.clone())?;

        if let Some(prev) = previous {
            info(format!("Paused timer {}.", timer_ref(&tracker, prev)));
        }

        let reference = timer_ref(&tracker, key);
        let title = tracker.timer(key).map(timer_title).unwrap_or_default();
        audit(&tracker, "start", &reference, &title);
        success(format!("Started timer {reference}: {title}"));
    }

    Ok(())
}
