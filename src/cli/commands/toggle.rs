use crate::cli::commands::{audit, open_tracker, timer_ref};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::state::Transition;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Toggle { id } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let key = tracker.resolve(*id)?;
        let previous = tracker.running().filter(|k| *k != key);

        let transition = tracker.toggle(key)?;
        let reference = timer_ref(&tracker, key);

        match transition {
            Transition::Started { .. } => {
                if let Some(prev) = previous {
                    info(format!("Paused timer {}.", timer_ref(&tracker, prev)));
                }
                audit(&tracker, "toggle", &reference, "resumed");
                success(format!("Timer {reference} is running."));
            }
            Transition::Paused { elapsed, .. } => {
                let logged = format_duration(elapsed, true);
                audit(&tracker, "toggle", &reference, &format!("paused after {logged}"));
                success(format!("Timer {reference} paused, logged {logged}."));
            }
        }
    }

    Ok(())
}
