use crate::cli::commands::{audit, open_tracker, timer_ref};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::correction::Correction;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{machine_date, parse_date};
use crate::utils::time::{format_duration, parse_duration};
use chrono::NaiveDate;

/// Quick correction: set the day's total and let the ledger work out the
/// delta entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Enter { id, duration, date } = cmd {
        let desired = parse_duration(duration)?;
        let date: Option<NaiveDate> = date
            .as_deref()
            .map(|d| parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string())))
            .transpose()?;

        let mut tracker = open_tracker(cfg)?;
        let key = tracker.resolve(*id)?;
        let reference = timer_ref(&tracker, key);
        let day = date.unwrap_or_else(|| tracker.clock().today());

        match tracker.enter(key, desired, Some(day))? {
            Correction::DeleteTimer => {
                audit(&tracker, "delete", &reference, "total set to zero");
                success(format!("Timer {reference} deleted."));
            }
            Correction::Delta { delta, .. } => {
                let total = format_duration(desired, cfg.show_seconds);
                let delta_str = format_duration(delta, true);
                let sign = if delta >= 0 { "+" } else { "" };
                audit(
                    &tracker,
                    "enter",
                    &reference,
                    &format!("{} set to {total} ({sign}{delta_str})", machine_date(&day)),
                );
                success(format!(
                    "Timer {reference} logs {total} on {day} ({sign}{delta_str})."
                ));
            }
        }
    }

    Ok(())
}
