use crate::cli::commands::{open_tracker, timer_ref, timer_title};
use crate::config::Config;
use crate::core::clock::Clock;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_logged, colorize_state};
use crate::utils::time::format_duration;
use chrono::Local;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let tracker = open_tracker(cfg)?;
    let today = tracker.clock().today();

    match tracker.running() {
        Some(key) => {
            let timer = tracker.timer(key);
            let title = timer.map(timer_title).unwrap_or_default();
            let since = timer
                .and_then(|t| t.started_on())
                .map(|s| s.with_timezone(&Local).format("%H:%M").to_string())
                .unwrap_or_default();
            let logged = tracker.logged_on_date(key, today)?;

            println!(
                "{} {} {title} (since {since}, {} today)",
                colorize_state("▶", true),
                timer_ref(&tracker, key),
                format_duration(logged, true)
            );
        }
        None => info("No timer is running."),
    }

    let total = tracker.total_on_date(today);
    println!(
        "Today: {}{}{}",
        color_for_logged(total),
        format_duration(total, cfg.show_seconds),
        RESET
    );

    Ok(())
}
