use crate::cli::commands::{CliTracker, open_tracker, timer_ref, timer_title};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock, Tick, Ticker};
use crate::errors::AppResult;
use crate::utils::time::format_duration;
use std::io::{self, Write};
use std::time::Duration;

/// Redraw one status line on every second (or minute) tick. A day tick moves
/// the running timer into the new day's bucket.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { once } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let mut ticker = Ticker::new();
        let interval = Duration::from_millis(cfg.tick_interval_ms.max(10));
        let redraw_on = if cfg.show_seconds {
            Tick::Second
        } else {
            Tick::Minute
        };

        ticker.run(&SystemClock, interval, |ticks| {
            if ticks.contains(&Tick::Day) {
                tracker.roll_over();
            }
            if ticks.contains(&redraw_on) || ticks.contains(&Tick::Day) {
                print!("\r\x1b[2K{}", status_line(&tracker, cfg.show_seconds));
                io::stdout().flush().ok();
            }
            !*once
        });
        println!();
    }

    Ok(())
}

fn status_line(tracker: &CliTracker, show_seconds: bool) -> String {
    let today = tracker.clock().today();
    let total = format_duration(tracker.total_on_date(today), show_seconds);

    match tracker.running() {
        Some(key) => {
            let title = tracker.timer(key).map(timer_title).unwrap_or_default();
            let logged = tracker.logged_on_date(key, today).unwrap_or_default();
            format!(
                "▶ {} {title}  {}  | today {total}",
                timer_ref(tracker, key),
                format_duration(logged, show_seconds)
            )
        }
        None => format!("⏸ no timer running  | today {total}"),
    }
}
