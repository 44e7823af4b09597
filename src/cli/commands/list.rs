use crate::cli::commands::{CliTracker, open_tracker, timer_title};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{DaySummary, TimerSummary};
use crate::ui::messages::warning;
use crate::utils::colors::{RESET, color_for_logged};
use crate::utils::date::{human_date, period_bounds};
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_duration;
use chrono::Local;

const RULE_WIDTH: usize = 68;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, entries } = cmd {
        let range = match period.as_deref() {
            None => None,
            Some(p) if p.eq_ignore_ascii_case("all") => None,
            Some(p) => Some(period_bounds(p)?),
        };

        let tracker = open_tracker(cfg)?;
        let days = tracker.days(range);

        if days.is_empty() {
            warning("No timers found for the selected period.");
            return Ok(());
        }

        for day in &days {
            print_day(&tracker, day, *entries, cfg);
        }
    }

    Ok(())
}

fn print_day(tracker: &CliTracker, day: &DaySummary, with_entries: bool, cfg: &Config) {
    let human = human_date(&day.date);
    let heading = if day.label == human {
        human
    } else {
        format!("{} · {}", day.label, human)
    };
    let total = format_duration(day.total, cfg.show_seconds);

    println!(
        "{}  {}{}{}",
        bold(&heading),
        color_for_logged(day.total),
        total,
        RESET
    );
    println!("{}", cfg.separator_char.repeat(RULE_WIDTH));

    let mut table = Table::new(vec![
        Column::right("ID", 6),
        Column::left("TIMER", 40),
        Column::left("STATE", 8),
        Column::right("LOGGED", 10),
    ]);

    for summary in &day.timers {
        table.add_row(timer_row(tracker, summary, cfg));

        if with_entries {
            for entry in &summary.entries {
                let at = entry.logged_on.with_timezone(&Local).format("%H:%M");
                let kind = if entry.manually { "manual" } else { "logged" };
                table.add_row(vec![
                    String::new(),
                    format!("  {at} {kind}"),
                    String::new(),
                    format_duration(entry.value, true),
                ]);
            }
        }
    }

    print!("{}", table.render());
    println!();
}

fn timer_row(tracker: &CliTracker, summary: &TimerSummary, cfg: &Config) -> Vec<String> {
    let title = tracker
        .timer(summary.key)
        .map(timer_title)
        .unwrap_or_default();

    vec![
        summary
            .id
            .map(|id| format!("#{id}"))
            .unwrap_or_else(|| "-".to_string()),
        title,
        if summary.running { "running" } else { "paused" }.to_string(),
        format_duration(summary.logged, cfg.show_seconds),
    ]
}
