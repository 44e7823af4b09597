// src/export/logic.rs

use crate::core::clock::Clock;
use crate::core::ledger::active_dates;
use crate::core::tracker::Tracker;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json, read_json};
use crate::export::model::{EntryExport, entry_rows};
use crate::models::{Timer, TimerKey, TimerRecord};
use crate::store::TimerStore;
use crate::ui::messages::warning;
use crate::utils::date::period_bounds;
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::path::Path;

/// High-level export/import logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the ledger.
    ///
    /// - `format`: csv (one row per entry) | json (timer records)
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or a period (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, `start:end`). JSON keeps whole timers with activity in
    ///   the range; CSV keeps the entries inside it.
    pub fn export<C: Clock, S: TimerStore>(
        tracker: &Tracker<C, S>,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(period_bounds(r)?),
        };
        let in_range = |d: NaiveDate| bounds.is_none_or(|(from, to)| d >= from && d <= to);

        ensure_writable(path, force)?;

        let count = match format {
            ExportFormat::Json => {
                let mut timers: Vec<&Timer> = tracker
                    .iter()
                    .map(|(_, t)| t)
                    .filter(|t| {
                        bounds.is_none()
                            || active_dates(t, tracker.clock()).into_iter().any(in_range)
                    })
                    .collect();
                timers.sort_by_key(|t| Reverse(t.last_activity()));
                let records: Vec<TimerRecord> = timers.into_iter().map(Timer::to_record).collect();

                if records.is_empty() {
                    warning("No timers found for selected range.");
                    return Ok(0);
                }
                export_json(&records, path)?;
                records.len()
            }
            ExportFormat::Csv => {
                let mut rows: Vec<EntryExport> = tracker
                    .iter()
                    .flat_map(|(_, t)| entry_rows(t, tracker.clock(), in_range))
                    .collect();
                rows.sort_by(|a, b| a.logged_on.cmp(&b.logged_on));

                if rows.is_empty() {
                    warning("No entries found for selected range.");
                    return Ok(0);
                }
                export_csv(&rows, path)?;
                rows.len()
            }
        };

        Ok(count)
    }

    /// Import a JSON export as new timers.
    pub fn import<C: Clock, S: TimerStore>(
        tracker: &mut Tracker<C, S>,
        file: &str,
    ) -> AppResult<Vec<TimerKey>> {
        let records = read_json(Path::new(file))?;
        if records.is_empty() {
            warning("No timers found in file.");
            return Ok(Vec::new());
        }
        tracker.import(&records)
    }
}
