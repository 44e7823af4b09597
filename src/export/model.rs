// src/export/model.rs

use crate::core::clock::Clock;
use crate::models::Timer;
use crate::utils::date::machine_date;
use crate::utils::time::{format_timestamp, iso_duration};
use serde::Serialize;

/// Flat row for CSV export: one entry with its timer's columns.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryExport {
    pub timer_id: Option<i64>,
    pub description: String,
    pub created_on: String,
    pub entry_id: Option<i64>,
    pub date: String,
    pub logged_on: String,
    pub manually: bool,
    pub value: i64,
    pub duration: String,
}

/// Rows of `timer` whose local date passes `keep`.
pub(crate) fn entry_rows<C, F>(timer: &Timer, clock: &C, keep: F) -> Vec<EntryExport>
where
    C: Clock + ?Sized,
    F: Fn(chrono::NaiveDate) -> bool,
{
    timer
        .entries()
        .iter()
        .filter_map(|e| {
            let date = clock.date_of(e.logged_on);
            keep(date).then(|| EntryExport {
                timer_id: timer.id,
                description: timer.description.clone().unwrap_or_default(),
                created_on: format_timestamp(&timer.created_on()),
                entry_id: e.id,
                date: machine_date(&date),
                logged_on: format_timestamp(&e.logged_on),
                manually: e.manually,
                value: e.value,
                duration: iso_duration(e.value),
            })
        })
        .collect()
}
