use super::entry::Entry;
use super::timer::TimerKey;
use chrono::{DateTime, NaiveDate, Utc};

/// One calendar bucket, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub label: String,
    pub total: i64,
    pub timers: Vec<TimerSummary>,
}

/// A timer as seen from one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSummary {
    pub key: TimerKey,
    pub id: Option<i64>,
    pub title: Option<String>,
    pub created_on: DateTime<Utc>,
    pub running: bool,
    pub logged: i64,
    // entries logged on this date, most recent first
    pub entries: Vec<Entry>,
}
