use super::entry::Entry;
use super::record::TimerRecord;
use crate::errors::AppResult;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::{DateTime, Utc};
use std::fmt;

/// In-process handle of a timer inside a [`Tracker`](crate::core::tracker::Tracker).
///
/// Assigned when the timer enters the collection (created or loaded) and
/// never reused. The persisted `id` is what crosses the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerKey(pub(crate) u64);

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A trackable activity: running/paused state plus its owned entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub id: Option<i64>,
    pub description: Option<String>,
    created_on: DateTime<Utc>,
    started_on: Option<DateTime<Utc>>,
    // most recent first
    entries: Vec<Entry>,
}

impl Timer {
    /// A paused timer without entries. The tracker starts it right away.
    pub fn new(created_on: DateTime<Utc>) -> Self {
        Self {
            id: None,
            description: None,
            created_on,
            started_on: None,
            entries: Vec::new(),
        }
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn started_on(&self) -> Option<DateTime<Utc>> {
        self.started_on
    }

    pub fn is_running(&self) -> bool {
        self.started_on.is_some()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn latest_entry(&self) -> Option<&Entry> {
        self.entries.first()
    }

    /// Most recent activity: the running start, the newest entry or the
    /// creation instant, whichever is later.
    pub fn last_activity(&self) -> DateTime<Utc> {
        let mut latest = self.created_on;
        if let Some(started) = self.started_on {
            latest = latest.max(started);
        }
        if let Some(entry) = self.latest_entry() {
            latest = latest.max(entry.logged_on);
        }
        latest
    }

    /// Human label: the description, or `None` when unset or blank.
    pub fn title(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub(crate) fn set_started_on(&mut self, started_on: Option<DateTime<Utc>>) {
        self.started_on = started_on;
    }

    /// Insert keeping `logged_on` descending; among equal instants the newest
    /// insert comes first. Returns the index of the inserted entry.
    pub(crate) fn push_entry(&mut self, entry: Entry) -> usize {
        let idx = self
            .entries
            .partition_point(|e| e.logged_on > entry.logged_on);
        self.entries.insert(idx, entry);
        idx
    }

    pub(crate) fn unsaved_entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.iter_mut().filter(|e| e.id.is_none())
    }

    pub fn from_record(r: &TimerRecord) -> AppResult<Self> {
        let mut timer = Self {
            id: r.id,
            description: r.description.clone(),
            created_on: parse_timestamp(&r.created_on)?,
            started_on: match &r.started_on {
                Some(s) => Some(parse_timestamp(s)?),
                None => None,
            },
            entries: Vec::with_capacity(r.entries.len()),
        };

        // Stored order is not trusted; rebuild the descending order here.
        for er in r.entries.iter().rev() {
            timer.push_entry(Entry::from_record(er)?);
        }

        Ok(timer)
    }

    pub fn to_record(&self) -> TimerRecord {
        TimerRecord {
            id: self.id,
            created_on: format_timestamp(&self.created_on),
            started_on: self.started_on.as_ref().map(format_timestamp),
            description: self.description.clone(),
            entries: self.entries.iter().map(Entry::to_record).collect(),
        }
    }
}
