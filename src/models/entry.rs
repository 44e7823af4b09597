use super::record::EntryRecord;
use crate::errors::AppResult;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::{DateTime, Utc};

/// A signed duration attributed to one calendar date.
///
/// Entries are never edited after creation; a correction is always a new
/// entry carrying the delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: Option<i64>,          // ⇔ entries.id, None until saved
    pub logged_on: DateTime<Utc>, // ⇔ entries.logged_on (TEXT, ISO8601)
    pub manually: bool,           // ⇔ entries.manually (0/1)
    pub value: i64,               // ⇔ entries.value (seconds, signed)
}

impl Entry {
    /// Entry produced by pausing a running timer.
    pub fn logged(logged_on: DateTime<Utc>, value: i64) -> Self {
        Self {
            id: None,
            logged_on,
            manually: false,
            value,
        }
    }

    /// Entry produced by a correction.
    pub fn correction(logged_on: DateTime<Utc>, value: i64) -> Self {
        Self {
            id: None,
            logged_on,
            manually: true,
            value,
        }
    }

    pub fn from_record(r: &EntryRecord) -> AppResult<Self> {
        Ok(Self {
            id: r.id,
            logged_on: parse_timestamp(&r.logged_on)?,
            manually: r.manually,
            value: r.value,
        })
    }

    pub fn to_record(&self) -> EntryRecord {
        EntryRecord {
            id: self.id,
            logged_on: format_timestamp(&self.logged_on),
            manually: self.manually,
            value: self.value,
        }
    }
}
