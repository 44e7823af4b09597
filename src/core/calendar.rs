//! Date → timers index, kept in step with the tracker.
//!
//! Membership is historical: once a timer showed activity on a date it stays
//! in that bucket until the timer itself is deleted.

use crate::models::TimerKey;
use crate::utils::date::{human_date, weekday_name};
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct CalendarIndex {
    // Reverse keys iterate most recent date first.
    buckets: BTreeMap<Reverse<NaiveDate>, Vec<TimerKey>>,
}

impl CalendarIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` to `date`'s bucket (creating it if needed) and re-sort every
    /// bucket holding `key`, since its recency may have changed.
    /// Returns `true` when `key` was not yet in the bucket.
    pub fn touch<F>(&mut self, date: NaiveDate, key: TimerKey, recency: F) -> bool
    where
        F: Fn(TimerKey) -> DateTime<Utc>,
    {
        let bucket = self.buckets.entry(Reverse(date)).or_default();
        let added = !bucket.contains(&key);
        if added {
            bucket.push(key);
        }

        for bucket in self.buckets.values_mut() {
            if bucket.contains(&key) {
                // stable: ties keep their insertion order
                bucket.sort_by_key(|k| Reverse(recency(*k)));
            }
        }

        added
    }

    /// Remove `key` everywhere; empty buckets disappear.
    pub fn remove(&mut self, key: TimerKey) {
        for bucket in self.buckets.values_mut() {
            bucket.retain(|k| *k != key);
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }

    pub fn contains(&self, date: NaiveDate, key: TimerKey) -> bool {
        self.buckets
            .get(&Reverse(date))
            .is_some_and(|bucket| bucket.contains(&key))
    }

    /// Timers of `date`, most recent activity first.
    pub fn timers_on(&self, date: NaiveDate) -> &[TimerKey] {
        self.buckets
            .get(&Reverse(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Dates, most recent first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().map(|Reverse(d)| *d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[TimerKey])> + '_ {
        self.buckets
            .iter()
            .map(|(Reverse(d), bucket)| (*d, bucket.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Header label of a date bucket, relative to `today`.
pub fn date_label(today: NaiveDate, date: NaiveDate) -> String {
    let days_ago = (today - date).num_days();

    match days_ago {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => weekday_name(&date).to_string(),
        _ => human_date(&date),
    }
}
