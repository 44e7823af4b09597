//! Logged-time aggregation over a timer's entries.

use super::clock::Clock;
use crate::models::Timer;
use chrono::{DateTime, NaiveDate, Utc};

/// Whole seconds between `since` and `now`, rounded up.
pub fn elapsed_seconds(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = now - since;
    match delta.num_microseconds() {
        Some(us) => (us + 999_999).div_euclid(1_000_000),
        None => delta.num_seconds(),
    }
}

/// Sum of signed seconds, clamped to the `i64` range.
pub fn saturating_sum<I: IntoIterator<Item = i64>>(values: I) -> i64 {
    let total: i128 = values.into_iter().map(i128::from).sum();
    total.clamp(i64::MIN.into(), i64::MAX.into()) as i64
}

/// Seconds logged on `date`: the entries whose local date is `date`, plus
/// the running interval when `date` is today.
pub fn logged_on_date<C: Clock + ?Sized>(timer: &Timer, date: NaiveDate, clock: &C) -> i64 {
    let mut logged = saturating_sum(
        timer
            .entries()
            .iter()
            .filter(|e| clock.date_of(e.logged_on) == date)
            .map(|e| e.value),
    );

    if let Some(started) = timer.started_on() {
        let now = clock.now();
        if clock.date_of(now) == date {
            logged = logged.saturating_add(elapsed_seconds(started, now));
        }
    }

    logged
}

/// Lifetime total: every entry plus the running interval.
pub fn logged_total<C: Clock + ?Sized>(timer: &Timer, clock: &C) -> i64 {
    let mut logged = saturating_sum(timer.entries().iter().map(|e| e.value));

    if let Some(started) = timer.started_on() {
        logged = logged.saturating_add(elapsed_seconds(started, clock.now()));
    }

    logged
}

/// Dates (deduplicated, most recent first) on which the timer has activity.
pub fn active_dates<C: Clock + ?Sized>(timer: &Timer, clock: &C) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = timer
        .entries()
        .iter()
        .map(|e| clock.date_of(e.logged_on))
        .chain(timer.started_on().map(|s| clock.date_of(s)))
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();
    dates
}
