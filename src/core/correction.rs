//! "Enter a total, derive the delta entry."

use super::clock::Clock;
use super::ledger::{logged_on_date, logged_total};
use crate::models::Timer;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Record a manual entry of `delta` seconds at `logged_on`.
    Delta {
        delta: i64,
        logged_on: DateTime<Utc>,
    },
    /// The date holds the whole history and the desired total is zero:
    /// drop the timer instead of zeroing it.
    DeleteTimer,
}

/// Decide what bringing `date`'s total to `desired` takes. Any integer is
/// accepted; a negative delta (or total) is not an error. A delta beyond the
/// `i64` range is clamped.
pub fn plan<C: Clock + ?Sized>(
    timer: &Timer,
    desired: i64,
    date: NaiveDate,
    clock: &C,
) -> Correction {
    let current = logged_on_date(timer, date, clock);

    if desired == 0 && logged_total(timer, clock) == current {
        return Correction::DeleteTimer;
    }

    let now = clock.now();
    let logged_on = if clock.date_of(now) == date {
        now
    } else {
        clock.midday_of(date)
    };

    Correction::Delta {
        delta: desired.saturating_sub(current),
        logged_on,
    }
}
