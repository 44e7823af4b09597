//! Running/paused transitions of a single timer.
//!
//! Exclusivity across timers is not handled here: the owning
//! [`Tracker`](super::tracker::Tracker) pauses the previous holder before
//! starting another timer.

use super::ledger::elapsed_seconds;
use crate::models::{Entry, Timer};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running { since: DateTime<Utc> },
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started { at: DateTime<Utc> },
    Paused { elapsed: i64, logged_on: DateTime<Utc> },
}

pub fn state_of(timer: &Timer) -> TimerState {
    match timer.started_on() {
        Some(since) => TimerState::Running { since },
        None => TimerState::Paused,
    }
}

/// Paused → Running, or Running → Paused with a new entry.
pub fn toggle(timer: &mut Timer, now: DateTime<Utc>) -> Transition {
    match pause(timer, now) {
        Some(t) => t,
        None => {
            start(timer, now);
            Transition::Started { at: now }
        }
    }
}

/// Returns `false` if the timer was already running.
pub(crate) fn start(timer: &mut Timer, now: DateTime<Utc>) -> bool {
    if timer.is_running() {
        return false;
    }
    timer.set_started_on(Some(now));
    true
}

/// Close the running interval into an entry logged at `now`.
/// Returns `None` if the timer was not running.
pub(crate) fn pause(timer: &mut Timer, now: DateTime<Utc>) -> Option<Transition> {
    let started = timer.started_on()?;
    let elapsed = elapsed_seconds(started, now);

    timer.push_entry(Entry::logged(now, elapsed));
    timer.set_started_on(None);

    Some(Transition::Paused {
        elapsed,
        logged_on: now,
    })
}
