//! Injectable time source and the periodic ticker built on it.
//!
//! Everything that needs "now" or "today" asks a [`Clock`]. The CLI uses
//! [`SystemClock`]; tests drive a [`ManualClock`] forward explicitly.

use super::notify::{Listeners, SubscriptionId};
use crate::errors::AppResult;
use crate::utils::time::parse_timestamp;
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Local calendar date of an instant.
    fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }

    fn today(&self) -> NaiveDate {
        self.date_of(self.now())
    }

    /// Local noon of `date`, as an instant.
    fn midday_of(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = midday(date);
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    }
}

fn midday(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::default()))
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock for tests. Clones share the same instant, so a test
/// can keep a handle and advance the clock owned by a tracker.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Rc<Cell<DateTime<Utc>>>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Clock at `start`, with local dates computed in UTC.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_offset(start, Utc.fix())
    }

    pub fn with_offset(start: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            current: Rc::new(Cell::new(start)),
            offset,
        }
    }

    pub fn at(iso: &str) -> AppResult<Self> {
        Ok(Self::new(parse_timestamp(iso)?))
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.current.set(instant);
    }

    pub fn set_iso(&self, iso: &str) -> AppResult<()> {
        self.set(parse_timestamp(iso)?);
        Ok(())
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.current.set(self.current.get() + by);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(chrono::Duration::seconds(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }

    fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn midday_of(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = midday(date);
        self.offset
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).date_of(instant)
    }

    fn midday_of(&self, date: NaiveDate) -> DateTime<Utc> {
        (**self).midday_of(date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Second,
    Minute,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub tick: Tick,
    pub now: DateTime<Utc>,
}

/// Emits second/minute/day ticks whenever a poll observes that boundary
/// being crossed. Ticks never touch ledger state; subscribers re-read.
#[derive(Default)]
pub struct Ticker {
    last: Option<(i64, i64, NaiveDate)>,
    listeners: Listeners<TickEvent>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TickEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Compare "now" with the previous poll and deliver the ticks that fired,
    /// in order second → minute → day. The first poll fires all three.
    pub fn poll<C: Clock + ?Sized>(&mut self, clock: &C) -> Vec<Tick> {
        let now = clock.now();
        let second = now.timestamp();
        let minute = second.div_euclid(60);
        let day = clock.date_of(now);

        let mut fired = Vec::new();
        match self.last {
            None => fired.extend([Tick::Second, Tick::Minute, Tick::Day]),
            Some((s, m, d)) => {
                if s != second {
                    fired.push(Tick::Second);
                }
                if m != minute {
                    fired.push(Tick::Minute);
                }
                if d != day {
                    fired.push(Tick::Day);
                }
            }
        }
        self.last = Some((second, minute, day));

        for tick in &fired {
            self.listeners.emit(&TickEvent { tick: *tick, now });
        }
        fired
    }

    /// Poll every `interval` until `keep_going` returns `false`.
    /// `keep_going` sees the ticks of each poll (possibly none).
    pub fn run<C, F>(&mut self, clock: &C, interval: Duration, mut keep_going: F)
    where
        C: Clock + ?Sized,
        F: FnMut(&[Tick]) -> bool,
    {
        loop {
            let fired = self.poll(clock);
            if !keep_going(&fired) {
                break;
            }
            std::thread::sleep(interval);
        }
    }
}
