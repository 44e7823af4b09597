//! The timer collection: owns every timer, enforces the single running
//! timer, keeps the calendar index current and saves through the store.
//!
//! All mutations take `&mut self`, so they can never interleave. A host that
//! shares the tracker across threads wraps it in one mutex.

use super::calendar::{CalendarIndex, date_label};
use super::clock::Clock;
use super::correction::{self, Correction};
use super::ledger::{active_dates, logged_on_date, logged_total, saturating_sum};
use super::notify::{Listeners, Notification, SubscriptionId};
use super::state::{self, Transition};
use crate::errors::{AppError, AppResult};
use crate::models::{DaySummary, Entry, Timer, TimerKey, TimerRecord, TimerSummary};
use crate::store::TimerStore;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub struct Tracker<C: Clock, S: TimerStore> {
    clock: C,
    store: S,
    timers: BTreeMap<TimerKey, Timer>,
    next_key: u64,
    calendar: CalendarIndex,
    listeners: Listeners<Notification>,
}

fn recency(timers: &BTreeMap<TimerKey, Timer>, key: TimerKey) -> DateTime<Utc> {
    timers
        .get(&key)
        .map(Timer::last_activity)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn save<S: TimerStore>(store: &mut S, timer: &mut Timer) -> AppResult<()> {
    let id = store.save_timer(&timer.to_record())?;
    timer.id = Some(id);

    for entry in timer.unsaved_entries_mut() {
        entry.id = Some(store.save_entry(id, &entry.to_record())?);
    }

    Ok(())
}

impl<C: Clock, S: TimerStore> Tracker<C, S> {
    /// Empty tracker; nothing is read from the store.
    pub fn new(clock: C, store: S) -> Self {
        Self {
            clock,
            store,
            timers: BTreeMap::new(),
            next_key: 1,
            calendar: CalendarIndex::new(),
            listeners: Listeners::new(),
        }
    }

    /// Rebuild the ledger from the store.
    ///
    /// If the stored data has several running timers, the one started last
    /// keeps running and the others are paused now.
    pub fn load(clock: C, mut store: S) -> AppResult<Self> {
        let records = store.load()?;
        let mut tracker = Self::new(clock, store);

        for record in &records {
            let timer = Timer::from_record(record)?;
            let key = tracker.insert(timer);
            tracker.index(key);
        }

        let paused = tracker.enforce_single_running();
        if !paused.is_empty() {
            warn!(count = paused.len(), "several running timers loaded; paused all but the latest");
            if let Err(e) = tracker.persist_each(&paused) {
                warn!(error = %e, "could not save timers paused while loading");
            }
        }

        tracker.roll_over();
        debug!(timers = tracker.timers.len(), days = tracker.calendar.len(), "ledger loaded");
        Ok(tracker)
    }

    // ---------------------------
    // Accessors
    // ---------------------------

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn calendar(&self) -> &CalendarIndex {
        &self.calendar
    }

    pub fn timer(&self, key: TimerKey) -> Option<&Timer> {
        self.timers.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimerKey, &Timer)> + '_ {
        self.timers.iter().map(|(k, t)| (*k, t))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Key of the timer saved under `id`.
    pub fn key_of(&self, id: i64) -> Option<TimerKey> {
        self.timers
            .iter()
            .find(|(_, t)| t.id == Some(id))
            .map(|(k, _)| *k)
    }

    pub fn resolve(&self, id: i64) -> AppResult<TimerKey> {
        self.key_of(id)
            .ok_or_else(|| AppError::TimerNotFound(id.to_string()))
    }

    /// The running timer, if any.
    pub fn running(&self) -> Option<TimerKey> {
        self.timers
            .iter()
            .find(|(_, t)| t.is_running())
            .map(|(k, _)| *k)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ---------------------------
    // Mutations
    // ---------------------------

    /// Create a timer that starts running immediately, pausing the one that
    /// was running before.
    pub fn start_new(&mut self, description: Option<String>) -> AppResult<TimerKey> {
        let now = self.clock.now();
        let mut timer = Timer::new(now);
        timer.description = description.filter(|d| !d.trim().is_empty());

        let key = self.insert(timer);
        self.touch(self.clock.date_of(now), key);
        debug!(timer = %key, "timer added");
        self.listeners.emit(&Notification::TimerAdded { timer: key });

        let mut changed = self.switch_to(key);
        changed.push(key);
        self.persist_each(&changed)?;
        Ok(key)
    }

    /// Paused → Running (through [`set_running`](Self::set_running)) or
    /// Running → Paused with a new entry.
    pub fn toggle(&mut self, key: TimerKey) -> AppResult<Transition> {
        let timer = self.require(key)?;

        if timer.is_running() {
            let transition = self.pause_inner(key);
            self.persist(key)?;
            return transition.ok_or_else(|| AppError::TimerNotFound(key.to_string()));
        }

        self.set_running(key)?;
        let at = self
            .timers
            .get(&key)
            .and_then(Timer::started_on)
            .unwrap_or_else(|| self.clock.now());
        Ok(Transition::Started { at })
    }

    /// Make `key` the only running timer. The previous holder is paused
    /// first; starting an already running timer changes nothing.
    pub fn set_running(&mut self, key: TimerKey) -> AppResult<()> {
        let timer = self.require(key)?;
        if timer.is_running() {
            return Ok(());
        }

        let mut changed = self.switch_to(key);
        changed.push(key);
        self.persist_each(&changed)
    }

    /// Pause whichever timer is running.
    pub fn pause_running(&mut self) -> AppResult<Option<(TimerKey, Transition)>> {
        let Some(key) = self.running() else {
            return Ok(None);
        };
        let transition = self.pause_inner(key);
        self.persist(key)?;
        Ok(transition.map(|t| (key, t)))
    }

    /// Set (or with blank text, clear) the description.
    pub fn describe(&mut self, key: TimerKey, text: &str) -> AppResult<()> {
        let timer = self
            .timers
            .get_mut(&key)
            .ok_or_else(|| AppError::TimerNotFound(key.to_string()))?;

        let text = text.trim();
        timer.description = (!text.is_empty()).then(|| text.to_string());
        self.persist(key)
    }

    /// Bring `date`'s total (today when `None`) to `desired` seconds.
    ///
    /// Records one manual delta entry, or deletes the timer when the desired
    /// total is zero and `date` holds the timer's entire history.
    pub fn enter(
        &mut self,
        key: TimerKey,
        desired: i64,
        date: Option<NaiveDate>,
    ) -> AppResult<Correction> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let timer = self.require(key)?;
        let plan = correction::plan(timer, desired, date, &self.clock);

        match plan {
            Correction::DeleteTimer => {
                debug!(timer = %key, %date, "correction to zero deletes the timer");
                self.remove(key)?;
            }
            Correction::Delta { delta, logged_on } => {
                if let Some(timer) = self.timers.get_mut(&key) {
                    timer.push_entry(Entry::correction(logged_on, delta));
                }
                let entry_date = self.clock.date_of(logged_on);
                self.touch(entry_date, key);
                debug!(timer = %key, %date, delta, "correction recorded");
                self.listeners.emit(&Notification::EntryAdded {
                    timer: key,
                    date: entry_date,
                    value: delta,
                    manually: true,
                });
                self.persist(key)?;
            }
        }

        Ok(plan)
    }

    /// Put the running timer into today's bucket. Meant for day ticks: a
    /// timer running across midnight has activity on the new day too.
    /// Returns `true` when the index changed.
    pub fn roll_over(&mut self) -> bool {
        let Some(key) = self.running() else {
            return false;
        };
        let today = self.clock.today();
        if self.calendar.contains(today, key) {
            return false;
        }
        self.touch(today, key)
    }

    /// Add records as new timers (ids are not reused). Running records keep
    /// running only if they started after every other running timer.
    pub fn import(&mut self, records: &[TimerRecord]) -> AppResult<Vec<TimerKey>> {
        // Parse everything first so a bad record imports nothing.
        let timers = records
            .iter()
            .map(|r| Timer::from_record(&r.detached()))
            .collect::<AppResult<Vec<_>>>()?;

        let mut keys = Vec::with_capacity(timers.len());
        for timer in timers {
            let key = self.insert(timer);
            self.index(key);
            self.listeners.emit(&Notification::TimerAdded { timer: key });
            keys.push(key);
        }

        let mut changed = self.enforce_single_running();
        changed.extend(keys.iter().copied());
        changed.sort();
        changed.dedup();
        self.roll_over();
        self.persist_each(&changed)?;
        Ok(keys)
    }

    // ---------------------------
    // Queries
    // ---------------------------

    pub fn logged_on_date(&self, key: TimerKey, date: NaiveDate) -> AppResult<i64> {
        Ok(logged_on_date(self.require(key)?, date, &self.clock))
    }

    pub fn logged_total(&self, key: TimerKey) -> AppResult<i64> {
        Ok(logged_total(self.require(key)?, &self.clock))
    }

    /// Sum over the timers of `date`'s bucket.
    pub fn total_on_date(&self, date: NaiveDate) -> i64 {
        saturating_sum(
            self.calendar
                .timers_on(date)
                .iter()
                .filter_map(|k| self.timers.get(k))
                .map(|t| logged_on_date(t, date, &self.clock)),
        )
    }

    /// Buckets (most recent first), optionally limited to an inclusive range.
    pub fn days(&self, range: Option<(NaiveDate, NaiveDate)>) -> Vec<DaySummary> {
        let today = self.clock.today();

        self.calendar
            .iter()
            .filter(|(date, _)| range.is_none_or(|(from, to)| *date >= from && *date <= to))
            .map(|(date, keys)| {
                let timers: Vec<TimerSummary> = keys
                    .iter()
                    .filter_map(|k| self.timers.get(k).map(|t| (*k, t)))
                    .map(|(key, t)| TimerSummary {
                        key,
                        id: t.id,
                        title: t.title().map(str::to_string),
                        created_on: t.created_on(),
                        running: t.is_running(),
                        logged: logged_on_date(t, date, &self.clock),
                        entries: t
                            .entries()
                            .iter()
                            .filter(|e| self.clock.date_of(e.logged_on) == date)
                            .cloned()
                            .collect(),
                    })
                    .collect();

                DaySummary {
                    date,
                    label: date_label(today, date),
                    total: saturating_sum(timers.iter().map(|t| t.logged)),
                    timers,
                }
            })
            .collect()
    }

    /// Every timer as a record, most recent activity first.
    pub fn to_records(&self) -> Vec<TimerRecord> {
        let mut timers: Vec<&Timer> = self.timers.values().collect();
        timers.sort_by_key(|t| std::cmp::Reverse(t.last_activity()));
        timers.into_iter().map(Timer::to_record).collect()
    }

    // ---------------------------
    // Internals
    // ---------------------------

    fn require(&self, key: TimerKey) -> AppResult<&Timer> {
        self.timers
            .get(&key)
            .ok_or_else(|| AppError::TimerNotFound(key.to_string()))
    }

    fn insert(&mut self, timer: Timer) -> TimerKey {
        let key = TimerKey(self.next_key);
        self.next_key += 1;
        self.timers.insert(key, timer);
        key
    }

    fn touch(&mut self, date: NaiveDate, key: TimerKey) -> bool {
        let timers = &self.timers;
        self.calendar.touch(date, key, |k| recency(timers, k))
    }

    /// Index a timer under every date it has activity on (its creation date
    /// when it has none).
    fn index(&mut self, key: TimerKey) {
        let Some(timer) = self.timers.get(&key) else {
            return;
        };

        let mut dates = active_dates(timer, &self.clock);
        if dates.is_empty() {
            dates.push(self.clock.date_of(timer.created_on()));
        }

        for date in dates {
            self.touch(date, key);
        }
    }

    /// Pause every other running timer, then start `key`. Returns the keys
    /// that were paused. Nothing is saved here.
    fn switch_to(&mut self, key: TimerKey) -> Vec<TimerKey> {
        let others: Vec<TimerKey> = self
            .timers
            .iter()
            .filter(|(k, t)| **k != key && t.is_running())
            .map(|(k, _)| *k)
            .collect();

        for other in &others {
            self.pause_inner(*other);
        }

        self.start_inner(key);
        others
    }

    /// Keep only the most recently started timer running.
    fn enforce_single_running(&mut self) -> Vec<TimerKey> {
        let mut running: Vec<(DateTime<Utc>, TimerKey)> = self
            .timers
            .iter()
            .filter_map(|(k, t)| t.started_on().map(|s| (s, *k)))
            .collect();

        if running.len() < 2 {
            return Vec::new();
        }

        running.sort_by(|a, b| b.cmp(a));
        let paused: Vec<TimerKey> = running.iter().skip(1).map(|(_, k)| *k).collect();
        for key in &paused {
            self.pause_inner(*key);
        }
        paused
    }

    fn start_inner(&mut self, key: TimerKey) {
        let now = self.clock.now();
        let Some(timer) = self.timers.get_mut(&key) else {
            return;
        };
        if !state::start(timer, now) {
            return;
        }

        self.touch(self.clock.date_of(now), key);
        debug!(timer = %key, "timer started");
        self.listeners.emit(&Notification::TimerStarted { timer: key, at: now });
    }

    fn pause_inner(&mut self, key: TimerKey) -> Option<Transition> {
        let now = self.clock.now();
        let timer = self.timers.get_mut(&key)?;
        let transition = state::pause(timer, now)?;

        if let Transition::Paused { elapsed, logged_on } = transition {
            let date = self.clock.date_of(logged_on);
            self.touch(date, key);
            debug!(timer = %key, elapsed, "timer paused");
            self.listeners.emit(&Notification::EntryAdded {
                timer: key,
                date,
                value: elapsed,
                manually: false,
            });
            self.listeners.emit(&Notification::TimerPaused {
                timer: key,
                elapsed,
            });
        }

        Some(transition)
    }

    fn remove(&mut self, key: TimerKey) -> AppResult<Timer> {
        let timer = self
            .timers
            .remove(&key)
            .ok_or_else(|| AppError::TimerNotFound(key.to_string()))?;

        self.calendar.remove(key);
        debug!(timer = %key, "timer deleted");
        self.listeners.emit(&Notification::TimerDeleted {
            timer: key,
            id: timer.id,
        });

        if let Some(id) = timer.id
            && let Err(e) = self.store.delete_timer(id)
        {
            warn!(timer = %key, error = %e, "delete failed; timer already gone from memory");
            return Err(e);
        }

        Ok(timer)
    }

    fn persist(&mut self, key: TimerKey) -> AppResult<()> {
        let Some(timer) = self.timers.get_mut(&key) else {
            return Ok(());
        };

        let result = save(&mut self.store, timer);
        if let Err(e) = &result {
            warn!(timer = %key, error = %e, "save failed; in-memory state kept");
        }
        result
    }

    /// Save every key, reporting the first failure.
    fn persist_each(&mut self, keys: &[TimerKey]) -> AppResult<()> {
        let mut first_err = None;
        for key in keys {
            if let Err(e) = self.persist(*key)
                && first_err.is_none()
            {
                first_err = Some(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
