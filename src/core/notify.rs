//! Subscriber lists for state-change notifications and clock ticks.

use crate::models::TimerKey;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// State changes emitted by the tracker for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    TimerAdded {
        timer: TimerKey,
    },
    TimerStarted {
        timer: TimerKey,
        at: DateTime<Utc>,
    },
    TimerPaused {
        timer: TimerKey,
        elapsed: i64,
    },
    EntryAdded {
        timer: TimerKey,
        date: NaiveDate,
        value: i64,
        manually: bool,
    },
    TimerDeleted {
        timer: TimerKey,
        id: Option<i64>,
    },
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Notification::TimerAdded { .. } => "timer-added",
            Notification::TimerStarted { .. } => "timer-started",
            Notification::TimerPaused { .. } => "timer-paused",
            Notification::EntryAdded { .. } => "entry-added",
            Notification::TimerDeleted { .. } => "timer-deleted",
        }
    }

    pub fn timer(&self) -> TimerKey {
        match self {
            Notification::TimerAdded { timer }
            | Notification::TimerStarted { timer, .. }
            | Notification::TimerPaused { timer, .. }
            | Notification::EntryAdded { timer, .. }
            | Notification::TimerDeleted { timer, .. } => *timer,
        }
    }
}

type Callback<T> = Box<dyn FnMut(&T)>;

/// Ordered list of callbacks. Unsubscribing leaves no residue.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when the id was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        before != self.entries.len()
    }

    pub fn emit(&mut self, event: &T) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
