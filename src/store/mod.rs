//! Persistence port used by the tracker.
//!
//! The tracker applies every change in memory first and then calls the
//! store. A failed save leaves the in-memory state as it is; records that
//! did not get an id are saved again with the next change of their timer.

pub mod memory;

pub use memory::MemoryStore;

use crate::errors::AppResult;
use crate::models::{EntryRecord, TimerRecord};

pub trait TimerStore {
    /// Every stored timer with its entries.
    fn load(&mut self) -> AppResult<Vec<TimerRecord>>;

    /// Insert (when `id` is `None`) or update the timer's own fields and
    /// return its id. Nested `entries` are ignored: see [`save_entry`].
    ///
    /// [`save_entry`]: TimerStore::save_entry
    fn save_timer(&mut self, timer: &TimerRecord) -> AppResult<i64>;

    /// Append an entry to `timer_id` and return its new id. Entries are never
    /// updated, so a set `id` on `entry` is ignored.
    fn save_entry(&mut self, timer_id: i64, entry: &EntryRecord) -> AppResult<i64>;

    /// Delete the timer and all of its entries. Unknown ids are not an error.
    fn delete_timer(&mut self, timer_id: i64) -> AppResult<()>;
}

impl<S: TimerStore + ?Sized> TimerStore for Box<S> {
    fn load(&mut self) -> AppResult<Vec<TimerRecord>> {
        (**self).load()
    }

    fn save_timer(&mut self, timer: &TimerRecord) -> AppResult<i64> {
        (**self).save_timer(timer)
    }

    fn save_entry(&mut self, timer_id: i64, entry: &EntryRecord) -> AppResult<i64> {
        (**self).save_entry(timer_id, entry)
    }

    fn delete_timer(&mut self, timer_id: i64) -> AppResult<()> {
        (**self).delete_timer(timer_id)
    }
}
