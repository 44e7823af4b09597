use super::TimerStore;
use crate::errors::{AppError, AppResult};
use crate::models::{EntryRecord, TimerRecord};

/// Vector-backed store. Can be told to fail upcoming saves, which is how the
/// optimistic-update behavior of the tracker is exercised.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    timers: Vec<TimerRecord>,
    next_timer_id: i64,
    next_entry_id: i64,
    failures: usize,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store; ids already present are kept, missing ones assigned.
    pub fn with_records(records: Vec<TimerRecord>) -> Self {
        let mut store = Self::new();
        for mut r in records {
            let id = r.id.unwrap_or_else(|| store.next_timer_id + 1);
            store.next_timer_id = store.next_timer_id.max(id);
            r.id = Some(id);
            for e in r.entries.iter_mut() {
                let eid = e.id.unwrap_or_else(|| store.next_entry_id + 1);
                store.next_entry_id = store.next_entry_id.max(eid);
                e.id = Some(eid);
            }
            store.timers.push(r);
        }
        store
    }

    /// Make the next `n` write operations fail.
    pub fn fail_next(&mut self, n: usize) {
        self.failures = n;
    }

    pub fn records(&self) -> &[TimerRecord] {
        &self.timers
    }

    pub fn get(&self, id: i64) -> Option<&TimerRecord> {
        self.timers.iter().find(|t| t.id == Some(id))
    }

    /// Successful write operations so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check_failure(&mut self) -> AppResult<()> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(AppError::Persistence("simulated store failure".into()));
        }
        Ok(())
    }
}

impl TimerStore for MemoryStore {
    fn load(&mut self) -> AppResult<Vec<TimerRecord>> {
        Ok(self.timers.clone())
    }

    fn save_timer(&mut self, timer: &TimerRecord) -> AppResult<i64> {
        self.check_failure()?;

        let id = match timer.id {
            Some(id) => id,
            None => {
                self.next_timer_id += 1;
                self.next_timer_id
            }
        };

        match self.timers.iter_mut().find(|t| t.id == Some(id)) {
            Some(existing) => {
                existing.created_on = timer.created_on.clone();
                existing.started_on = timer.started_on.clone();
                existing.description = timer.description.clone();
            }
            None => {
                self.next_timer_id = self.next_timer_id.max(id);
                self.timers.push(TimerRecord {
                    id: Some(id),
                    entries: Vec::new(),
                    ..timer.clone()
                });
            }
        }

        self.writes += 1;
        Ok(id)
    }

    fn save_entry(&mut self, timer_id: i64, entry: &EntryRecord) -> AppResult<i64> {
        self.check_failure()?;

        let Some(pos) = self.timers.iter().position(|t| t.id == Some(timer_id)) else {
            return Err(AppError::Persistence(format!("unknown timer {timer_id}")));
        };

        self.next_entry_id += 1;
        let id = self.next_entry_id;
        self.timers[pos].entries.push(EntryRecord {
            id: Some(id),
            ..entry.clone()
        });

        self.writes += 1;
        Ok(id)
    }

    fn delete_timer(&mut self, timer_id: i64) -> AppResult<()> {
        self.check_failure()?;
        self.timers.retain(|t| t.id != Some(timer_id));
        self.writes += 1;
        Ok(())
    }
}
