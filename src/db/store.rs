//! SQLite implementation of the timer store.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{EntryRecord, TimerRecord};
use crate::store::TimerStore;
use rusqlite::Connection;
use tracing::debug;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database file and bring the schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl TimerStore for SqliteStore {
    fn load(&mut self) -> AppResult<Vec<TimerRecord>> {
        let timers = queries::load_timers(&self.pool.conn)?;
        debug!(count = timers.len(), "timers loaded");
        Ok(timers)
    }

    fn save_timer(&mut self, timer: &TimerRecord) -> AppResult<i64> {
        match timer.id {
            Some(id) => {
                queries::update_timer(&self.pool.conn, id, timer)?;
                Ok(id)
            }
            None => {
                let id = queries::insert_timer(&self.pool.conn, timer)?;
                debug!(id, "timer inserted");
                Ok(id)
            }
        }
    }

    fn save_entry(&mut self, timer_id: i64, entry: &EntryRecord) -> AppResult<i64> {
        let id = queries::insert_entry(&self.pool.conn, timer_id, entry)?;
        debug!(timer_id, id, "entry inserted");
        Ok(id)
    }

    fn delete_timer(&mut self, timer_id: i64) -> AppResult<()> {
        let removed = queries::delete_timer(&mut self.pool.conn, timer_id)?;
        debug!(timer_id, removed, "timer deleted");
        Ok(())
    }
}
