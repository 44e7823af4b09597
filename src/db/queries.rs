use crate::errors::{AppError, AppResult};
use crate::models::{EntryRecord, TimerRecord};
use rusqlite::{Connection, Result, Row, params};
use std::collections::HashMap;

pub fn map_timer_row(row: &Row) -> Result<TimerRecord> {
    Ok(TimerRecord {
        id: Some(row.get("id")?),
        created_on: row.get("created_on")?,
        started_on: row.get("started_on")?,
        description: row.get("description")?,
        entries: Vec::new(),
    })
}

pub fn map_entry_row(row: &Row) -> Result<(i64, EntryRecord)> {
    let timer_id: i64 = row.get("timer_id")?;
    Ok((
        timer_id,
        EntryRecord {
            id: Some(row.get("id")?),
            logged_on: row.get("logged_on")?,
            manually: row.get::<_, i32>("manually")? == 1,
            value: row.get("value")?,
        },
    ))
}

/// Load every timer together with its entries, ordered by id.
pub fn load_timers(conn: &Connection) -> AppResult<Vec<TimerRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_on, started_on, description
         FROM timers
         ORDER BY id ASC",
    )?;
    let mut timers = stmt
        .query_map([], map_timer_row)?
        .collect::<Result<Vec<_>>>()?;

    let slot: HashMap<i64, usize> = timers
        .iter()
        .enumerate()
        .filter_map(|(i, t)| t.id.map(|id| (id, i)))
        .collect();

    let mut stmt = conn.prepare(
        "SELECT id, timer_id, logged_on, manually, value
         FROM entries
         ORDER BY timer_id ASC, logged_on DESC, id DESC",
    )?;
    for row in stmt.query_map([], map_entry_row)? {
        let (timer_id, entry) = row?;
        if let Some(&i) = slot.get(&timer_id) {
            timers[i].entries.push(entry);
        }
    }

    Ok(timers)
}

pub fn insert_timer(conn: &Connection, timer: &TimerRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timers (created_on, started_on, description)
         VALUES (?1, ?2, ?3)",
        params![timer.created_on, timer.started_on, timer.description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_timer(conn: &Connection, id: i64, timer: &TimerRecord) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE timers
         SET created_on = ?1, started_on = ?2, description = ?3
         WHERE id = ?4",
        params![timer.created_on, timer.started_on, timer.description, id],
    )?;
    if changed == 0 {
        return Err(AppError::Persistence(format!("timer {id} is not stored")));
    }
    Ok(())
}

pub fn insert_entry(conn: &Connection, timer_id: i64, entry: &EntryRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entries (timer_id, logged_on, manually, value)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            timer_id,
            entry.logged_on,
            if entry.manually { 1 } else { 0 },
            entry.value
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete a timer and its entries in one transaction.
pub fn delete_timer(conn: &mut Connection, id: i64) -> AppResult<usize> {
    let tx = conn.transaction()?;
    // explicit delete so it also works without the foreign_keys pragma
    tx.execute("DELETE FROM entries WHERE timer_id = ?1", [id])?;
    let removed = tx.execute("DELETE FROM timers WHERE id = ?1", [id])?;
    tx.commit()?;
    Ok(removed)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}
