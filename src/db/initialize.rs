use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::debug;

const LEDGER_TABLES: [&str; 3] = ["log", "timers", "entries"];

/// Bring the schema up to date, then make sure the ledger tables are there.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let applied = run_pending_migrations(conn)?;
    debug!(applied, "schema up to date");

    for table in LEDGER_TABLES {
        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        if found == 0 {
            return Err(AppError::Migration(format!("missing table `{table}`")));
        }
    }

    Ok(())
}
