use rusqlite::{Connection, OptionalExtension, Result};
use tracing::info;

/// Ensure that the `log` table exists. Migration bookkeeping lives there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// (version, description, sql)
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250110_0001_create_timers",
        "Created timers table",
        r#"
        CREATE TABLE IF NOT EXISTS timers (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            created_on   TEXT NOT NULL,
            started_on   TEXT,
            description  TEXT
        );
        "#,
    ),
    (
        "20250110_0002_create_entries",
        "Created entries table",
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            timer_id   INTEGER NOT NULL REFERENCES timers(id) ON DELETE CASCADE,
            logged_on  TEXT NOT NULL,
            manually   INTEGER NOT NULL DEFAULT 0 CHECK(manually IN (0, 1)),
            value      INTEGER NOT NULL
        );
        "#,
    ),
    (
        "20250302_0003_entries_timer_index",
        "Indexed entries by timer and logged_on",
        r#"
        CREATE INDEX IF NOT EXISTS idx_entries_timer_logged ON entries(timer_id, logged_on);
        "#,
    ),
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded in the log table, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations. Returns how many ran.
///
/// Invoked by db::initialize::init_db() and by `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [version, message],
        )?;

        info!(version, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
