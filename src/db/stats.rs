use crate::db::migrate::applied_versions;
use crate::db::queries::count_rows;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_duration;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let timers = count_rows(conn, "timers")?;
    let entries = count_rows(conn, "entries")?;
    println!("{}• Timers:{} {}{}{}", CYAN, RESET, GREEN, timers, RESET);
    println!("{}• Entries:{} {}{}{}", CYAN, RESET, GREEN, entries, RESET);

    //
    // 3) LOGGED TIME
    //
    let total: i64 = conn.query_row("SELECT COALESCE(SUM(value), 0) FROM entries", [], |row| {
        row.get(0)
    })?;
    println!(
        "{}• Logged in total:{} {}",
        CYAN,
        RESET,
        format_duration(total, true)
    );

    //
    // 4) ENTRY RANGE
    //
    let first: Option<String> = conn
        .query_row(
            "SELECT logged_on FROM entries ORDER BY logged_on ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = conn
        .query_row(
            "SELECT logged_on FROM entries ORDER BY logged_on DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let none = || format!("{GREY}--{RESET}");
    println!("{}• Entry range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(none));
    println!("    to:   {}", last.unwrap_or_else(none));

    //
    // 5) SCHEMA
    //
    let versions = applied_versions(conn)?;
    println!(
        "{}• Migrations:{} {} applied{}",
        CYAN,
        RESET,
        versions.len(),
        versions
            .last()
            .map(|v| format!(" (latest {v})"))
            .unwrap_or_default()
    );

    println!();
    Ok(())
}
