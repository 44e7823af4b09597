use crate::db::log::{LogRow, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ansi regex"));

const OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "toggle" | "pause" => Colour::Yellow,
        "enter" => Colour::Cyan,
        "delete" => Colour::Red,
        "describe" => Colour::Blue,
        "import" => Colour::Purple,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, cut to `OP_WIDTH` visible columns with only the
/// operation word coloured.
fn op_target_cell(row: &LogRow) -> String {
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = if plain.width() > OP_WIDTH {
        let mut s: String = plain.chars().take(OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&row.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let rows = load_log(conn)?;

        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let dates: Vec<String> = rows
            .iter()
            .map(|r| {
                chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| r.date.clone())
            })
            .collect();
        let cells: Vec<String> = rows.iter().map(op_target_cell).collect();

        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(10);
        let op_w = cells
            .iter()
            .map(|c| strip_ansi(c).width())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH);

        println!("📜 Internal log:\n");

        for ((row, date), cell) in rows.iter().zip(&dates).zip(&cells) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(cell).width()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                date,
                cell,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
