use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        if !(*migrate || *check || *vacuum || *info) {
            warning("Nothing to do: use --migrate, --check, --vacuum or --info.");
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            println!(
                "{}✔ Migration completed ({} applied).{}\n",
                GREEN, applied, RESET
            );
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool.conn, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            let orphans: i64 = pool.conn.query_row(
                "SELECT COUNT(*) FROM entries
                 WHERE timer_id NOT IN (SELECT id FROM timers)",
                [],
                |row| row.get(0),
            )?;

            if integrity != "ok" {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            } else if orphans > 0 {
                println!(
                    "{}✘ Integrity check failed:{} {} entries without a timer\n",
                    RED, RESET, orphans
                );
            } else {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
