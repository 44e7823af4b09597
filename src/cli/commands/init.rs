use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::SqliteStore;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rTimeLedger…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let store = SqliteStore::open(&db_path)?;
    success(format!("Database initialized at {}", &db_path));

    if let Err(e) = log::ttlog(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rTimeLedger initialization completed!");
    Ok(())
}
