use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimeLedger
/// CLI application to track time on named timers with SQLite
#[derive(Parser)]
#[command(
    name = "rtimeledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal time ledger: start and pause timers, review and correct daily totals",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a new timer (the running one is paused)
    Start {
        /// Optional description of the new timer
        description: Option<String>,
    },

    /// Pause or resume a timer
    Toggle {
        /// Timer id
        id: i64,
    },

    /// Pause the running timer, if any
    Pause,

    /// Set or clear (with "") the description of a timer
    Describe {
        /// Timer id
        id: i64,

        /// New description
        text: String,
    },

    /// Set the total logged by a timer on a date
    Enter {
        /// Timer id
        id: i64,

        /// Desired total: H:MM, H:MM:SS, 1h30m, 90m, 45s or minutes
        #[arg(allow_hyphen_values = true)]
        duration: String,

        #[arg(long, short, help = "Date to correct (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// List days with their timers
    List {
        /// Filter by period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM              → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD           → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format:
        /// - YYYY-MM:YYYY-MM      → month range (e.g. "2025-06:2025-08")
        ///
        /// Special value:
        /// - all                   → every day in the ledger (default)
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, short, help = "Show the entries of each timer")]
        entries: bool,
    },

    /// Show the running timer and today's total
    Status,

    /// Live view of the running timer
    Watch {
        #[arg(long, help = "Render once and exit")]
        once: bool,
    },

    /// Export the ledger
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import timers from a JSON export
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}
