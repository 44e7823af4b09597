//! rTimeLedger library root.
//! Exposes the CLI parser, the high-level run() function, and the ledger
//! engine (clock, timers, corrections, calendar index, stores).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Start { .. } => commands::start::handle(&cli.command, cfg),
        Commands::Toggle { .. } => commands::toggle::handle(&cli.command, cfg),
        Commands::Pause => commands::pause::handle(cfg),
        Commands::Describe { .. } => commands::describe::handle(&cli.command, cfg),
        Commands::Enter { .. } => commands::enter::handle(&cli.command, cfg),
        Commands::List { .. } => commands::list::handle(&cli.command, cfg),
        Commands::Status => commands::status::handle(cfg),
        Commands::Watch { .. } => commands::watch::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Import { .. } => commands::import::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // in test mode the user's config file is never read
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    cfg.database = utils::path::expand_tilde(&cfg.database)
        .to_string_lossy()
        .to_string();

    dispatch(&cli, &cfg)
}
