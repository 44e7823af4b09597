use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let tracker = open_tracker(cfg)?;
        ExportLogic::export(&tracker, *format, file, range, *force)?;
    }
    Ok(())
}
