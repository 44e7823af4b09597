use crate::cli::commands::{audit, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let keys = ExportLogic::import(&mut tracker, file)?;

        if !keys.is_empty() {
            let message = format!("{} timers imported", keys.len());
            audit(&tracker, "import", file, &message);
            success(format!("Imported {} timers from {file}.", keys.len()));
        }
    }
    Ok(())
}
