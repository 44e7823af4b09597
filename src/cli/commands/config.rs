use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            ConfigLogic::print(&path, cfg)?;
        }

        if *edit_config {
            if !path.exists() {
                warning(format!(
                    "{} does not exist yet; run `rtimeledger init` first.",
                    path.display()
                ));
                return Ok(());
            }
            ConfigLogic::edit(&path, editor)?;
            success("Configuration file edited successfully.");
        }
    }

    Ok(())
}
