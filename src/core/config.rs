use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the config file, or the effective defaults when it does not exist.
    pub fn print(path: &Path, cfg: &Config) -> AppResult<()> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            println!("{}", content.trim_end());
        } else {
            println!("{}", serde_yaml::to_string(cfg)?.trim_end());
        }
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot launch '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("'{ed}' exited with {status}")));
        }

        Ok(())
    }
}
