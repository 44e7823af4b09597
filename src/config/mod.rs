use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub show_seconds: bool,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_tick_interval() -> u64 {
    250
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            show_seconds: false,
            tick_interval_ms: default_tick_interval(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rtimeledger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtimeledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeledger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeledger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// Keys missing from the file take their default value.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Initialize configuration and database files.
    ///
    /// A relative `custom_db` is placed inside the config directory. In test
    /// mode the config file is left untouched. Returns the database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
