use std::{env, path::PathBuf, str::FromStr};

use tracing::Level;

const LOG_FILE_NAME: &str = "sticky-notes.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: Level,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse STICKY_NOTES_LOG_LEVEL: '{0}' is not a log level")]
    LogLevel(String),
}

pub fn load_config() -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

/// Every setting is optional; unset keys fall back to the defaults.
fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let database_path = lookup("STICKY_NOTES_DB").unwrap_or_else(|| "notes.db".to_string());
    let log_path = lookup("STICKY_NOTES_LOG")
        .map_or_else(|| env::temp_dir().join(LOG_FILE_NAME), PathBuf::from);

    let log_level = match lookup("STICKY_NOTES_LOG_LEVEL") {
        Some(raw) => Level::from_str(raw.trim()).map_err(|_| ConfigError::LogLevel(raw))?,
        None => Level::INFO,
    };

    Ok(Config {
        database_path: database_path.into(),
        log_path,
        log_level,
    })
}
