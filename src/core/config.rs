use std::env;
use std::path::PathBuf;
use tracing::Level;

use crate::core::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputConfig {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = match lookup("BOARD_INPUT") {
            Some(path) if !path.is_empty() && path != "-" => InputConfig::File(PathBuf::from(path)),
            _ => InputConfig::Stdin,
        };

        let config = Config {
            input,
            output: OutputConfig {
                pretty: lookup("BOARD_OUTPUT_PRETTY")
                    .unwrap_or_else(|| "true".to_string())
                    .parse()
                    .unwrap_or(true),
            },
            logging: LoggingConfig {
                level: parse_level(&lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()))?,
            },
        };

        Ok(config)
    }
}

fn parse_level(level: &str) -> AppResult<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(AppError::Config(format!("unknown LOG_LEVEL: {level}"))),
    }
}
