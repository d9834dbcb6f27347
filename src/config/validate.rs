use thiserror::Error;

use super::schema::{Config, DisplayMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bgg.username.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bgg.username must not be empty".to_string(),
            ));
        }
        for convention in &self.game_conventions {
            if convention.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "game_conventions entries must have a non-empty name".to_string(),
                ));
            }
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if !(1..=10).contains(&self.api.collection_retry_limit) {
            return Err(ConfigError::Validation(
                "api.collection_retry_limit must be between 1 and 10".to_string(),
            ));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Validation(
                "display.width and display.height must be greater than 0".to_string(),
            ));
        }
        if self.display.mode == DisplayMode::File && !self.display.output_path.ends_with(".png") {
            return Err(ConfigError::Validation(
                "display.output_path must end with .png when display.mode is file".to_string(),
            ));
        }
        if self.pages.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "pages.interval_secs must be greater than 0".to_string(),
            ));
        }
        if !(1..=25).contains(&self.pages.last_played_count) {
            return Err(ConfigError::Validation(
                "pages.last_played_count must be between 1 and 25".to_string(),
            ));
        }
        Ok(())
    }
}
