//! TOML configuration, read once at construction.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rounded_path: RoundedPathConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoundedPathConfig {
    /// Maximum chord length for arc tessellation, in length units.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    /// Route plain G0 commands through the rounding engine.
    #[serde(default)]
    pub replace_g0: bool,
}

impl Default for RoundedPathConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            replace_g0: false,
        }
    }
}

fn default_resolution() -> f64 {
    1.0
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounded_path.resolution <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "rounded_path.resolution must be > 0, got {}",
                self.rounded_path.resolution
            )));
        }
        Ok(())
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&text)?;
    config.validate()?;
    Ok(config)
}
