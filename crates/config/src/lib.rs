//! Castwave configuration
//!
//! TOML configuration split into sections, each validating itself via the
//! `ConfigSection` trait. Invalid or missing files fall back to defaults
//! with a warning; writes are atomic so a config file is never left half
//! written.

mod error;
mod persistence;
mod validation;

mod api_config;
mod app_config;
mod player_config;

pub use api_config::ApiConfig;
pub use app_config::{AppConfig, LogLevel};
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use persistence::ConfigPersistence;
pub use player_config::PlayerConfig;
pub use validation::{ConfigSection, Validator};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Content API settings
    pub api: ApiConfig,

    /// Playback settings
    pub player: PlayerConfig,

    /// Application settings
    pub app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: ApiConfig::default(),
            player: PlayerConfig::default(),
            app: AppConfig::default(),
        }
    }
}

impl Config {
    /// Validates every section, collecting all errors
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(section_errors) = self.api.validate() {
            errors.extend(section_errors);
        }
        if let Err(section_errors) = self.player.validate() {
            errors.extend(section_errors);
        }
        if let Err(section_errors) = self.app.validate() {
            errors.extend(section_errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
