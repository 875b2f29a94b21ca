//! Playback configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};

/// Settings for the player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start playback as soon as a selected episode finishes loading
    pub autoplay: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { autoplay: true }
    }
}

impl ConfigSection for PlayerConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        // A boolean admits no invalid states
        Ok(())
    }

    fn section_name(&self) -> &'static str {
        "player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_autoplay_defaults_on() {
        assert!(PlayerConfig::default().autoplay);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = PlayerConfig { autoplay: false };
        let text = toml::to_string(&config).unwrap();
        let parsed: PlayerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
