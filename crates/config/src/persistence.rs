//! File system persistence for configuration
//!
//! Reads and writes the config file with atomic writes, directory
//! creation, and graceful fallback to defaults on a missing or unusable
//! file.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    /// Creates a persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Creates a handler at the platform config location
    /// (e.g. `~/.config/castwave/config.toml` on Linux)
    pub fn at_default_location() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("com", "castwave", "castwave")?;
        Some(Self::new(dirs.config_dir().join("config.toml")))
    }

    /// The path this handler reads and writes
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Loads configuration from file
    ///
    /// A missing file yields the default config; an empty, unparseable, or
    /// invalid file is an error.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        // An empty file is corruption, not an implicit default
        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })?;

        if config.version != CONFIG_VERSION {
            log::warn!(
                "Config version {} differs from current version {}; unknown fields were ignored",
                config.version,
                CONFIG_VERSION
            );
        }

        if let Err(errors) = config.validate() {
            return Err(ConfigError::ValidationFailed(errors));
        }

        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any failure
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Config error: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves configuration atomically
    ///
    /// The file is written to a temp file in the target directory and
    /// renamed into place, so a crash never leaves a truncated config.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(config)?;

        let dir = self
            .config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        fs::create_dir_all(&dir).map_err(|e| ConfigError::WriteError {
            path: self.config_path.clone(),
            source: e,
        })?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| ConfigError::WriteError {
            path: self.config_path.clone(),
            source: e,
        })?;

        temp.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e,
            })?;

        temp.persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        log::debug!("Config saved to {}", self.config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("config.toml")
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = ConfigPersistence::new(temp_config_path(&dir));

        let config = persistence.load().expect("missing file is fine");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = ConfigPersistence::new(temp_config_path(&dir));

        let mut config = Config::default();
        config.api.page_limit = 20;
        config.player.autoplay = false;

        persistence.save(&config).expect("save succeeds");
        let loaded = persistence.load().expect("load succeeds");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config_path(&dir);
        fs::write(&path, "   \n").unwrap();

        let persistence = ConfigPersistence::new(path);
        assert!(matches!(
            persistence.load(),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn test_garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config_path(&dir);
        fs::write(&path, "this is not { toml").unwrap();

        let persistence = ConfigPersistence::new(path);
        assert!(matches!(
            persistence.load(),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config_path(&dir);
        fs::write(&path, "[api]\npage_limit = 0\n").unwrap();

        let persistence = ConfigPersistence::new(path);
        assert!(matches!(
            persistence.load(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_load_or_default_swallows_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config_path(&dir);
        fs::write(&path, "garbage").unwrap();

        let persistence = ConfigPersistence::new(path);
        assert_eq!(persistence.load_or_default(), Config::default());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.toml");

        let persistence = ConfigPersistence::new(path.clone());
        persistence.save(&Config::default()).expect("save succeeds");
        assert!(path.exists());
    }
}
