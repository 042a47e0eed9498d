// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game defaults, optionally read from a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Vertical lines of a new board
    #[serde(default = "default_size")]
    pub width: u8,
    /// Horizontal lines of a new board
    #[serde(default = "default_size")]
    pub height: u8,
    /// Written to the `AP` property of exported SGF
    #[serde(default = "default_application")]
    pub application: String,
}

fn default_size() -> u8 {
    19
}

fn default_application() -> String {
    "Goban".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            application: default_application(),
        }
    }
}

impl GameConfig {
    /// Config for a square board, other fields default
    pub fn with_size(size: u8) -> Self {
        Self {
            width: size,
            height: size,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse game config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded game config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize game config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 19);
        assert_eq!(config.height, 19);
        assert_eq!(config.application, "Goban");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = GameConfig::from_toml_str("width = 9\n").unwrap();
        assert_eq!(config.width, 9);
        assert_eq!(config.height, 19);
        assert_eq!(config.application, "Goban");
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::with_size(13);
        let toml_str = config.to_toml_string().unwrap();
        let deserialized = GameConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 9\nheight = 13\napplication = \"Test\"").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.width, 9);
        assert_eq!(config.height, 13);
        assert_eq!(config.application, "Test");
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(GameConfig::from_toml_str("width = \"nine\"").is_err());
        assert!(GameConfig::load(Path::new("/nonexistent/goban.toml")).is_err());
    }
}
