//! Configuration file loading for the console.
//!
//! Settings come from `chess-console.toml` in the current directory, or the
//! file named by `--config`. Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Console display and start-up settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// Draw pieces and highlights with ANSI colours. Defaults to true.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Draw pieces as Unicode chess symbols instead of letters.
    #[serde(default)]
    pub unicode_pieces: bool,
    /// Highlight the destinations of a selected piece. Defaults to true.
    #[serde(default = "default_true")]
    pub highlight_moves: bool,
    /// FEN to start from instead of the standard position.
    #[serde(default)]
    pub starting_fen: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            color: true,
            unicode_pieces: false,
            highlight_moves: true,
            starting_fen: None,
        }
    }
}

impl ConsoleConfig {
    /// Loads the configuration from `path`, or from [`Self::config_path()`]
    /// when no path is given. A missing file gives the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns `chess-console.toml` in the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-console.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
color = false
unicode_pieces = true
highlight_moves = false
starting_fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1"
"#;

        let config: ConsoleConfig = toml::from_str(toml_content).unwrap();

        assert!(!config.color);
        assert!(config.unicode_pieces);
        assert!(!config.highlight_moves);
        assert_eq!(
            config.starting_fen.as_deref(),
            Some("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
        );
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert!(config.color);
        assert!(config.highlight_moves);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = std::env::temp_dir().join("chess-console-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "color = maybe").unwrap();

        let result = ConsoleConfig::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("chess-console-does-not-exist.toml");
        let config = ConsoleConfig::load(Some(&path)).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(
            ConsoleConfig::config_path(),
            PathBuf::from("chess-console.toml")
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = ConsoleConfig {
            color: false,
            unicode_pieces: true,
            highlight_moves: true,
            starting_fen: Some("8/8/8/8/8/8/8/K6k w - - 0 1".to_string()),
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: ConsoleConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
