//! Configuration file loading for the terminal game.
//!
//! Settings come from an optional `chess.toml`; command-line flags given to
//! the binary override whatever the file says.

use chess_core::{Color, ParseColorError};
use chess_engine::SearchConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The human side is neither white nor black.
    #[error("Invalid human side: {0}")]
    InvalidColor(#[from] ParseColorError),
}

/// `[engine]` table.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search depth in plies. Defaults to 2.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Seed for the tie-break between equally scored moves. Random if unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_depth() -> u32 {
    SearchConfig::DEFAULT_DEPTH
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: default_depth(),
            seed: None,
        }
    }
}

/// `[game]` table.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Side played by the human, "white" or "black". Defaults to "white".
    #[serde(default = "default_human")]
    pub human: String,
    /// Pause before the computer's reply is shown, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Starting position in FEN. Defaults to the standard position.
    #[serde(default)]
    pub fen: Option<String>,
}

fn default_human() -> String {
    "white".to_string()
}

fn default_reply_delay_ms() -> u64 {
    250
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            human: default_human(),
            reply_delay_ms: default_reply_delay_ms(),
            fen: None,
        }
    }
}

/// Contents of `chess.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub game: GameConfig,
}

impl CliConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, [`Self::config_path()`]
    /// is read if present, and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default configuration path, `chess.toml` in the current
    /// working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    /// The human's color.
    pub fn human(&self) -> Result<Color, ConfigError> {
        Ok(self.game.human.parse()?)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::new(self.engine.depth)
    }
}
