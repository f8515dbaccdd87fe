//! Arena configuration loaded from TOML with command-line overrides.

use crate::games::tictactoe::Difficulty;
use crate::session::GameMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "tictactoe.toml";

/// Settings for a table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArenaConfig {
    /// Starting game mode.
    #[serde(default)]
    mode: GameMode,

    /// Starting opponent difficulty.
    #[serde(default)]
    difficulty: Difficulty,

    /// Pause before the opponent moves, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Seed for the opponent's random samples; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_opponent_delay_ms() -> u64 {
    300
}

impl ArenaConfig {
    /// Creates a configuration with explicit values.
    pub fn new(
        mode: GameMode,
        difficulty: Difficulty,
        opponent_delay_ms: u64,
        seed: Option<u64>,
    ) -> Self {
        Self {
            mode,
            difficulty,
            opponent_delay_ms,
            seed,
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces any field given on the command line.
    pub fn with_overrides(
        mut self,
        mode: Option<GameMode>,
        difficulty: Option<Difficulty>,
        opponent_delay_ms: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        if let Some(delay) = opponent_delay_ms {
            self.opponent_delay_ms = delay;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// The opponent delay as a [`Duration`].
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(
            GameMode::default(),
            Difficulty::default(),
            default_opponent_delay_ms(),
            None,
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: ArenaConfig = toml::from_str("").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.opponent_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let config = ArenaConfig::default().with_overrides(None, Some(Difficulty::Hard), None, Some(9));
        assert_eq!(*config.mode(), GameMode::Opponent);
        assert_eq!(*config.difficulty(), Difficulty::Hard);
        assert_eq!(*config.opponent_delay_ms(), 300);
        assert_eq!(*config.seed(), Some(9));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<ArenaConfig>("board_size = 4").is_err());
    }
}
