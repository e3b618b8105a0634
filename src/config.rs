//! Benchmark configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::{DEFAULT_MATCH_COUNT, Strategy};
use tracing::{debug, info, instrument};

/// Which opponent the benchmark plays against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum OpponentKind {
    /// A person typing `row col` at the terminal.
    #[display("human")]
    Human,
    /// First empty cell in row-major order.
    #[display("first-free")]
    FirstFree,
    /// Perfect play for O.
    #[display("perfect")]
    Perfect,
}

/// Configuration for a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Matches played per strategy.
    #[serde(default = "default_match_count")]
    match_count: usize,

    /// Strategies to compare, in report order.
    #[serde(default = "default_strategies")]
    strategies: Vec<Strategy>,

    /// Opponent for every match.
    #[serde(default = "default_opponent")]
    opponent: OpponentKind,
}

fn default_match_count() -> usize {
    DEFAULT_MATCH_COUNT
}

fn default_strategies() -> Vec<Strategy> {
    vec![Strategy::Exhaustive, Strategy::Pruned]
}

fn default_opponent() -> OpponentKind {
    OpponentKind::Perfect
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            match_count: default_match_count(),
            strategies: default_strategies(),
            opponent: default_opponent(),
        }
    }
}

impl BenchConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            match_count = config.match_count,
            opponent = %config.opponent,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        match_count: Option<usize>,
        opponent: Option<OpponentKind>,
        strategies: Option<Vec<Strategy>>,
    ) -> Result<Self, ConfigError> {
        if let Some(count) = match_count {
            self.match_count = count;
        }
        if let Some(opponent) = opponent {
            self.opponent = opponent;
        }
        if let Some(strategies) = strategies {
            self.strategies = strategies;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.match_count == 0 {
            return Err(ConfigError::new("match_count must be at least 1".to_string()));
        }
        if self.strategies.is_empty() {
            return Err(ConfigError::new("strategies must not be empty".to_string()));
        }
        Ok(())
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
