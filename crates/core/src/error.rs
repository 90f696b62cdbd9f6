//! Error types for board generation and configuration.
//!
//! Rejected swaps are not errors; they are reported through
//! [`SwapOutcome`](crate::resolve::SwapOutcome).

use derive_more::{Display, Error};

use crate::board::TokenGrid;

/// Board generation could not satisfy the no-match / has-move invariant.
///
/// Carries the last board drawn so the caller can fall back to it.
#[derive(Debug, Clone, Display, Error)]
#[display("board generation exhausted after {attempts} attempts")]
pub struct GenerationExhausted {
    /// Number of full-board attempts made.
    pub attempts: u32,
    /// Last board drawn, accepted as best effort by the public API.
    pub best_effort: TokenGrid,
}

/// Invalid engine configuration.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("grid size {size} outside {min}..={max}")]
    GridSize { size: usize, min: usize, max: usize },
    #[display("token variety {variety} outside {min}..={max}")]
    TokenVariety {
        variety: usize,
        min: usize,
        max: usize,
    },
    #[display("{field} must be at least 1")]
    ZeroLimit { field: &'static str },
    #[display("invalid engine config TOML: {source}")]
    Toml { source: toml::de::Error },
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        Self::Toml { source }
    }
}

impl ConfigError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::GridSize { .. } => "invalid_grid_size",
            ConfigError::TokenVariety { .. } => "invalid_token_variety",
            ConfigError::ZeroLimit { .. } => "invalid_limit",
            ConfigError::Toml { .. } => "invalid_toml",
        }
    }
}
