//! Engine configuration
//!
//! Every knob has a default matching the tuning constants in `match3_types`.
//! Configs can be built in code, parsed from TOML, or overridden from the
//! environment:
//!
//! - `MATCH3_GRID_SIZE`: board side length (default 9)
//! - `MATCH3_TOKEN_VARIETY`: number of spawnable token kinds (default 6)
//! - `MATCH3_STARTING_MOVES`: moves granted per session (default 30)
//! - `MATCH3_POWER_TILES`: set to "1" or "true" to spawn and trigger power tiles

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    GRID_SIZE, MAX_GENERATION_ATTEMPTS, MAX_TOKEN_REDRAWS, STARTING_MOVES, TOKEN_KINDS,
    TOKEN_VARIETY,
};

pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 32;
pub const MIN_TOKEN_VARIETY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid_size: usize,
    pub token_variety: usize,
    pub starting_moves: u32,
    pub max_generation_attempts: u32,
    pub max_token_redraws: u32,
    /// Spawn power tiles from 4+ matches and trigger them when cleared.
    pub power_tiles: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            token_variety: TOKEN_VARIETY,
            starting_moves: STARTING_MOVES,
            max_generation_attempts: MAX_GENERATION_ATTEMPTS,
            max_token_redraws: MAX_TOKEN_REDRAWS,
            power_tiles: false,
        }
    }
}

impl EngineConfig {
    /// Check ranges, returning the config unchanged when valid
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        if !(MIN_TOKEN_VARIETY..=TOKEN_KINDS).contains(&self.token_variety) {
            return Err(ConfigError::TokenVariety {
                variety: self.token_variety,
                min: MIN_TOKEN_VARIETY,
                max: TOKEN_KINDS,
            });
        }
        if self.max_generation_attempts == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_generation_attempts",
            });
        }
        if self.max_token_redraws == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_token_redraws",
            });
        }
        Ok(self)
    }

    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Defaults overridden from `MATCH3_*` environment variables
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let power_tiles = env::var("MATCH3_POWER_TILES")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(self.power_tiles);

        Self {
            grid_size: parsed("MATCH3_GRID_SIZE").unwrap_or(self.grid_size),
            token_variety: parsed("MATCH3_TOKEN_VARIETY").unwrap_or(self.token_variety),
            starting_moves: parsed("MATCH3_STARTING_MOVES").unwrap_or(self.starting_moves),
            power_tiles,
            ..self
        }
    }

    pub fn with_power_tiles(self, power_tiles: bool) -> Self {
        Self {
            power_tiles,
            ..self
        }
    }
}
