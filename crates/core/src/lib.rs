//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 board engine: the grid, match detection,
//! cascade resolution, scoring, and the move oracle. It performs no I/O and
//! never blocks, making it:
//!
//! - **Deterministic**: same seed and swaps produce identical cascades
//! - **Immutable at the seams**: every operation returns a new [`GameState`]
//! - **Session-scoped**: RNG and tile ids live in the state, not in globals
//!
//! # Module Structure
//!
//! - [`board`]: token and tile grids, generation, gravity and refill
//! - [`matcher`]: run detection and power-tile classification
//! - [`scoring`]: match, cascade and power-activation points
//! - [`oracle`]: "any legal move?" and hint search
//! - [`resolve`]: swap validation and the cascade loop
//! - [`generation`]: playable-board generation with bounded retries
//! - [`game_state`]: the per-session state handed to callers
//! - [`snapshot`]: serializable views for the presentation layer
//! - [`config`]: engine tuning knobs
//! - [`rng`]: seeded LCG and the tile id generator
//!
//! # Example
//!
//! ```
//! use match3_core::GameState;
//!
//! let state = GameState::new(12345);
//! let hint = state.find_hint_move().expect("fresh boards always have a move");
//!
//! let outcome = state.apply_swap(hint.from, hint.to);
//! assert!(outcome.did_consume_move);
//! assert!(outcome.next_state.score() > 0);
//! assert_eq!(outcome.next_state.moves(), state.moves() - 1);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod generation;
pub mod matcher;
pub mod oracle;
pub mod resolve;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::{adjacent, TileGrid, TokenGrid};
pub use config::EngineConfig;
pub use error::{ConfigError, GenerationExhausted};
pub use game_state::{create_initial_state, GameState};
pub use generation::{generate_playable, generation_exhausted_total, try_generate_playable};
pub use matcher::{find_matches, Axis, MatchEvent};
pub use oracle::{all_valid_moves, find_hint_move, has_any_valid_move, HintMove};
pub use resolve::{
    apply_swap, PowerActivation, PowerSpawn, ResolveStep, SwapOutcome, SwapRejection,
};
pub use rng::{SimpleRng, TileIdGen};
pub use scoring::{cascade_multiplier, points_for_match, power_activation_bonus, StepScore};
pub use snapshot::{GameSnapshot, SwapReport};
