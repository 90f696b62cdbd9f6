//! Game state module - the externally visible snapshot of a session
//!
//! A `GameState` is created once per play session and then replaced wholesale
//! by [`GameState::apply_swap`]. It is never mutated after being handed out;
//! every operation returns a new state.
//!
//! Besides the visible board, score, moves and selection, the state carries the
//! session's RNG and tile id generator so that resolution is deterministic and
//! ids stay unique within the session.

use tracing::debug;

use crate::board::TileGrid;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::generation::generate_playable;
use crate::oracle::{find_hint_move, has_any_valid_move, HintMove};
use crate::resolve::{apply_swap, SwapOutcome};
use crate::rng::{SimpleRng, TileIdGen};
use crate::snapshot::GameSnapshot;
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) board: TileGrid,
    pub(crate) score: u32,
    pub(crate) moves: u32,
    pub(crate) selected: Option<Coord>,
    pub(crate) rng: SimpleRng,
    pub(crate) ids: TileIdGen,
    pub(crate) config: EngineConfig,
    /// Seed the session was created with.
    pub(crate) seed: u32,
}

impl GameState {
    /// Create a new session with the default configuration
    pub fn new(seed: u32) -> Self {
        Self::build(EngineConfig::default(), seed)
    }

    /// Create a new session with a custom configuration
    ///
    /// A missing seed is drawn from the clock.
    pub fn with_config(config: EngineConfig, seed: Option<u32>) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        Ok(Self::build(config, seed.unwrap_or_else(SimpleRng::entropy_seed)))
    }

    fn build(config: EngineConfig, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut ids = TileIdGen::new();
        let board = generate_playable(&config, &mut rng, &mut ids);
        debug!(seed, grid_size = config.grid_size, "session created");

        Self {
            board,
            score: 0,
            moves: config.starting_moves,
            selected: None,
            rng,
            ids,
            config,
            seed,
        }
    }

    /// Start a session from a prepared board
    ///
    /// The board must match `config.grid_size`. New tile ids continue after the
    /// largest id already on the board; refills draw from `seed`.
    pub fn from_board(
        board: TileGrid,
        config: EngineConfig,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        let config = EngineConfig {
            grid_size: board.size(),
            ..config
        }
        .validate()?;
        let next_id = board.max_id().map_or(0, |id| id.wrapping_add(1));

        Ok(Self {
            board,
            score: 0,
            moves: config.starting_moves,
            selected: None,
            rng: SimpleRng::new(seed),
            ids: TileIdGen::starting_at(next_id),
            config,
            seed,
        })
    }

    pub fn board(&self) -> &TileGrid {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// RNG state that the next refill or reshuffle will draw from
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// True once every move has been spent
    pub fn is_over(&self) -> bool {
        self.moves == 0
    }

    /// Copy of this state with a different selection
    ///
    /// Out-of-range coordinates clear the selection.
    pub fn with_selected(&self, selected: Option<Coord>) -> Self {
        Self {
            selected: selected.filter(|c| c.in_bounds(self.board.size())),
            ..self.clone()
        }
    }

    /// See [`apply_swap`]
    pub fn apply_swap(&self, from: Coord, to: Coord) -> SwapOutcome {
        apply_swap(self, from, to)
    }

    pub fn has_any_valid_move(&self) -> bool {
        has_any_valid_move(&self.board)
    }

    pub fn find_hint_move(&self) -> Option<HintMove> {
        find_hint_move(&self.board)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}

/// Create a session with the default configuration
///
/// A missing seed is drawn from the clock.
pub fn create_initial_state(seed: Option<u32>) -> GameState {
    GameState::new(seed.unwrap_or_else(SimpleRng::entropy_seed))
}
