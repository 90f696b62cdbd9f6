//! Serializable views for the presentation layer
//!
//! Field names are camelCase so the JSON matches what the web client and the
//! score-submission forwarder expect.

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::resolve::{ResolveStep, SwapOutcome, SwapRejection};
use crate::types::{Coord, TileCell};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Rows top to bottom
    pub board: Vec<Vec<TileCell>>,
    pub score: u32,
    pub moves: u32,
    pub selected: Option<Coord>,
    pub seed: u32,
    pub game_over: bool,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            board: state.board().rows().map(|row| row.to_vec()).collect(),
            score: state.score(),
            moves: state.moves(),
            selected: state.selected(),
            seed: state.seed(),
            game_over: state.is_over(),
        }
    }
}

/// Wire form of a [`SwapOutcome`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapReport<'a> {
    pub next_state: GameSnapshot,
    pub steps: &'a [ResolveStep],
    pub did_consume_move: bool,
    pub did_reshuffle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<SwapRejection>,
}

impl SwapOutcome {
    pub fn report(&self) -> SwapReport<'_> {
        SwapReport {
            next_state: self.next_state.snapshot(),
            steps: &self.steps,
            did_consume_move: self.did_consume_move,
            did_reshuffle: self.did_reshuffle,
            rejection: self.rejection,
        }
    }
}
