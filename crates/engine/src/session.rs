//! Session driver - the select-then-swap flow on top of the core engine
//!
//! The presentation layer forwards raw taps; the session keeps the current
//! [`GameState`] and turns taps into selections or swaps:
//!
//! - first tap selects a tile
//! - tapping the selected tile again deselects it
//! - tapping a neighbour of the selection swaps the two
//! - tapping any other tile moves the selection there

use tracing::debug;

use crate::core::{ConfigError, EngineConfig, GameState, HintMove, SwapOutcome};
use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapError {
    OutOfBounds,
    NotPlayable,
}

impl TapError {
    pub fn code(self) -> &'static str {
        match self {
            TapError::OutOfBounds => "out_of_bounds",
            TapError::NotPlayable => "not_playable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            TapError::OutOfBounds => "tap outside the board",
            TapError::NotPlayable => "session has no moves left",
        }
    }
}

/// What a tap did
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    Selected(Coord),
    Deselected,
    /// The tap completed a swap attempt (accepted or rejected).
    Swapped(SwapOutcome),
}

#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    swaps_accepted: u32,
    reshuffles: u32,
}

impl Session {
    /// New session with the default configuration
    pub fn new(seed: u32) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn with_config(config: EngineConfig, seed: Option<u32>) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::with_config(config, seed)?))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            swaps_accepted: 0,
            reshuffles: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn swaps_accepted(&self) -> u32 {
        self.swaps_accepted
    }

    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub fn hint(&self) -> Option<HintMove> {
        self.state.find_hint_move()
    }

    /// Handle one tap on `coord`
    pub fn tap(&mut self, coord: Coord) -> Result<TapOutcome, TapError> {
        if self.state.is_over() {
            return Err(TapError::NotPlayable);
        }
        if !coord.in_bounds(self.state.board().size()) {
            return Err(TapError::OutOfBounds);
        }

        match self.state.selected() {
            Some(selected) if selected == coord => {
                self.state = self.state.with_selected(None);
                Ok(TapOutcome::Deselected)
            }
            Some(selected) if selected.is_adjacent(coord) => {
                Ok(TapOutcome::Swapped(self.swap(selected, coord)))
            }
            _ => {
                self.state = self.state.with_selected(Some(coord));
                Ok(TapOutcome::Selected(coord))
            }
        }
    }

    /// Attempt a swap directly (drag gestures, hints, autoplay)
    pub fn swap(&mut self, from: Coord, to: Coord) -> SwapOutcome {
        let outcome = self.state.apply_swap(from, to);
        if outcome.did_consume_move {
            self.swaps_accepted += 1;
        }
        if outcome.did_reshuffle {
            self.reshuffles += 1;
            debug!(moves = outcome.next_state.moves(), "board reshuffled");
        }
        self.state = outcome.next_state.clone();
        outcome
    }
}
