//! Resolution engine - validates a swap and drives the cascade loop
//!
//! ```text
//! idle -> validating -> rejected
//!                    -> resolving (clear -> gravity -> refill -> re-scan)* -> settled
//! ```
//!
//! Every step works on a clone of the caller's board; the previous
//! [`GameState`] is never touched. Randomness comes only from the session RNG
//! carried in the state, so the same state and swap always resolve the same way.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::board::TileGrid;
use crate::config::EngineConfig;
use crate::game_state::GameState;
use crate::generation::generate_playable;
use crate::matcher::{find_matches, MatchEvent};
use crate::oracle::has_any_valid_move;
use crate::rng::{SimpleRng, TileIdGen};
use crate::scoring::{calculate_step_score, power_activation_bonus};
use crate::types::{Coord, PowerType, TileId, TileMovement, MAX_CASCADE_STEPS};

/// Why a swap was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapRejection {
    OutOfBounds,
    NotAdjacent,
    NoMovesLeft,
    NoMatch,
}

impl SwapRejection {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds => "out_of_bounds",
            SwapRejection::NotAdjacent => "not_adjacent",
            SwapRejection::NoMovesLeft => "no_moves_left",
            SwapRejection::NoMatch => "no_match",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds => "coordinate outside the board",
            SwapRejection::NotAdjacent => "tiles are not orthogonal neighbours",
            SwapRejection::NoMovesLeft => "no moves left in this session",
            SwapRejection::NoMatch => "swap does not make a match",
        }
    }
}

/// A tile upgraded to a power tile by a 4+ match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerSpawn {
    pub cell: Coord,
    pub tile_id: TileId,
    pub power: PowerType,
}

/// A power tile triggered by being cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerActivation {
    pub cell: Coord,
    pub tile_id: TileId,
    pub power: PowerType,
    pub bonus: u32,
}

/// Full effect of one cascade iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveStep {
    /// 1-based cascade depth
    pub cascade: u32,
    pub matches: Vec<MatchEvent>,
    /// Every cell emptied this step, deduplicated, in first-seen order
    pub cleared_cells: Vec<Coord>,
    pub points_added: u32,
    /// Gravity movements followed by refill movements
    pub movements: Vec<TileMovement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub powers_spawned: Vec<PowerSpawn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub powers_activated: Vec<PowerActivation>,
}

/// Result of [`apply_swap`]
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOutcome {
    pub next_state: GameState,
    pub steps: Vec<ResolveStep>,
    pub did_consume_move: bool,
    pub did_reshuffle: bool,
    pub rejection: Option<SwapRejection>,
}

impl SwapOutcome {
    fn rejected(state: &GameState, reason: SwapRejection) -> Self {
        debug!(reason = reason.code(), "swap rejected");
        Self {
            next_state: state.with_selected(None),
            steps: Vec::new(),
            did_consume_move: false,
            did_reshuffle: false,
            rejection: Some(reason),
        }
    }

    /// Points gained by this swap
    pub fn points(&self) -> u32 {
        self.steps.iter().map(|s| s.points_added).sum()
    }
}

/// Attempt to swap `from` and `to`, resolving every cascade it triggers
///
/// Out-of-range, non-adjacent and non-matching swaps, and swaps on a session
/// with no moves left, are rejected: the returned state equals the input with
/// the selection cleared, and no move is consumed.
pub fn apply_swap(state: &GameState, from: Coord, to: Coord) -> SwapOutcome {
    let size = state.board.size();
    if !from.in_bounds(size) || !to.in_bounds(size) {
        return SwapOutcome::rejected(state, SwapRejection::OutOfBounds);
    }
    if !from.is_adjacent(to) {
        return SwapOutcome::rejected(state, SwapRejection::NotAdjacent);
    }
    if state.moves == 0 {
        return SwapOutcome::rejected(state, SwapRejection::NoMovesLeft);
    }

    let mut board = state.board.clone();
    board.swap(from, to);
    let mut matches = find_matches(&board.tokens());
    if matches.is_empty() {
        return SwapOutcome::rejected(state, SwapRejection::NoMatch);
    }

    let config = state.config;
    let mut rng = state.rng.clone();
    let mut ids = state.ids.clone();
    let mut score = state.score;
    let mut steps = Vec::new();
    let mut cascade = 1;

    loop {
        let step = resolve_step(&mut board, matches, cascade, &config, &mut rng, &mut ids);
        trace!(
            cascade,
            matches = step.matches.len(),
            cleared = step.cleared_cells.len(),
            points = step.points_added,
            "cascade step resolved"
        );
        score = score.saturating_add(step.points_added);
        steps.push(step);

        matches = find_matches(&board.tokens());
        if matches.is_empty() {
            break;
        }
        if cascade >= MAX_CASCADE_STEPS {
            warn!(cascade, "cascade cap reached; leaving remaining matches on the board");
            break;
        }
        cascade += 1;
    }

    let did_reshuffle = !has_any_valid_move(&board);
    if did_reshuffle {
        board = generate_playable(&config, &mut rng, &mut ids);
    }

    debug!(
        %from,
        %to,
        steps = steps.len(),
        score,
        did_reshuffle,
        "swap resolved"
    );

    SwapOutcome {
        next_state: GameState {
            board,
            score,
            moves: state.moves - 1,
            selected: None,
            rng,
            ids,
            config,
            seed: state.seed,
        },
        steps,
        did_consume_move: true,
        did_reshuffle,
        rejection: None,
    }
}

/// One clear -> gravity -> refill iteration
fn resolve_step(
    board: &mut TileGrid,
    matches: Vec<MatchEvent>,
    cascade: u32,
    config: &EngineConfig,
    rng: &mut SimpleRng,
    ids: &mut TileIdGen,
) -> ResolveStep {
    let size = board.size();
    let mut in_clear = vec![false; size * size];
    let mut cleared_cells = Vec::new();
    for cell in matches.iter().flat_map(|m| m.cells.iter().copied()) {
        let idx = cell.row * size + cell.col;
        if !in_clear[idx] {
            in_clear[idx] = true;
            cleared_cells.push(cell);
        }
    }

    let mut powers_spawned = Vec::new();
    let mut powers_activated = Vec::new();
    if config.power_tiles {
        powers_spawned = claim_power_spawns(board, &matches);
        for spawn in &powers_spawned {
            in_clear[spawn.cell.row * size + spawn.cell.col] = false;
        }
        cleared_cells.retain(|c| in_clear[c.row * size + c.col]);
        powers_activated = trigger_powers(board, &mut in_clear, &mut cleared_cells, &powers_spawned);
    }

    let activated: Vec<PowerType> = powers_activated.iter().map(|a| a.power).collect();
    let score = calculate_step_score(&matches, cascade, &activated);

    board.clear(&cleared_cells);
    for spawn in &powers_spawned {
        board.set_power(spawn.cell, spawn.power);
    }

    let mut movements = board.apply_gravity();
    movements.extend(board.refill(rng, ids, config.token_variety));

    ResolveStep {
        cascade,
        matches,
        cleared_cells,
        points_added: score.total,
        movements,
        powers_spawned,
        powers_activated,
    }
}

/// Pick the tiles that become power tiles this step
///
/// The first match naming a cell wins. A cell already holding a power tile is
/// left in the clear set so that tile fires instead.
fn claim_power_spawns(board: &TileGrid, matches: &[MatchEvent]) -> Vec<PowerSpawn> {
    let mut spawns: Vec<PowerSpawn> = Vec::new();
    for m in matches {
        let (Some(cell), Some(power)) = (m.power_spawn_cell, m.power_type) else {
            continue;
        };
        if spawns.iter().any(|s| s.cell == cell) {
            continue;
        }
        let Some(tile) = board.tile(cell) else {
            continue;
        };
        if tile.power.is_some() {
            continue;
        }
        spawns.push(PowerSpawn {
            cell,
            tile_id: tile.id,
            power,
        });
    }
    spawns
}

/// Fire every power tile in the clear set, chaining through the cells they add
///
/// Spawn cells of this step are never swept up by an activation.
fn trigger_powers(
    board: &TileGrid,
    in_clear: &mut [bool],
    cleared_cells: &mut Vec<Coord>,
    spawns: &[PowerSpawn],
) -> Vec<PowerActivation> {
    let size = board.size();
    let is_spawn = |c: Coord| spawns.iter().any(|s| s.cell == c);
    let mut activations = Vec::new();
    let mut next = 0;

    // cleared_cells grows while we walk it; each cell is inspected once
    while next < cleared_cells.len() {
        let cell = cleared_cells[next];
        next += 1;
        let Some(tile) = board.tile(cell) else {
            continue;
        };
        let Some(power) = tile.power else {
            continue;
        };
        activations.push(PowerActivation {
            cell,
            tile_id: tile.id,
            power,
            bonus: power_activation_bonus(power),
        });
        for target in blast_area(cell, power, size) {
            let idx = target.row * size + target.col;
            if !in_clear[idx] && !is_spawn(target) {
                in_clear[idx] = true;
                cleared_cells.push(target);
            }
        }
    }

    activations
}

/// Cells cleared by a power tile at `cell`
fn blast_area(cell: Coord, power: PowerType, size: usize) -> Vec<Coord> {
    match power {
        PowerType::RowClear => (0..size).map(|col| Coord::new(cell.row, col)).collect(),
        PowerType::ColumnClear => (0..size).map(|row| Coord::new(row, cell.col)).collect(),
        PowerType::Bomb => {
            let rows = cell.row.saturating_sub(1)..=(cell.row + 1).min(size - 1);
            rows.flat_map(|row| {
                let cols = cell.col.saturating_sub(1)..=(cell.col + 1).min(size - 1);
                cols.map(move |col| Coord::new(row, col))
            })
            .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blast_area_shapes() {
        assert_eq!(blast_area(Coord::new(2, 3), PowerType::RowClear, 5).len(), 5);
        assert!(blast_area(Coord::new(2, 3), PowerType::ColumnClear, 5)
            .iter()
            .all(|c| c.col == 3));
        assert_eq!(blast_area(Coord::new(2, 2), PowerType::Bomb, 5).len(), 9);
        // Clipped at the corner
        assert_eq!(blast_area(Coord::new(0, 0), PowerType::Bomb, 5).len(), 4);
    }

    #[test]
    fn test_rejection_codes() {
        assert_eq!(SwapRejection::NotAdjacent.code(), "not_adjacent");
        assert_eq!(SwapRejection::NoMatch.code(), "no_match");
        assert_eq!(SwapRejection::OutOfBounds.code(), "out_of_bounds");
        assert_eq!(SwapRejection::NoMovesLeft.code(), "no_moves_left");
    }
}
