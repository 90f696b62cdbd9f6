//! Match detection over the token-only view
//!
//! Runs are found in two passes:
//!
//! 1. **Horizontal**: each row left to right. A maximal run of 3+ is reported
//!    only if none of its cells were claimed by an earlier run; its cells are
//!    then claimed.
//! 2. **Vertical**: each column top to bottom. Every maximal run of 3+ is
//!    reported; the claim set is NOT consulted.
//!
//! The passes are deliberately asymmetric: an L, T or + shape is reported as
//! two overlapping events sharing the corner cell. Consumers dedupe cells when
//! clearing, and score each event separately.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::TokenGrid;
use crate::types::{Coord, PowerType, TokenType, MIN_MATCH_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One axis-aligned run of 3+ identical tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub token: TokenType,
    pub length: usize,
    pub axis: Axis,
    /// Cells in scan order (left to right, or top to bottom)
    pub cells: Vec<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_spawn_cell: Option<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_type: Option<PowerType>,
}

impl MatchEvent {
    fn new(token: TokenType, axis: Axis, cells: Vec<Coord>) -> Self {
        let (power_spawn_cell, power_type) = classify_power(&cells, axis == Axis::Horizontal);
        Self {
            token,
            length: cells.len(),
            axis,
            cells,
            power_spawn_cell,
            power_type,
        }
    }
}

/// Power tile earned by a run, and where it spawns
///
/// - 5+ tiles: bomb
/// - 4 tiles: row-clear when horizontal, column-clear when vertical
/// - 3 tiles: nothing
///
/// The spawn cell is the middle of the run (`cells[len / 2]`).
pub fn classify_power(cells: &[Coord], horizontal: bool) -> (Option<Coord>, Option<PowerType>) {
    let power = match cells.len() {
        0..=3 => return (None, None),
        4 if horizontal => PowerType::RowClear,
        4 => PowerType::ColumnClear,
        _ => PowerType::Bomb,
    };
    (Some(cells[cells.len() / 2]), Some(power))
}

/// All runs on the grid, horizontal events first
pub fn find_matches(grid: &TokenGrid) -> Vec<MatchEvent> {
    let size = grid.size();
    let mut claimed = vec![false; size * size];
    let mut matches = Vec::new();

    for row in 0..size {
        for (token, start, len) in runs(size, |i| grid.token(Coord::new(row, i))) {
            let cells: Vec<Coord> = (start..start + len).map(|col| Coord::new(row, col)).collect();
            if cells.iter().any(|c| claimed[c.row * size + c.col]) {
                continue;
            }
            for c in &cells {
                claimed[c.row * size + c.col] = true;
            }
            matches.push(MatchEvent::new(token, Axis::Horizontal, cells));
        }
    }

    for col in 0..size {
        for (token, start, len) in runs(size, |i| grid.token(Coord::new(i, col))) {
            let cells = (start..start + len).map(|row| Coord::new(row, col)).collect();
            matches.push(MatchEvent::new(token, Axis::Vertical, cells));
        }
    }

    matches
}

/// True if the grid holds any run of 3+, without allocating events
pub fn has_any_match(grid: &TokenGrid) -> bool {
    let size = grid.size();
    (0..size).any(|row| !runs(size, |i| grid.token(Coord::new(row, i))).is_empty())
        || (0..size).any(|col| !runs(size, |i| grid.token(Coord::new(i, col))).is_empty())
}

/// Maximal runs of length >= 3 along one line as `(token, start, length)`
///
/// Empty cells never take part in a run.
fn runs(
    len: usize,
    at: impl Fn(usize) -> Option<TokenType>,
) -> ArrayVec<(TokenType, usize, usize), 16> {
    let mut out = ArrayVec::new();
    let mut start = 0;
    while start < len {
        let Some(token) = at(start) else {
            start += 1;
            continue;
        };
        let mut end = start + 1;
        while end < len && at(end) == Some(token) {
            end += 1;
        }
        if end - start >= MIN_MATCH_LENGTH {
            out.push((token, start, end - start));
        }
        start = end;
    }
    out
}
