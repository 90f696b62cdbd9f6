//! Move oracle - brute-force search over adjacent swaps
//!
//! Cells are visited in row-major order; at each cell the swap with the right
//! neighbour is tried before the swap with the neighbour below. Results are
//! recomputed from scratch on every call.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::{TileGrid, TokenGrid};
use crate::matcher::has_any_match;
use crate::types::Coord;

/// A swap that produces at least one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintMove {
    pub from: Coord,
    pub to: Coord,
}

/// Right then down neighbour of `coord`, skipping those off the board
fn swap_partners(coord: Coord, size: usize) -> ArrayVec<Coord, 2> {
    let mut partners = ArrayVec::new();
    if let Some(right) = coord.right(size) {
        partners.push(right);
    }
    if let Some(down) = coord.down(size) {
        partners.push(down);
    }
    partners
}

/// Visit every matching swap in oracle order until `visit` returns false
fn for_each_matching_swap(grid: &TokenGrid, mut visit: impl FnMut(HintMove) -> bool) {
    let size = grid.size();
    let mut work = grid.clone();
    for row in 0..size {
        for col in 0..size {
            let from = Coord::new(row, col);
            for to in swap_partners(from, size) {
                work.swap(from, to);
                let hit = has_any_match(&work);
                work.swap(from, to);
                if hit && !visit(HintMove { from, to }) {
                    return;
                }
            }
        }
    }
}

/// First matching swap on a token grid, if any
pub fn find_hint_in_tokens(grid: &TokenGrid) -> Option<HintMove> {
    let mut found = None;
    for_each_matching_swap(grid, |hint| {
        found = Some(hint);
        false
    });
    found
}

/// True if some adjacent swap on the token grid produces a match
pub fn tokens_have_valid_move(grid: &TokenGrid) -> bool {
    find_hint_in_tokens(grid).is_some()
}

/// True if some adjacent swap produces a match
pub fn has_any_valid_move(board: &TileGrid) -> bool {
    tokens_have_valid_move(&board.tokens())
}

/// First matching swap in oracle order, or `None` when the board is stuck
pub fn find_hint_move(board: &TileGrid) -> Option<HintMove> {
    find_hint_in_tokens(&board.tokens())
}

/// Every matching swap, in oracle order
pub fn all_valid_moves(board: &TileGrid) -> Vec<HintMove> {
    let mut moves = Vec::new();
    for_each_matching_swap(&board.tokens(), |hint| {
        moves.push(hint);
        true
    });
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::TileIdGen;

    fn tiles(rows: &[&str]) -> TileGrid {
        TileGrid::from_tokens(&TokenGrid::parse(rows).unwrap(), &mut TileIdGen::new())
    }

    #[test]
    fn test_stuck_board_has_no_move() {
        // Four tokens in a pattern no single swap can line up
        let board = tiles(&["RSET", "ETRS", "RSET", "ETRS"]);
        assert!(!has_any_valid_move(&board));
        assert_eq!(find_hint_move(&board), None);
        assert!(all_valid_moves(&board).is_empty());
    }

    #[test]
    fn test_hint_prefers_right_swap_in_row_major_order() {
        // Only swapping (0,2)<->(0,3) lines up RRR on row 0
        let board = tiles(&["RRSR", "SEAT", "ATSE", "TSEA"]);
        let hint = find_hint_move(&board).unwrap();
        assert_eq!(
            hint,
            HintMove {
                from: Coord::new(0, 2),
                to: Coord::new(0, 3),
            }
        );
        assert!(has_any_valid_move(&board));
    }

    #[test]
    fn test_all_valid_moves_starts_with_hint() {
        let board = tiles(&["RRSR", "SEAT", "ATSE", "TSEA"]);
        let moves = all_valid_moves(&board);
        assert_eq!(moves.first().copied(), find_hint_move(&board));
        for m in &moves {
            assert!(m.from.is_adjacent(m.to));
        }
    }
}
