//! Board module - manages the tile grid
//!
//! The board is a square N x N grid (N = 9 by default) stored as a flat
//! row-major vector. Two views exist:
//!
//! - [`TokenGrid`]: tokens only, used by match detection and the move oracle
//! - [`TileGrid`]: full tiles with stable ids and powers, owned by the game state
//!
//! A `TileGrid` is converted to a `TokenGrid` with [`TileGrid::tokens`].
//! Coordinates are `(row, col)`; row 0 is the top, gravity pulls towards the
//! last row.

use std::fmt;

use crate::config::EngineConfig;
use crate::rng::{SimpleRng, TileIdGen};
use crate::types::{Coord, PowerType, Tile, TileCell, TileMovement, TokenCell, TokenType};

/// True iff `a` and `b` are orthogonal neighbours
pub fn adjacent(a: Coord, b: Coord) -> bool {
    a.is_adjacent(b)
}

/// Token-only view of a board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenGrid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<TokenCell>,
}

impl TokenGrid {
    /// Create an empty grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Draw a board free of pre-made runs (best effort)
    ///
    /// Cells are filled in row-major order. A draw that would complete a run of
    /// three with the two cells to its left, or the two cells above it, is
    /// redrawn up to `max_token_redraws` times; after that the last draw stands.
    pub fn generate(config: &EngineConfig, rng: &mut SimpleRng) -> Self {
        let mut grid = Self::new(config.grid_size);
        for row in 0..grid.size {
            for col in 0..grid.size {
                let mut token = rng.next_token(config.token_variety);
                let mut redraws = 0;
                while redraws < config.max_token_redraws && grid.completes_run(row, col, token) {
                    token = rng.next_token(config.token_variety);
                    redraws += 1;
                }
                grid.cells[row * grid.size + col] = Some(token);
            }
        }
        grid
    }

    /// Build from board literal rows such as `"RSEAT"`; `.` is an empty cell
    ///
    /// Returns `None` unless the rows form a square of known token codes.
    pub fn parse(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let mut grid = Self::new(size);
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != size {
                return None;
            }
            for (col, c) in chars.into_iter().enumerate() {
                grid.cells[row * size + col] = match c {
                    '.' => None,
                    other => Some(TokenType::from_char(other)?),
                };
            }
        }
        Some(grid)
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        coord
            .in_bounds(self.size)
            .then(|| coord.row * self.size + coord.col)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at `coord`
    /// Returns None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<TokenCell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Token at `coord`, `None` when empty or out of bounds
    pub fn token(&self, coord: Coord) -> Option<TokenType> {
        self.get(coord).flatten()
    }

    /// Set cell at `coord`
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: TokenCell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two cells
    /// Returns false (and leaves the grid untouched) if either is out of bounds
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    pub fn cells(&self) -> &[TokenCell] {
        &self.cells
    }

    /// Would placing `token` at (row, col) complete a run with the cells
    /// already placed to the left or above?
    fn completes_run(&self, row: usize, col: usize, token: TokenType) -> bool {
        let at = |r: usize, c: usize| self.cells[r * self.size + c];
        let horizontal = col >= 2 && at(row, col - 1) == Some(token) && at(row, col - 2) == Some(token);
        let vertical = row >= 2 && at(row - 1, col) == Some(token) && at(row - 2, col) == Some(token);
        horizontal || vertical
    }
}

impl fmt::Display for TokenGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                let c = cell.map(|t| t.as_char()).unwrap_or('.');
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Full board of tiles, exclusively owned by one game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    size: usize,
    cells: Vec<TileCell>,
}

impl TileGrid {
    /// Create an empty grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Draw a fresh board (see [`TokenGrid::generate`]) and mint ids for it
    pub fn generate(config: &EngineConfig, rng: &mut SimpleRng, ids: &mut TileIdGen) -> Self {
        Self::from_tokens(&TokenGrid::generate(config, rng), ids)
    }

    /// Wrap every token in a new tile, minting ids in row-major order
    pub fn from_tokens(tokens: &TokenGrid, ids: &mut TileIdGen) -> Self {
        let cells = tokens
            .cells()
            .iter()
            .map(|cell| cell.map(|token| Tile::new(ids.mint(), token)))
            .collect();
        Self {
            size: tokens.size(),
            cells,
        }
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        coord
            .in_bounds(self.size)
            .then(|| coord.row * self.size + coord.col)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at `coord`
    /// Returns None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<TileCell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Tile at `coord`, `None` when empty or out of bounds
    pub fn tile(&self, coord: Coord) -> Option<Tile> {
        self.get(coord).flatten()
    }

    /// Set cell at `coord`
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: TileCell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two cells in place
    /// Returns false (and leaves the grid untouched) if either is out of bounds
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Empty the given cells, returning how many held a tile
    pub fn clear(&mut self, coords: &[Coord]) -> usize {
        let mut cleared = 0;
        for &coord in coords {
            if let Some(idx) = self.index(coord) {
                if self.cells[idx].take().is_some() {
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Give the tile at `coord` a power
    /// Returns false if the cell is empty or out of bounds
    pub fn set_power(&mut self, coord: Coord, power: PowerType) -> bool {
        match self.index(coord).and_then(|idx| self.cells[idx].as_mut()) {
            Some(tile) => {
                tile.power = Some(power);
                true
            }
            None => false,
        }
    }

    /// Token-only view for match detection
    pub fn tokens(&self) -> TokenGrid {
        TokenGrid {
            size: self.size,
            cells: self.cells.iter().map(|cell| cell.map(|t| t.token)).collect(),
        }
    }

    /// Drop every tile in each column as far down as it goes
    ///
    /// Relative order within a column is preserved. Returns one movement per
    /// tile whose row changed; vacated cells are left empty at the top.
    pub fn apply_gravity(&mut self) -> Vec<TileMovement> {
        let size = self.size;
        let mut movements = Vec::new();

        for col in 0..size {
            // Two-pointer compaction from the bottom up
            let mut write_row = size;
            for read_row in (0..size).rev() {
                let read_idx = read_row * size + col;
                let Some(tile) = self.cells[read_idx] else {
                    continue;
                };
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row * size + col] = Some(tile);
                    self.cells[read_idx] = None;
                    movements.push(TileMovement {
                        tile_id: tile.id,
                        col,
                        from_row: read_row as i32,
                        to_row: write_row,
                        is_new: false,
                    });
                }
            }
        }

        movements
    }

    /// Spawn new tiles into the empty cells at the top of each column
    ///
    /// Columns are filled left to right, each top to bottom. With `k` empty
    /// cells in a column, the tile landing on row `r` starts at `r - k`, so the
    /// lowest spawn enters from one row above the grid.
    pub fn refill(
        &mut self,
        rng: &mut SimpleRng,
        ids: &mut TileIdGen,
        token_variety: usize,
    ) -> Vec<TileMovement> {
        let size = self.size;
        let mut movements = Vec::new();

        for col in 0..size {
            let empty = (0..size)
                .take_while(|&row| self.cells[row * size + col].is_none())
                .count();
            for row in 0..empty {
                let tile = Tile::new(ids.mint(), rng.next_token(token_variety));
                self.cells[row * size + col] = Some(tile);
                movements.push(TileMovement {
                    tile_id: tile.id,
                    col,
                    from_row: row as i32 - empty as i32,
                    to_row: row,
                    is_new: true,
                });
            }
        }

        movements
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    pub fn cells(&self) -> &[TileCell] {
        &self.cells
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[TileCell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Largest id on the board, if any tile is present
    pub fn max_id(&self) -> Option<u32> {
        self.cells.iter().flatten().map(|tile| tile.id.0).max()
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tokens(), f)
    }
}
