//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the board engine.
//! All types are plain data with no behaviour beyond small helpers, making them
//! usable in any context (core logic, session driver, presentation layer).
//!
//! # Board Dimensions
//!
//! The playfield is a square grid:
//!
//! - **Size**: 9x9 by default (`GRID_SIZE`), fixed for the lifetime of a session
//! - **Coordinates**: `(row, col)`, 0-indexed, row 0 at the top
//! - **Storage**: row-major
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 9 | Default board side length |
//! | `TOKEN_VARIETY` | 6 | Default number of spawnable token kinds |
//! | `STARTING_MOVES` | 30 | Moves granted to a new session |
//! | `MAX_GENERATION_ATTEMPTS` | 100 | Board regenerations before accepting best effort |
//! | `MAX_TOKEN_REDRAWS` | 50 | Redraws per cell while avoiding a pre-made run |
//! | `MAX_CASCADE_STEPS` | 64 | Safety cap on cascade iterations per swap |
//!
//! # Scoring Tables
//!
//! | Match length | Points |
//! |--------------|--------|
//! | 3 | 100 |
//! | 4 | 200 |
//! | 5 | 400 |
//! | 6+ | 400 + 150 per extra tile |
//!
//! Cascade steps multiply the base points by 1.0, 1.25, 1.5, 1.75 and then 2.0 (capped).
//!
//! # Examples
//!
//! ```
//! use match3_types::{Coord, TokenType, GRID_SIZE};
//!
//! let token = TokenType::from_str("ruby").unwrap();
//! assert_eq!(token, TokenType::Ruby);
//!
//! let a = Coord::new(4, 4);
//! assert!(a.is_adjacent(Coord::new(4, 5)));
//! assert!(!a.is_adjacent(Coord::new(5, 5)));
//!
//! assert_eq!(GRID_SIZE, 9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board side length (9x9)
pub const GRID_SIZE: usize = 9;

/// Total number of token kinds that exist
pub const TOKEN_KINDS: usize = 8;

/// Default number of active (spawnable) token kinds
pub const TOKEN_VARIETY: usize = 6;

/// Moves granted to a freshly created session
pub const STARTING_MOVES: u32 = 30;

/// Full-board generation attempts before the best-effort board is accepted
pub const MAX_GENERATION_ATTEMPTS: u32 = 100;

/// Redraws per cell while avoiding a pre-made run of three
pub const MAX_TOKEN_REDRAWS: u32 = 50;

/// Hard cap on cascade iterations for a single swap
pub const MAX_CASCADE_STEPS: u32 = 64;

/// Shortest run that counts as a match
pub const MIN_MATCH_LENGTH: usize = 3;

/// Base points by match length (index = length, lengths 3..=5)
pub const MATCH_SCORES: [u32; 6] = [0, 0, 0, 100, 200, 400];

/// Extra points per tile beyond a 5-long match
pub const LONG_MATCH_STEP: u32 = 150;

/// Cascade multipliers expressed in quarters (step 1 = 4/4 .. step 5+ = 8/4)
pub const CASCADE_QUARTERS: [u32; 5] = [4, 5, 6, 7, 8];

/// Bonus for triggering a row-clear or column-clear tile
pub const LINE_CLEAR_BONUS: u32 = 150;

/// Bonus for triggering a bomb tile
pub const BOMB_BONUS: u32 = 250;

/// The symbolic kinds painted on tiles
///
/// Only the first `token_variety` kinds (in declaration order) are spawned;
/// the remainder exist so difficulty can be tuned without changing the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Ruby,
    Sapphire,
    Emerald,
    Topaz,
    Amethyst,
    Pearl,
    Onyx,
    Opal,
}

impl TokenType {
    /// Every token kind, in spawn order
    pub const ALL: [TokenType; TOKEN_KINDS] = [
        TokenType::Ruby,
        TokenType::Sapphire,
        TokenType::Emerald,
        TokenType::Topaz,
        TokenType::Amethyst,
        TokenType::Pearl,
        TokenType::Onyx,
        TokenType::Opal,
    ];

    /// Token at `index` in spawn order, if any
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this token in spawn order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse token from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::TokenType;
    ///
    /// assert_eq!(TokenType::from_str("Opal"), Some(TokenType::Opal));
    /// assert_eq!(TokenType::from_str("granite"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ruby" => Some(TokenType::Ruby),
            "sapphire" => Some(TokenType::Sapphire),
            "emerald" => Some(TokenType::Emerald),
            "topaz" => Some(TokenType::Topaz),
            "amethyst" => Some(TokenType::Amethyst),
            "pearl" => Some(TokenType::Pearl),
            "onyx" => Some(TokenType::Onyx),
            "opal" => Some(TokenType::Opal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Ruby => "ruby",
            TokenType::Sapphire => "sapphire",
            TokenType::Emerald => "emerald",
            TokenType::Topaz => "topaz",
            TokenType::Amethyst => "amethyst",
            TokenType::Pearl => "pearl",
            TokenType::Onyx => "onyx",
            TokenType::Opal => "opal",
        }
    }

    /// Single-character code used in board literals and debug output
    ///
    /// Onyx is `X` so it does not collide with Opal's `O`.
    pub fn as_char(&self) -> char {
        match self {
            TokenType::Ruby => 'R',
            TokenType::Sapphire => 'S',
            TokenType::Emerald => 'E',
            TokenType::Topaz => 'T',
            TokenType::Amethyst => 'A',
            TokenType::Pearl => 'P',
            TokenType::Onyx => 'X',
            TokenType::Opal => 'O',
        }
    }

    /// Inverse of [`as_char`](Self::as_char) (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(TokenType::Ruby),
            'S' => Some(TokenType::Sapphire),
            'E' => Some(TokenType::Emerald),
            'T' => Some(TokenType::Topaz),
            'A' => Some(TokenType::Amethyst),
            'P' => Some(TokenType::Pearl),
            'X' => Some(TokenType::Onyx),
            'O' => Some(TokenType::Opal),
            _ => None,
        }
    }
}

/// Special ability carried by a tile spawned from a long match
///
/// - **RowClear**: clears its whole row when triggered (from a horizontal 4-match)
/// - **ColumnClear**: clears its whole column when triggered (from a vertical 4-match)
/// - **Bomb**: clears the 3x3 block around it when triggered (from a 5+ match)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerType {
    RowClear,
    ColumnClear,
    Bomb,
}

impl PowerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerType::RowClear => "rowClear",
            PowerType::ColumnClear => "columnClear",
            PowerType::Bomb => "bomb",
        }
    }
}

/// A board position, 0-indexed, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True iff both axes are within `[0, size)`
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// True iff the Manhattan distance is exactly 1 (orthogonal neighbours only)
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Neighbour to the right, if inside a board of `size`
    pub fn right(self, size: usize) -> Option<Coord> {
        (self.col + 1 < size).then(|| Coord::new(self.row, self.col + 1))
    }

    /// Neighbour below, if inside a board of `size`
    pub fn down(self, size: usize) -> Option<Coord> {
        (self.row + 1 < size).then(|| Coord::new(self.row + 1, self.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Stable identity of a tile, unique within a session
///
/// Assigned once when the tile is created and never changed. The presentation
/// layer uses it as the join key between successive boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A placed token with a stable identity and optional power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub token: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerType>,
}

impl Tile {
    pub fn new(id: TileId, token: TokenType) -> Self {
        Self {
            id,
            token,
            power: None,
        }
    }
}

/// Where a tile visually came from during one cascade step
///
/// `from_row` is negative for freshly spawned tiles (distance above the grid);
/// `is_new` distinguishes spawns from falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMovement {
    pub tile_id: TileId,
    pub col: usize,
    pub from_row: i32,
    pub to_row: usize,
    pub is_new: bool,
}

/// A cell of the token-only view
///
/// - `None`: empty cell (mid-resolution only)
/// - `Some(TokenType)`: occupied
pub type TokenCell = Option<TokenType>;

/// A cell of the full tile grid
pub type TileCell = Option<Tile>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_table_defaults() {
        assert_eq!(MATCH_SCORES[3], 100);
        assert_eq!(MATCH_SCORES[4], 200);
        assert_eq!(MATCH_SCORES[5], 400);
        assert_eq!(LONG_MATCH_STEP, 150);
        assert_eq!(CASCADE_QUARTERS, [4, 5, 6, 7, 8]);
        assert_eq!(LINE_CLEAR_BONUS, 150);
        assert_eq!(BOMB_BONUS, 250);
    }

    #[test]
    fn token_index_roundtrip() {
        for (i, token) in TokenType::ALL.iter().enumerate() {
            assert_eq!(token.index(), i);
            assert_eq!(TokenType::from_index(i), Some(*token));
            assert_eq!(TokenType::from_str(token.as_str()), Some(*token));
            assert_eq!(TokenType::from_char(token.as_char()), Some(*token));
        }
        assert_eq!(TokenType::from_char('.'), None);
        assert_eq!(TokenType::from_index(TOKEN_KINDS), None);
    }

    #[test]
    fn adjacency_is_orthogonal_only() {
        let c = Coord::new(3, 3);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(4, 3)));
        assert!(c.is_adjacent(Coord::new(3, 2)));
        assert!(c.is_adjacent(Coord::new(3, 4)));

        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 4)));
        assert!(!c.is_adjacent(Coord::new(3, 5)));
    }

    #[test]
    fn neighbours_respect_bounds() {
        assert_eq!(Coord::new(0, 8).right(9), None);
        assert_eq!(Coord::new(8, 0).down(9), None);
        assert_eq!(Coord::new(0, 0).right(9), Some(Coord::new(0, 1)));
        assert_eq!(Coord::new(0, 0).down(9), Some(Coord::new(1, 0)));
        assert!(!Coord::new(9, 0).in_bounds(9));
    }

    #[test]
    fn tile_serializes_without_absent_power() {
        let tile = Tile::new(TileId(7), TokenType::Topaz);
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(json, r#"{"id":7,"token":"topaz"}"#);

        let powered = Tile {
            power: Some(PowerType::Bomb),
            ..tile
        };
        let json = serde_json::to_string(&powered).unwrap();
        assert_eq!(json, r#"{"id":7,"token":"topaz","power":"bomb"}"#);
    }
}
