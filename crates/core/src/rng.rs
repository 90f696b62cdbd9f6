//! RNG module - deterministic token draws and tile identity
//!
//! Implements a small LCG used for board generation and refill, so the same seed
//! always produces the same boards and cascades.
//!
//! Also provides the per-session tile id generator. Ids are minted from state
//! carried in the session rather than a process-wide counter, so concurrent
//! sessions never collide.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{TileId, TokenType, TOKEN_KINDS};

/// Disambiguates sessions seeded from the clock within the same tick.
static ENTROPY_SALT: AtomicU32 = AtomicU32::new(0);

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed derived from the wall clock, salted per call
    pub fn entropy_seed() -> u32 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let salt = ENTROPY_SALT.fetch_add(1, Ordering::Relaxed);
        let mixed = (nanos ^ (nanos >> 32)) as u32;
        mixed ^ salt.wrapping_mul(0x9E37_79B9)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw one of the first `variety` tokens
    pub fn next_token(&mut self, variety: usize) -> TokenType {
        let variety = variety.clamp(1, TOKEN_KINDS);
        let index = self.next_range(variety as u32) as usize;
        TokenType::ALL[index]
    }

    /// Current internal state (for replaying a session from this point)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Mints tile ids for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIdGen {
    next: u32,
}

impl TileIdGen {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Generator whose first id is `first`
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Mint the next id
    pub fn mint(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// The id the next call to [`mint`](Self::mint) returns
    pub fn peek(&self) -> TileId {
        TileId(self.next)
    }
}

impl Default for TileIdGen {
    fn default() -> Self {
        Self::new()
    }
}
