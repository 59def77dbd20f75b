//! RNG module - deterministic piece generation
//!
//! Pieces are drawn uniformly from the board's catalog using a simple LCG,
//! so the same seed and the same sequence of swaps always replay the same game.

use crate::piece::{Piece, PieceTemplate};
use crate::types::PieceId;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Current internal state (reusable as a seed)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Creates pieces from a catalog, handing out monotonically increasing ids
#[derive(Debug, Clone)]
pub struct PieceFactory {
    catalog: Vec<PieceTemplate>,
    rng: SimpleRng,
    next_id: u32,
}

impl PieceFactory {
    /// `catalog` must not be empty; board configuration validation enforces it
    pub fn new(catalog: Vec<PieceTemplate>, seed: u32) -> Self {
        Self {
            catalog,
            rng: SimpleRng::new(seed),
            next_id: 0,
        }
    }

    /// Continue id allocation from `next_id` (for boards seeded with existing pieces)
    pub fn starting_at(mut self, next_id: u32) -> Self {
        self.next_id = next_id;
        self
    }

    /// Pick a random template from the catalog
    pub fn draw_template(&mut self) -> Option<PieceTemplate> {
        if self.catalog.is_empty() {
            return None;
        }
        let idx = self.rng.next_range(self.catalog.len() as u32) as usize;
        self.catalog.get(idx).copied()
    }

    /// Create a new random piece
    pub fn spawn(&mut self) -> Option<Piece> {
        let template = self.draw_template()?;
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Some(Piece::from_template(id, template))
    }

    pub fn catalog(&self) -> &[PieceTemplate] {
        &self.catalog
    }

    /// Number of pieces created so far
    pub fn spawned(&self) -> u32 {
        self.next_id
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
