//! Core match-3 logic - pure, deterministic, and testable
//!
//! This crate holds the board data structure and the rules that read it.
//! It has **no dependencies** on rendering, input or timing, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Grids can be written out as text patterns
//! - **Portable**: Usable by any front end or a headless driver
//!
//! # Module Structure
//!
//! - [`grid`]: `width x height` cells with tiles, pieces and column collapse
//! - [`finder`]: run scanning and match detection through cells
//! - [`piece`]: pieces and the catalog templates they are created from
//! - [`rng`]: LCG random source and the piece factory
//! - [`scoring`]: per-pass points with cascade multipliers
//! - [`config`]: board, timing, session and level configuration
//! - [`error`]: grid and configuration errors
//!
//! # Example
//!
//! ```
//! use match3_core::{finder, Grid};
//!
//! let grid = Grid::from_pattern(&[
//!     "GBY",
//!     "RRR",
//! ]).unwrap();
//!
//! let matches = finder::matches_through_cell(&grid, 1, 0);
//! assert_eq!(matches.len(), 3);
//! ```

pub mod config;
pub mod error;
pub mod finder;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use config::{BoardConfig, LevelConfig, SessionConfig, StartingTile, TimingConfig};
pub use error::{ConfigError, GridError};
pub use finder::{MatchSet, Run};
pub use grid::{Cell, Grid, PieceMove};
pub use piece::{Piece, PieceTemplate};
pub use rng::{PieceFactory, SimpleRng};
pub use scoring::{calculate_pass_score, PassTally, ScoreResult};
