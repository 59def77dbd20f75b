//! Error types for grid access and configuration loading.

use thiserror::Error;

/// Rejected cell access or piece placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i8, y: i8 },

    #[error("cell ({x}, {y}) has no tile")]
    NoTile { x: i8, y: i8 },

    #[error("cell ({x}, {y}) is an obstacle and cannot hold a piece")]
    Obstacle { x: i8, y: i8 },

    #[error("cell ({x}, {y}) already holds a piece")]
    Occupied { x: i8, y: i8 },

    #[error("cell ({x}, {y}) holds no piece")]
    Empty { x: i8, y: i8 },

    #[error("unknown pattern glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: i8, y: i8 },

    #[error("pattern row {row} is {found} cells wide, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    #[error("pattern of {width}x{height} cells must be 1..={max} per side")]
    PatternSize { width: usize, height: usize, max: u8 },
}

/// Invalid board or level configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions {width}x{height} must be within 1..={max}")]
    InvalidDimensions { width: u8, height: u8, max: u8 },

    #[error("piece catalog is empty")]
    EmptyCatalog,

    #[error("starting tile ({x}, {y}) is outside a {width}x{height} board")]
    TileOutOfBounds { x: i8, y: i8, width: u8, height: u8 },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level file: {0}")]
    Json(#[from] serde_json::Error),
}
