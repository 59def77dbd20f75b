//! Configuration models for boards, timing and sessions.
//!
//! Every struct deserializes from JSON with defaults for missing fields, so a
//! level file only needs to spell out what differs from the standard game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::piece::PieceTemplate;
use crate::types::{
    MatchValue, TileType, CLEAR_MS, COLLAPSE_MS_PER_CELL, DEFAULT_BORDER_SIZE, DEFAULT_HEIGHT,
    DEFAULT_MOVES, DEFAULT_SCORE_GOAL, DEFAULT_WIDTH, MAX_BOARD_DIM, REFILL_MS, SETTLE_MS, SWAP_MS,
};

/// A non-default tile placed before the rest of the board is tiled Normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingTile {
    pub x: i8,
    pub y: i8,
    pub tile: TileType,
}

/// Board layout and piece catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    /// Margin a front end leaves around the board; the engine only carries it
    pub border_size: u8,
    /// Applied in order, so a later entry for the same cell wins
    pub starting_tiles: Vec<StartingTile>,
    pub pieces: Vec<PieceTemplate>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            border_size: DEFAULT_BORDER_SIZE,
            starting_tiles: Vec::new(),
            pieces: [
                MatchValue::Yellow,
                MatchValue::Blue,
                MatchValue::Magenta,
                MatchValue::Indigo,
                MatchValue::Green,
                MatchValue::Teal,
            ]
            .into_iter()
            .map(PieceTemplate::new)
            .collect(),
        }
    }
}

impl BoardConfig {
    /// Default catalog on a custom-sized board
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims_ok = |d: u8| (1..=MAX_BOARD_DIM).contains(&d);
        if !dims_ok(self.width) || !dims_ok(self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_DIM,
            });
        }

        if self.pieces.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        for tile in &self.starting_tiles {
            let in_bounds = tile.x >= 0
                && (tile.x as i16) < self.width as i16
                && tile.y >= 0
                && (tile.y as i16) < self.height as i16;
            if !in_bounds {
                return Err(ConfigError::TileOutOfBounds {
                    x: tile.x,
                    y: tile.y,
                    width: self.width,
                    height: self.height,
                });
            }
        }

        Ok(())
    }
}

/// How long the engine waits in each animated phase (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub swap_ms: u32,
    pub clear_ms: u32,
    pub collapse_ms_per_cell: u32,
    pub refill_ms: u32,
    pub settle_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            swap_ms: SWAP_MS,
            clear_ms: CLEAR_MS,
            collapse_ms_per_cell: COLLAPSE_MS_PER_CELL,
            refill_ms: REFILL_MS,
            settle_ms: SETTLE_MS,
        }
    }
}

impl TimingConfig {
    /// No waits at all: a single tick resolves a whole cycle
    pub fn instant() -> Self {
        Self {
            swap_ms: 0,
            clear_ms: 0,
            collapse_ms_per_cell: 0,
            refill_ms: 0,
            settle_ms: 0,
        }
    }
}

/// Win/lose rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub moves: u32,
    pub score_goal: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            moves: DEFAULT_MOVES,
            score_goal: DEFAULT_SCORE_GOAL,
        }
    }
}

/// Everything needed to start a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub seed: u32,
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub session: SessionConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            board: BoardConfig::default(),
            timing: TimingConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl LevelConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let level: LevelConfig = serde_json::from_str(json)?;
        level.board.validate()?;
        Ok(level)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
