//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond small helpers, making them
//! usable in any context (grid logic, board engine, front ends, level files).
//!
//! # Board Coordinates
//!
//! - **x**: column, `0..width` (left to right)
//! - **y**: row, `0..height` (bottom to top); pieces fall toward `y = 0`
//! - Coordinates are `i8` so walks may step off the edge and be rejected.
//! - Dimensions are limited to [`MAX_BOARD_DIM`] in both axes.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and only shape how long the engine stays
//! in each animated phase:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested host frame interval (~60 FPS) |
//! | `SWAP_MS` | 500 | Swap (and swap-back) animation |
//! | `CLEAR_MS` | 250 | Pause after matched pieces are cleared |
//! | `COLLAPSE_MS_PER_CELL` | 500 | Fall time per cell of drop distance |
//! | `REFILL_MS` | 500 | Drop-in time for refilled pieces |
//! | `SETTLE_MS` | 500 | Pause after the last pass before input returns |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Coord, Direction, MatchValue, TileType};
//!
//! let value = MatchValue::from_str("red").unwrap();
//! assert!(value.matches(MatchValue::Wild));
//! assert!(!value.matches(MatchValue::Blue));
//!
//! let a = Coord::new(3, 3);
//! assert_eq!(a.step(Direction::Right), Coord::new(4, 3));
//! assert!(a.is_adjacent(Coord::new(3, 4)));
//! assert!(!a.is_adjacent(Coord::new(4, 4)));
//!
//! assert_eq!(TileType::from_str("obstacle"), Some(TileType::Obstacle));
//! ```

use serde::{Deserialize, Serialize};

/// Largest supported width or height
pub const MAX_BOARD_DIM: u8 = 32;

/// Default board width
pub const DEFAULT_WIDTH: u8 = 8;

/// Default board height
pub const DEFAULT_HEIGHT: u8 = 8;

/// Default presentation margin around the board (in cells)
pub const DEFAULT_BORDER_SIZE: u8 = 2;

/// Minimum run length that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Resample budget per cell while filling the board at setup
pub const FILL_MAX_ATTEMPTS: u32 = 100;

/// Points awarded per cleared piece unless the catalog overrides it
pub const DEFAULT_SCORE_VALUE: u32 = 20;

/// Moves granted to a fresh session
pub const DEFAULT_MOVES: u32 = 30;

/// Score needed to win a fresh session
pub const DEFAULT_SCORE_GOAL: u32 = 10_000;

/// Suggested host frame interval (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Swap animation duration
pub const SWAP_MS: u32 = 500;

/// Pause after clearing a pass's matches
pub const CLEAR_MS: u32 = 250;

/// Collapse duration per cell of fall distance
pub const COLLAPSE_MS_PER_CELL: u32 = 500;

/// Refill drop-in duration
pub const REFILL_MS: u32 = 500;

/// Pause after the final pass before input is re-enabled
pub const SETTLE_MS: u32 = 500;

/// Rows above the board a refilled piece visually falls from
pub const REFILL_DROP_OFFSET: u8 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_defaults() {
        assert_eq!(MIN_MATCH_LEN, 3);
        assert_eq!(FILL_MAX_ATTEMPTS, 100);
        assert_eq!(DEFAULT_SCORE_VALUE, 20);
        assert_eq!(DEFAULT_MOVES, 30);
        assert_eq!(DEFAULT_SCORE_GOAL, 10_000);
        assert!(DEFAULT_WIDTH <= MAX_BOARD_DIM);
        assert!(DEFAULT_HEIGHT <= MAX_BOARD_DIM);
    }

    #[test]
    fn wild_matches_everything() {
        for value in MatchValue::ALL {
            assert!(MatchValue::Wild.matches(value));
            assert!(value.matches(MatchValue::Wild));
        }
        assert!(!MatchValue::Red.matches(MatchValue::Cyan));
    }

    #[test]
    fn adjacency_is_orthogonal_only() {
        let c = Coord::new(2, 2);
        for dir in Direction::ALL {
            assert!(c.is_adjacent(c.step(dir)));
        }
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(Coord::new(4, 2)));
    }
}

/// Categorical tag deciding which pieces can share a run
///
/// - **Colors**: ordinary values that only match themselves
/// - **Wild**: matches every value, including another wild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchValue {
    Yellow,
    Blue,
    Magenta,
    Indigo,
    Green,
    Teal,
    Red,
    Cyan,
    Orange,
    Wild,
}

impl MatchValue {
    /// Every value, wild last
    pub const ALL: [MatchValue; 10] = [
        MatchValue::Yellow,
        MatchValue::Blue,
        MatchValue::Magenta,
        MatchValue::Indigo,
        MatchValue::Green,
        MatchValue::Teal,
        MatchValue::Red,
        MatchValue::Cyan,
        MatchValue::Orange,
        MatchValue::Wild,
    ];

    pub fn is_wild(self) -> bool {
        self == MatchValue::Wild
    }

    /// Whether two pieces with these values can sit in the same run
    pub fn matches(self, other: MatchValue) -> bool {
        self == other || self.is_wild() || other.is_wild()
    }

    /// Parse match value from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::MatchValue;
    ///
    /// assert_eq!(MatchValue::from_str("Teal"), Some(MatchValue::Teal));
    /// assert_eq!(MatchValue::from_str("wild"), Some(MatchValue::Wild));
    /// assert_eq!(MatchValue::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yellow" => Some(MatchValue::Yellow),
            "blue" => Some(MatchValue::Blue),
            "magenta" => Some(MatchValue::Magenta),
            "indigo" => Some(MatchValue::Indigo),
            "green" => Some(MatchValue::Green),
            "teal" => Some(MatchValue::Teal),
            "red" => Some(MatchValue::Red),
            "cyan" => Some(MatchValue::Cyan),
            "orange" => Some(MatchValue::Orange),
            "wild" => Some(MatchValue::Wild),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchValue::Yellow => "yellow",
            MatchValue::Blue => "blue",
            MatchValue::Magenta => "magenta",
            MatchValue::Indigo => "indigo",
            MatchValue::Green => "green",
            MatchValue::Teal => "teal",
            MatchValue::Red => "red",
            MatchValue::Cyan => "cyan",
            MatchValue::Orange => "orange",
            MatchValue::Wild => "wild",
        }
    }

    /// Parse a glyph produced by [`MatchValue::glyph`]
    pub fn from_glyph(c: char) -> Option<Self> {
        MatchValue::ALL.into_iter().find(|v| v.glyph() == c)
    }

    /// Single-character glyph used by text dumps
    pub fn glyph(&self) -> char {
        match self {
            MatchValue::Yellow => 'Y',
            MatchValue::Blue => 'B',
            MatchValue::Magenta => 'M',
            MatchValue::Indigo => 'I',
            MatchValue::Green => 'G',
            MatchValue::Teal => 'T',
            MatchValue::Red => 'R',
            MatchValue::Cyan => 'C',
            MatchValue::Orange => 'O',
            MatchValue::Wild => '*',
        }
    }
}

/// Kind of tile under a cell
///
/// - **Normal**: accepts pieces
/// - **Obstacle**: never holds a piece and blocks pieces falling through it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    #[default]
    Normal,
    Obstacle,
}

impl TileType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(TileType::Normal),
            "obstacle" => Some(TileType::Obstacle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Normal => "normal",
            TileType::Obstacle => "obstacle",
        }
    }

    pub fn accepts_piece(&self) -> bool {
        matches!(self, TileType::Normal)
    }
}

/// The four axis directions a run can be scanned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)`; `Up` increases `y`
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate in `dir` (may be off the board)
    pub fn step(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    /// The coordinate `distance` cells away in `dir`
    pub fn offset(self, dir: Direction, distance: i8) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(distance)),
            y: self.y.saturating_add(dy.saturating_mul(distance)),
        }
    }

    pub fn manhattan(self, other: Coord) -> u16 {
        let dx = (self.x as i16 - other.x as i16).unsigned_abs();
        let dy = (self.y as i16 - other.y as i16).unsigned_abs();
        dx + dy
    }

    /// Orthogonal neighbours only; diagonals and the cell itself are not adjacent
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i8, i8)> for Coord {
    fn from((x, y): (i8, i8)) -> Self {
        Self { x, y }
    }
}

/// Stable identity of a piece for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Event raised by the board engine, drained by the host and the session.
///
/// Coordinates refer to the board state right after the change was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    /// A new piece was created at `(x, y)` by setup fill or refill
    PieceSpawned {
        x: i8,
        y: i8,
        match_value: MatchValue,
        /// Rows above `y` the piece should visually drop in from
        drop_from: u8,
    },
    /// A piece now owned by `(x, y)` used to be at `(from_x, from_y)`
    PieceMoved {
        x: i8,
        y: i8,
        from_x: i8,
        from_y: i8,
        duration_ms: u32,
    },
    /// A matched piece was destroyed
    PieceCleared { x: i8, y: i8, match_value: MatchValue },
    /// Setup could not find a match-free piece for a cell
    FillExhausted { x: i8, y: i8 },
    /// A swap produced no match and has been put back
    SwapReverted { a: Coord, b: Coord },
    /// A swap produced a match; it costs a move
    SwapConsumed { a: Coord, b: Coord },
    /// Total of one cascade pass, raised right after its `PieceCleared` events
    PassScored {
        pieces: u32,
        score_sum: u32,
        /// 1 for the swap's own matches, +1 for each chained pass
        cascade: u32,
    },
    /// The clear/collapse/refill cycle ended with no further matches
    CycleFinished { passes: u32 },
}

/// Event raised by the game session in reaction to board events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    ScoreChanged { score: u32 },
    MoveConsumed { moves_remaining: u32 },
    ScoreGoalReached { score: u32, goal: u32 },
    MovesExhausted,
    GameOver { winner: bool },
}
