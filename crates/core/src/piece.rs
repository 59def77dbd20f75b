//! Pieces - the colored tokens that occupy Normal cells.

use serde::{Deserialize, Serialize};

use crate::types::{Coord, MatchValue, PieceId, DEFAULT_SCORE_VALUE};

/// One entry of the piece catalog a board draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTemplate {
    pub match_value: MatchValue,
    #[serde(default = "default_score_value")]
    pub score_value: u32,
}

fn default_score_value() -> u32 {
    DEFAULT_SCORE_VALUE
}

impl PieceTemplate {
    pub fn new(match_value: MatchValue) -> Self {
        Self {
            match_value,
            score_value: DEFAULT_SCORE_VALUE,
        }
    }
}

/// A piece on the board.
///
/// The stored coordinates are written only by [`Grid`](crate::grid::Grid) when the
/// piece is placed or moved, so they always agree with the owning cell.
/// Pieces are deliberately not `Copy`: moving one hands it from cell to cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    match_value: MatchValue,
    score_value: u32,
    x: i8,
    y: i8,
}

impl Piece {
    /// Create an unplaced piece; its coordinates are set on placement
    pub fn new(id: PieceId, match_value: MatchValue, score_value: u32) -> Self {
        Self {
            id,
            match_value,
            score_value,
            x: -1,
            y: -1,
        }
    }

    pub fn from_template(id: PieceId, template: PieceTemplate) -> Self {
        Self::new(id, template.match_value, template.score_value)
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn match_value(&self) -> MatchValue {
        self.match_value
    }

    pub fn score_value(&self) -> u32 {
        self.score_value
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub(crate) fn set_coord(&mut self, x: i8, y: i8) {
        self.x = x;
        self.y = y;
    }
}
