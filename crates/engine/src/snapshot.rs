//! Serializable views of a board and a running game.
//!
//! Snapshots own their data and are cheap enough to take every frame; front
//! ends can render from them and tests can compare them.

use serde::Serialize;

use crate::board::{Board, Phase};
use crate::session::{Session, SessionState};
use crate::types::{MatchValue, PieceId, TileType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub match_value: MatchValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    pub x: i8,
    pub y: i8,
    pub tile: Option<TileType>,
    pub piece: Option<PieceSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    pub border_size: u8,
    pub phase: Phase,
    /// Row-major from the bottom row: index `y * width + x`
    pub cells: Vec<CellSnapshot>,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Self {
        let grid = board.grid();
        let mut cells = Vec::with_capacity(grid.width() as usize * grid.height() as usize);
        for y in 0..grid.height() as i8 {
            for x in 0..grid.width() as i8 {
                cells.push(CellSnapshot {
                    x,
                    y,
                    tile: grid.tile(x, y),
                    piece: grid.piece(x, y).map(|p| PieceSnapshot {
                        id: p.id(),
                        match_value: p.match_value(),
                    }),
                });
            }
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            border_size: board.config().border_size,
            phase: board.phase(),
            cells,
        }
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<&CellSnapshot> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub episode_id: u32,
    pub state: SessionState,
    pub score: u32,
    pub score_goal: u32,
    pub moves_remaining: u32,
    pub board: BoardSnapshot,
}

impl GameSnapshot {
    pub fn capture(episode_id: u32, board: &Board, session: &Session) -> Self {
        Self {
            episode_id,
            state: session.state(),
            score: session.score(),
            score_goal: session.score_goal(),
            moves_remaining: session.moves_remaining(),
            board: BoardSnapshot::capture(board),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
