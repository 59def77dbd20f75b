//! Grid module - owns the tile and the occupying piece of every cell
//!
//! The grid is a `width x height` board stored as a flat row-major vector
//! (`y * width + x`). Row `y = 0` is the bottom; pieces fall toward it.
//! Every access is bounds-checked: reads off the board return `None`, writes
//! return [`GridError::OutOfBounds`].
//!
//! A piece's stored coordinates are only ever written here, on placement and
//! on every move, so the cell that owns a piece and the piece's own `(x, y)`
//! always agree.

use crate::error::GridError;
use crate::piece::Piece;
use crate::types::{Coord, MatchValue, PieceId, TileType, DEFAULT_SCORE_VALUE, MAX_BOARD_DIM};

/// One board cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    tile: Option<TileType>,
    piece: Option<Piece>,
}

impl Cell {
    pub fn tile(&self) -> Option<TileType> {
        self.tile
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }
}

/// A piece that changed cells during a collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMove {
    pub piece: PieceId,
    pub from: Coord,
    pub to: Coord,
}

impl PieceMove {
    /// Number of cells travelled
    pub fn distance(&self) -> u32 {
        self.from.manhattan(self.to) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with no tiles and no pieces
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `#` is an obstacle, `.` an empty Normal cell, a space a cell with no
    /// tile, and any [`MatchValue::glyph`] a Normal cell holding a piece of
    /// that value (ids are assigned in reading order). Every row must have the
    /// same width, and both sides must lie in `1..=MAX_BOARD_DIM`.
    ///
    /// ```
    /// use match3_core::Grid;
    /// use match3_core::types::MatchValue;
    ///
    /// let grid = Grid::from_pattern(&["R.#", "RBB"]).unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.piece(0, 0).map(|p| p.match_value()), Some(MatchValue::Red));
    /// assert!(grid.piece(1, 1).is_none());
    /// ```
    pub fn from_pattern(rows: &[&str]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let max = MAX_BOARD_DIM as usize;
        if !(1..=max).contains(&width) || !(1..=max).contains(&height) {
            return Err(GridError::PatternSize { width, height, max: MAX_BOARD_DIM });
        }

        let mut grid = Grid::new(width as u8, height as u8);
        let mut next_id = 0u32;

        for (row_idx, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow { row: row_idx, found, expected: width });
            }
            let y = (height - 1 - row_idx) as i8;
            for (x, ch) in row.chars().enumerate() {
                let x = x as i8;
                match ch {
                    ' ' => {}
                    '#' => grid.set_tile(x, y, TileType::Obstacle)?,
                    '.' => grid.set_tile(x, y, TileType::Normal)?,
                    glyph => {
                        let value = MatchValue::from_glyph(glyph)
                            .ok_or(GridError::UnknownGlyph { glyph, x, y })?;
                        grid.set_tile(x, y, TileType::Normal)?;
                        let piece = Piece::new(PieceId(next_id), value, DEFAULT_SCORE_VALUE);
                        next_id += 1;
                        grid.place_piece(piece, x, y)?;
                    }
                }
            }
        }

        Ok(grid)
    }

    /// Render back to the [`Grid::from_pattern`] notation, top row first
    pub fn to_pattern(&self) -> Vec<String> {
        (0..self.height as i8)
            .rev()
            .map(|y| {
                (0..self.width as i8)
                    .map(|x| match (self.tile(x, y), self.piece(x, y)) {
                        (Some(TileType::Obstacle), _) => '#',
                        (_, Some(piece)) => piece.match_value().glyph(),
                        (Some(TileType::Normal), None) => '.',
                        (None, None) => ' ',
                    })
                    .collect()
            })
            .collect()
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.is_within_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    fn checked_index(&self, x: i8, y: i8) -> Result<usize, GridError> {
        self.index(x, y).ok_or(GridError::OutOfBounds { x, y })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn is_within_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && (x as i16) < self.width as i16 && y >= 0 && (y as i16) < self.height as i16
    }

    /// Get the cell at (x, y); `None` if out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Tile at (x, y); `None` if out of bounds or not yet tiled
    pub fn tile(&self, x: i8, y: i8) -> Option<TileType> {
        self.cell(x, y).and_then(|c| c.tile)
    }

    /// Place a tile. An obstacle cannot be laid over a piece.
    pub fn set_tile(&mut self, x: i8, y: i8, tile: TileType) -> Result<(), GridError> {
        let idx = self.checked_index(x, y)?;
        let cell = &mut self.cells[idx];
        if !tile.accepts_piece() && cell.piece.is_some() {
            return Err(GridError::Occupied { x, y });
        }
        cell.tile = Some(tile);
        Ok(())
    }

    /// Tile every untiled cell, returning how many were filled
    pub fn fill_remaining_tiles(&mut self, tile: TileType) -> usize {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|c| c.tile.is_none()) {
            cell.tile = Some(tile);
            filled += 1;
        }
        filled
    }

    /// Piece at (x, y); `None` if the cell is empty or out of bounds
    pub fn piece(&self, x: i8, y: i8) -> Option<&Piece> {
        self.cell(x, y).and_then(|c| c.piece.as_ref())
    }

    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.piece(at.x, at.y)
    }

    /// Normal tile with no piece
    pub fn is_empty_normal(&self, x: i8, y: i8) -> bool {
        matches!(
            self.cell(x, y),
            Some(Cell {
                tile: Some(TileType::Normal),
                piece: None
            })
        )
    }

    /// Hand `piece` to the cell at (x, y) and stamp its coordinates
    pub fn place_piece(&mut self, mut piece: Piece, x: i8, y: i8) -> Result<(), GridError> {
        let idx = self.checked_index(x, y)?;
        let cell = &mut self.cells[idx];
        match cell.tile {
            None => return Err(GridError::NoTile { x, y }),
            Some(TileType::Obstacle) => return Err(GridError::Obstacle { x, y }),
            Some(TileType::Normal) => {}
        }
        if cell.piece.is_some() {
            return Err(GridError::Occupied { x, y });
        }
        piece.set_coord(x, y);
        cell.piece = Some(piece);
        Ok(())
    }

    /// Remove and return the piece at (x, y); the cell stays empty afterwards
    pub fn take_piece(&mut self, x: i8, y: i8) -> Option<Piece> {
        let idx = self.index(x, y)?;
        self.cells[idx].piece.take()
    }

    /// Exchange the pieces of two occupied cells
    pub fn swap_pieces(&mut self, a: Coord, b: Coord) -> Result<(), GridError> {
        let ia = self.checked_index(a.x, a.y)?;
        let ib = self.checked_index(b.x, b.y)?;
        if self.cells[ia].piece.is_none() {
            return Err(GridError::Empty { x: a.x, y: a.y });
        }
        if self.cells[ib].piece.is_none() {
            return Err(GridError::Empty { x: b.x, y: b.y });
        }
        if ia == ib {
            return Ok(());
        }

        let mut pa = self.cells[ia].piece.take();
        let mut pb = self.cells[ib].piece.take();
        if let Some(p) = pa.as_mut() {
            p.set_coord(b.x, b.y);
        }
        if let Some(p) = pb.as_mut() {
            p.set_coord(a.x, a.y);
        }
        self.cells[ia].piece = pb;
        self.cells[ib].piece = pa;
        Ok(())
    }

    /// Drop the pieces of column `x` straight down to close every gap.
    ///
    /// Two-pointer compaction, bottom to top: `write_y` is the lowest empty
    /// slot of the current segment. Obstacles (and untiled cells) end a
    /// segment, so nothing ever falls through or across them.
    /// Returns the moves in bottom-to-top order.
    pub fn collapse_column(&mut self, x: i8) -> Vec<PieceMove> {
        let mut moves = Vec::new();
        if x < 0 || x as i16 >= self.width as i16 {
            return moves;
        }

        let mut write_y: i8 = 0;
        for read_y in 0..self.height as i8 {
            if self.tile(x, read_y) != Some(TileType::Normal) {
                write_y = read_y + 1;
                continue;
            }
            if self.piece(x, read_y).is_none() {
                continue;
            }

            if write_y != read_y {
                let from = Coord::new(x, read_y);
                let to = Coord::new(x, write_y);
                let src = (read_y as usize) * (self.width as usize) + (x as usize);
                let dst = (write_y as usize) * (self.width as usize) + (x as usize);
                if let Some(mut piece) = self.cells[src].piece.take() {
                    piece.set_coord(to.x, to.y);
                    moves.push(PieceMove {
                        piece: piece.id(),
                        from,
                        to,
                    });
                    self.cells[dst].piece = Some(piece);
                }
            }
            write_y += 1;
        }

        moves
    }

    /// Iterate every coordinate, column by column from the bottom
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let h = self.height as i8;
        (0..self.width as i8).flat_map(move |x| (0..h).map(move |y| Coord::new(x, y)))
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().filter_map(|c| c.piece.as_ref())
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn normal_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.tile == Some(TileType::Normal))
            .count()
    }

    /// Normal cells without a piece, column by column from the bottom
    pub fn empty_normal_cells(&self) -> Vec<Coord> {
        self.coords()
            .filter(|c| self.is_empty_normal(c.x, c.y))
            .collect()
    }

    /// Every piece's stored coordinates match its cell and no obstacle holds a piece
    pub fn is_consistent(&self) -> bool {
        self.coords().all(|c| match self.cell(c.x, c.y) {
            Some(cell) => match &cell.piece {
                Some(piece) => piece.coord() == c && cell.tile == Some(TileType::Normal),
                None => true,
            },
            None => false,
        })
    }

    /// Remove every piece, keeping tiles
    pub fn clear_pieces(&mut self) {
        for cell in &mut self.cells {
            cell.piece = None;
        }
    }
}
