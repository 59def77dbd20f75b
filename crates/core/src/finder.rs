//! Match finder - runs of matching pieces along the grid axes
//!
//! A *run* starts at an occupied origin cell and walks one direction while
//! the next piece matches the run's value. The run value is the origin's
//! value; a wild origin adopts the first non-wild piece it meets, so
//! `wild, red, blue` is never a run.
//!
//! A cell *matches* when the two halves of a line through it (each at least
//! two long, origin included) add up to [`MIN_MATCH_LEN`] pieces. The halves
//! are only joined when the values they settled on agree, so a wild origin
//! between a red and a green neighbour is no match; a half that is long
//! enough on its own still counts. The union of both axes is the cell's
//! match set.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Coord, Direction, MatchValue, MAX_BOARD_DIM, MIN_MATCH_LEN};

/// Longest possible run
pub const MAX_RUN: usize = MAX_BOARD_DIM as usize;

/// Cells of one run, origin first
pub type Run = ArrayVec<Coord, MAX_RUN>;

/// Deduplicated set of matched cells, in discovery order.
///
/// A cell holds exactly one piece, so deduplicating by cell is the same as
/// deduplicating by piece for as long as the grid is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: Vec<Coord>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell; returns false if it was already present
    pub fn insert(&mut self, cell: Coord) -> bool {
        if self.cells.contains(&cell) {
            return false;
        }
        self.cells.push(cell);
        true
    }

    pub fn union(&mut self, other: &MatchSet) {
        for &cell in &other.cells {
            self.insert(cell);
        }
    }

    pub fn contains(&self, cell: Coord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.cells
    }

    /// Distinct columns touched, ascending
    pub fn columns(&self) -> Vec<i8> {
        let mut columns: Vec<i8> = self.cells.iter().map(|c| c.x).collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }
}

impl Extend<Coord> for MatchSet {
    fn extend<T: IntoIterator<Item = Coord>>(&mut self, iter: T) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl FromIterator<Coord> for MatchSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        let mut set = MatchSet::new();
        set.extend(iter);
        set
    }
}

/// Walk from `origin` in `direction` collecting the run.
///
/// Stops at the first empty cell, off-board cell or mismatch. Returns `None`
/// when the origin is empty or the run is shorter than `min_len`.
pub fn scan_line(grid: &Grid, origin: Coord, direction: Direction, min_len: usize) -> Option<Run> {
    walk(grid, origin, direction)
        .map(|(run, _)| run)
        .filter(|run| run.len() >= min_len)
}

/// Run from `origin` together with the value it settled on (`Wild` when
/// every piece in it is wild)
fn walk(grid: &Grid, origin: Coord, direction: Direction) -> Option<(Run, MatchValue)> {
    let start = grid.piece_at(origin)?;
    let mut run_value = start.match_value();

    let mut run = Run::new();
    run.push(origin);

    let mut next = origin.step(direction);
    while let Some(piece) = grid.piece_at(next) {
        let value = piece.match_value();
        if !run_value.matches(value) {
            break;
        }
        if run_value.is_wild() {
            run_value = value;
        }
        if run.try_push(next).is_err() {
            break;
        }
        next = next.step(direction);
    }

    Some((run, run_value))
}

/// Matches along one axis through `origin`.
///
/// Two half-runs that agree are joined; otherwise each half has to reach
/// [`MIN_MATCH_LEN`] by itself.
fn axis_matches(grid: &Grid, origin: Coord, forward: Direction) -> MatchSet {
    let half = |dir| walk(grid, origin, dir).filter(|(run, _)| run.len() >= 2);
    let mut combined = MatchSet::new();

    match (half(forward), half(forward.opposite())) {
        (Some((a, va)), Some((b, vb))) if va.matches(vb) => {
            combined.extend(a);
            combined.extend(b);
        }
        (a, b) => {
            for (run, _) in [a, b].into_iter().flatten() {
                if run.len() >= MIN_MATCH_LEN {
                    combined.extend(run);
                }
            }
        }
    }

    if combined.len() >= MIN_MATCH_LEN {
        combined
    } else {
        MatchSet::new()
    }
}

/// Horizontal and vertical matches passing through (x, y)
pub fn matches_through_cell(grid: &Grid, x: i8, y: i8) -> MatchSet {
    let origin = Coord::new(x, y);
    let mut matches = axis_matches(grid, origin, Direction::Right);
    matches.union(&axis_matches(grid, origin, Direction::Up));
    matches
}

/// Union of [`matches_through_cell`] over `cells`
pub fn matches_for_cells<I>(grid: &Grid, cells: I) -> MatchSet
where
    I: IntoIterator<Item = Coord>,
{
    let mut matches = MatchSet::new();
    for cell in cells {
        matches.union(&matches_through_cell(grid, cell.x, cell.y));
    }
    matches
}

/// Whether a freshly placed piece at (x, y) completes a run to its left or below.
///
/// Setup fills column by column from the bottom, so only those two
/// directions can already hold pieces.
pub fn has_match_on_fill(grid: &Grid, x: i8, y: i8) -> bool {
    let origin = Coord::new(x, y);
    scan_line(grid, origin, Direction::Left, MIN_MATCH_LEN).is_some()
        || scan_line(grid, origin, Direction::Down, MIN_MATCH_LEN).is_some()
}

/// Every match on the board
pub fn find_all_matches(grid: &Grid) -> MatchSet {
    matches_for_cells(grid, grid.coords())
}
