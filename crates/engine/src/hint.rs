//! Swap hints: which adjacent swaps would make a match.
//!
//! Every candidate is tried on a scratch copy of the grid and swapped back,
//! so the caller's grid is never touched.

use match3_core::{finder, Grid};

use crate::types::{Coord, Direction};

/// Each unordered adjacent pair holding two pieces, once
fn candidate_swaps(grid: &Grid) -> impl Iterator<Item = (Coord, Coord)> + '_ {
    grid.coords().flat_map(move |a| {
        [Direction::Right, Direction::Up]
            .into_iter()
            .map(move |dir| (a, a.step(dir)))
            .filter(move |&(a, b)| grid.piece_at(a).is_some() && grid.piece_at(b).is_some())
    })
}

fn makes_match(scratch: &mut Grid, a: Coord, b: Coord) -> bool {
    if scratch.swap_pieces(a, b).is_err() {
        return false;
    }
    let found = !finder::matches_through_cell(scratch, a.x, a.y).is_empty()
        || !finder::matches_through_cell(scratch, b.x, b.y).is_empty();
    // Swapping back cannot fail: both cells still hold pieces.
    let _ = scratch.swap_pieces(a, b);
    found
}

/// First matching swap in column-major order, if any
pub fn find_matching_swap(grid: &Grid) -> Option<(Coord, Coord)> {
    let mut scratch = grid.clone();
    candidate_swaps(grid).find(|&(a, b)| makes_match(&mut scratch, a, b))
}

/// Every matching swap in column-major order
pub fn matching_swaps(grid: &Grid) -> Vec<(Coord, Coord)> {
    let mut scratch = grid.clone();
    candidate_swaps(grid)
        .filter(|&(a, b)| makes_match(&mut scratch, a, b))
        .collect()
}
