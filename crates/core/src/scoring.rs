//! Scoring module - points for cleared pieces
//!
//! Each cleared piece is worth its `score_value`. A pass of the cascade
//! multiplies the pass total by its cascade index: the swap's own matches
//! score x1, the first chained pass x2, and so on.

use crate::piece::Piece;

/// Score calculation result for one cascade pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Sum of the cleared pieces' score values
    pub base: u32,
    pub multiplier: u32,
    pub total: u32,
}

/// Multiplier for the given cascade index (1-based; 0 is treated as 1)
pub fn cascade_multiplier(cascade: u32) -> u32 {
    cascade.max(1)
}

/// Calculate the points for one pass
pub fn calculate_pass_score(score_sum: u32, cascade: u32) -> ScoreResult {
    let multiplier = cascade_multiplier(cascade);
    ScoreResult {
        base: score_sum,
        multiplier,
        total: score_sum.saturating_mul(multiplier),
    }
}

/// Running tally of the pieces cleared in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassTally {
    pub pieces: u32,
    pub score_sum: u32,
}

impl PassTally {
    pub fn add(&mut self, piece: &Piece) {
        self.pieces += 1;
        self.score_sum = self.score_sum.saturating_add(piece.score_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchValue, PieceId};

    #[test]
    fn test_first_pass_is_unmultiplied() {
        let r = calculate_pass_score(60, 1);
        assert_eq!(r.total, 60);
        assert_eq!(r.multiplier, 1);
    }

    #[test]
    fn test_cascade_multiplies() {
        assert_eq!(calculate_pass_score(60, 2).total, 120);
        assert_eq!(calculate_pass_score(80, 3).total, 240);
        assert_eq!(calculate_pass_score(60, 0).total, 60);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(calculate_pass_score(u32::MAX, 2).total, u32::MAX);
    }

    #[test]
    fn test_tally() {
        let mut tally = PassTally::default();
        tally.add(&Piece::new(PieceId(0), MatchValue::Red, 20));
        tally.add(&Piece::new(PieceId(1), MatchValue::Red, 50));
        assert_eq!(tally.pieces, 2);
        assert_eq!(tally.score_sum, 70);
    }
}
