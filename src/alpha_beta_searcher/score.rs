//! Score representation shared by the evaluator and the search.
//!
//! Scores are centipawns from the perspective of the side to move. Mate is
//! `MATE_SCORE` minus the ply distance from the root, so a quicker mate always
//! scores higher than a slower one.

pub type Score = i32;

pub const MATE_SCORE: Score = 1_000_000;

/// Strictly larger than any score a search can return.
pub const INFINITY: Score = MATE_SCORE + 1;

pub const DRAW_SCORE: Score = 0;

/// Deepest ply the search will ever reach, quiescence included.
pub const MAX_PLY: usize = 128;

#[inline(always)]
pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_SCORE - MAX_PLY as Score
}

/// The score of the side to move when it has been checkmated `ply` plies
/// from the root.
#[inline(always)]
pub fn mated_in(ply: usize) -> Score {
    -MATE_SCORE + ply as Score
}

/// Number of plies from the root until mate, if `score` is a mate score.
pub fn mate_distance(score: Score) -> Option<i32> {
    if is_mate_score(score) {
        Some(MATE_SCORE - score.abs())
    } else {
        None
    }
}

/// Converts a root-relative mate score into one relative to the node at
/// `ply`, the form kept in the transposition table.
#[inline]
pub fn score_to_table(score: Score, ply: usize) -> Score {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score + ply as Score
    } else {
        score - ply as Score
    }
}

/// Inverse of `score_to_table`.
#[inline]
pub fn score_from_table(score: Score, ply: usize) -> Score {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score - ply as Score
    } else {
        score + ply as Score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closer_mates_score_higher() {
        for p1 in 0..20 {
            for p2 in (p1 + 1)..21 {
                assert!(-mated_in(p1) > -mated_in(p2));
                assert!(mated_in(p1) < mated_in(p2));
            }
        }
    }

    #[test]
    fn test_mate_score_detection() {
        assert!(is_mate_score(MATE_SCORE - 1));
        assert!(is_mate_score(mated_in(40)));
        assert!(!is_mate_score(20_000));
        assert!(!is_mate_score(0));
        assert_eq!(mate_distance(MATE_SCORE - 3), Some(3));
        assert_eq!(mate_distance(mated_in(6)), Some(6));
        assert_eq!(mate_distance(150), None);
    }

    #[test]
    fn test_table_conversion() {
        // mate found 5 plies from the root, stored at a node 2 plies deep
        let stored = score_to_table(MATE_SCORE - 5, 2);
        assert_eq!(stored, MATE_SCORE - 3);
        // the same node reached 4 plies deep is 7 plies from mate
        assert_eq!(score_from_table(stored, 4), MATE_SCORE - 7);

        let stored = score_to_table(mated_in(5), 2);
        assert_eq!(stored, mated_in(3));
        assert_eq!(score_from_table(stored, 4), mated_in(7));

        assert_eq!(score_to_table(250, 9), 250);
        assert_eq!(score_from_table(-250, 9), -250);
    }
}
