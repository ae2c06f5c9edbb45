//! History heuristic for chess move ordering.
//!
//! Tracks which quiet moves cause beta cutoffs, using this information to improve
//! move ordering. Moves that frequently cause cutoffs are prioritized over moves
//! that rarely do.

use common::bitboard::Square;

const HISTORY_SIZE: usize = 64 * 64; // from_square * 64 + to_square

/// Cutoff counters indexed by the move's origin and destination squares.
pub struct HistoryTable {
    table: Vec<u32>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            table: vec![0; HISTORY_SIZE],
        }
    }

    #[inline]
    fn index(from: Square, to: Square) -> usize {
        (from.index() as usize) * 64 + (to.index() as usize)
    }

    /// Records that a move from `from` to `to` caused a beta cutoff.
    pub fn record_cutoff(&mut self, from: Square, to: Square, depth: i32) {
        let depth = depth.max(0) as u32;
        // deeper cutoffs are more significant
        let bonus = (depth + 1) * (depth + 1);
        let entry = &mut self.table[Self::index(from, to)];
        *entry = entry.saturating_add(bonus);
    }

    /// Returns the history score for a move from `from` to `to`.
    #[inline]
    pub fn score(&self, from: Square, to: Square) -> u32 {
        self.table[Self::index(from, to)]
    }

    /// Ages all entries by dividing by 2, preventing unbounded growth.
    pub fn age(&mut self) {
        for entry in self.table.iter_mut() {
            *entry /= 2;
        }
    }

    pub fn clear(&mut self) {
        for entry in self.table.iter_mut() {
            *entry = 0;
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_history_recording() {
        let mut history = HistoryTable::new();

        assert_eq!(history.score(E2, E4), 0);

        history.record_cutoff(E2, E4, 3);
        assert_eq!(history.score(E2, E4), 16);

        history.record_cutoff(E2, E4, 4);
        assert_eq!(history.score(E2, E4), 41);
    }

    #[test]
    fn test_history_aging() {
        let mut history = HistoryTable::new();

        history.record_cutoff(E2, E4, 5);
        let score_before = history.score(E2, E4);
        assert!(score_before > 0);

        history.age();
        assert_eq!(history.score(E2, E4), score_before / 2);
    }

    #[test]
    fn test_history_clear() {
        let mut history = HistoryTable::new();

        history.record_cutoff(E2, E4, 3);
        history.clear();
        assert_eq!(history.score(E2, E4), 0);
    }

    #[test]
    fn test_history_different_moves() {
        let mut history = HistoryTable::new();

        history.record_cutoff(E2, E4, 3);
        history.record_cutoff(D2, D4, 4);

        // depth 4 gives a higher bonus than depth 3 (25 vs 16)
        assert!(history.score(D2, D4) > history.score(E2, E4));
        assert_eq!(history.score(E4, E2), 0);
    }
}
