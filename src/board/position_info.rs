use rustc_hash::FxHashMap;

use super::error::BoardError;

/// Tracks the Zobrist hash of the current position and the hashes of every
/// position that preceded it along the played (or searched) line, so that
/// repetitions can be detected.
#[derive(Clone, Debug, Default)]
pub struct PositionInfo {
    current_position_hash: u64,
    history: Vec<u64>,
    position_count: FxHashMap<u64, u32>,
}

impl PositionInfo {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn current_position_hash(&self) -> u64 {
        self.current_position_hash
    }

    #[inline]
    pub fn toggle_hash(&mut self, key: u64) {
        self.current_position_hash ^= key;
    }

    /// Records `hash` as a position left behind by a move.
    pub fn push_position(&mut self, hash: u64) {
        self.history.push(hash);
        *self.position_count.entry(hash).or_insert(0) += 1;
    }

    /// Inverse of `push_position`. Returns the hash that was removed.
    pub fn pop_position(&mut self) -> Result<u64, BoardError> {
        let hash = self.history.pop().ok_or(BoardError::StateStackUnderflow {
            stack: "position",
        })?;
        if let Some(count) = self.position_count.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.position_count.remove(&hash);
            }
        }
        Ok(hash)
    }

    /// Number of times the current position has occurred, including now.
    pub fn repetition_count(&self) -> u32 {
        self.position_count
            .get(&self.current_position_hash)
            .copied()
            .unwrap_or(0)
            .saturating_add(1)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repetition_count() {
        let mut info = PositionInfo::new();
        info.toggle_hash(42);
        assert_eq!(info.repetition_count(), 1);

        // leave position 42, then come back to it
        info.push_position(42);
        info.toggle_hash(42 ^ 7);
        info.push_position(7);
        info.toggle_hash(7 ^ 42);
        assert_eq!(info.repetition_count(), 2);

        info.pop_position().unwrap();
        info.pop_position().unwrap();
        assert_eq!(info.repetition_count(), 1);
        assert!(info.pop_position().is_err());
    }

    #[test]
    fn test_repetition_count_beyond_u8() {
        let mut info = PositionInfo::new();
        info.toggle_hash(42);
        for _ in 0..300 {
            info.push_position(42);
        }
        assert_eq!(info.repetition_count(), 301);
        assert_eq!(info.history_len(), 300);

        for _ in 0..300 {
            info.pop_position().unwrap();
        }
        assert_eq!(info.repetition_count(), 1);
    }
}
