//! Killer move storage.
//!
//! Killer moves are quiet moves that caused beta cutoffs at the same ply in
//! other branches of the search tree. Storing them per-ply improves move
//! ordering by trying moves likely to cause cutoffs before other quiet moves.

use super::score::MAX_PLY;

pub struct KillerMoves<M: Copy> {
    slots: Vec<[Option<M>; 2]>,
}

impl<M: Copy + PartialEq> Default for KillerMoves<M> {
    fn default() -> Self {
        Self::new(MAX_PLY)
    }
}

impl<M: Copy + PartialEq> KillerMoves<M> {
    pub fn new(max_ply: usize) -> Self {
        Self {
            slots: vec![[None, None]; max_ply + 1],
        }
    }

    /// The newest killer goes first; storing the current first killer again
    /// is a no-op so both slots stay distinct.
    pub fn store(&mut self, ply: usize, killer: M) {
        if let Some(slot) = self.slots.get_mut(ply) {
            if slot[0] == Some(killer) {
                return;
            }
            slot[1] = slot[0];
            slot[0] = Some(killer);
        }
    }

    pub fn get(&self, ply: usize) -> [Option<M>; 2] {
        self.slots.get(ply).copied().unwrap_or([None, None])
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = [None, None];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let mut killers = KillerMoves::new(8);
        assert_eq!(killers.get(2), [None, None]);

        killers.store(2, 10u8);
        assert_eq!(killers.get(2), [Some(10), None]);

        killers.store(2, 11);
        assert_eq!(killers.get(2), [Some(11), Some(10)]);

        killers.store(2, 12);
        assert_eq!(killers.get(2), [Some(12), Some(11)]);

        // other plies are untouched
        assert_eq!(killers.get(3), [None, None]);
    }

    #[test]
    fn test_duplicate_store_keeps_slots_distinct() {
        let mut killers = KillerMoves::new(8);
        killers.store(1, 4u8);
        killers.store(1, 5);
        killers.store(1, 5);
        assert_eq!(killers.get(1), [Some(5), Some(4)]);
    }

    #[test]
    fn test_out_of_range_ply_is_ignored() {
        let mut killers = KillerMoves::new(4);
        killers.store(100, 1u8);
        assert_eq!(killers.get(100), [None, None]);
    }

    #[test]
    fn test_clear() {
        let mut killers = KillerMoves::new(4);
        killers.store(0, 1u8);
        killers.store(3, 2);
        killers.clear();
        assert_eq!(killers.get(0), [None, None]);
        assert_eq!(killers.get(3), [None, None]);
    }
}
