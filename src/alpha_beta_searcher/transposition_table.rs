//! Fixed-capacity transposition table for caching search results.
//!
//! Slots are addressed by `hash & (capacity - 1)`. Each slot keeps the full
//! hash of the position it was written for, so a different position landing
//! on the same slot is a miss rather than a wrong answer.

use log::debug;

use super::score::{score_from_table, score_to_table, Score};

pub const DEFAULT_TT_CAPACITY: usize = 1 << 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoundType {
    /// The score is the exact value of the position.
    Exact,
    /// The search failed high; the true value is at least the score.
    LowerBound,
    /// The search failed low; the true value is at most the score.
    UpperBound,
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry<M: Copy> {
    pub hash: u64,
    pub depth: i32,
    /// Node-relative: mate scores count plies from the node, not the root.
    pub score: Score,
    pub bound: BoundType,
    pub best_move: Option<M>,
    pub generation: u8,
}

pub struct TranspositionTable<M: Copy> {
    entries: Vec<Option<TTEntry<M>>>,
    mask: usize,
    generation: u8,
    occupied: usize,
    hits: usize,
    stores: usize,
    collisions: usize,
}

impl<M: Copy> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new(DEFAULT_TT_CAPACITY)
    }
}

impl<M: Copy> TranspositionTable<M> {
    /// Allocates every slot up front. `capacity` is rounded up to a power of
    /// two.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        debug!("allocating transposition table with {} slots", capacity);

        Self {
            entries: vec![None; capacity],
            mask: capacity - 1,
            generation: 0,
            occupied: 0,
            hits: 0,
            stores: 0,
            collisions: 0,
        }
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Returns a score that can be used in place of searching the position,
    /// or `None` when the entry is missing, too shallow, or its bound does not
    /// settle the `(alpha, beta)` window.
    pub fn probe(
        &mut self,
        hash: u64,
        depth: i32,
        alpha: Score,
        beta: Score,
        ply: usize,
    ) -> Option<Score> {
        debug_assert!(alpha < beta, "probe with empty window ({}, {})", alpha, beta);

        let entry = match self.entries[self.index(hash)] {
            Some(entry) if entry.hash == hash => entry,
            _ => return None,
        };

        if entry.depth < depth {
            return None;
        }

        let score = score_from_table(entry.score, ply);
        let usable = match entry.bound {
            BoundType::Exact => true,
            BoundType::LowerBound => score >= beta,
            BoundType::UpperBound => score <= alpha,
        };

        if usable {
            self.hits += 1;
            Some(score)
        } else {
            None
        }
    }

    /// The best move recorded for the position, regardless of depth.
    pub fn best_move(&self, hash: u64) -> Option<M> {
        match self.entries[self.index(hash)] {
            Some(entry) if entry.hash == hash => entry.best_move,
            _ => None,
        }
    }

    /// Writes an entry unless the slot holds a deeper result from the
    /// current search.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i32,
        score: Score,
        bound: BoundType,
        best_move: Option<M>,
        ply: usize,
    ) {
        let index = self.index(hash);
        let generation = self.generation;

        match &self.entries[index] {
            None => self.occupied += 1,
            Some(existing) => {
                if existing.generation == generation && existing.depth > depth {
                    return;
                }
                if existing.hash != hash {
                    self.collisions += 1;
                }
            }
        }

        self.stores += 1;
        self.entries[index] = Some(TTEntry {
            hash,
            depth,
            score: score_to_table(score, ply),
            bound,
            best_move,
            generation,
        });
    }

    /// Ages every entry: results from earlier searches become replaceable.
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.hits = 0;
        self.stores = 0;
        self.collisions = 0;
    }

    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = None;
        }
        self.occupied = 0;
        self.generation = 0;
        self.hits = 0;
        self.stores = 0;
        self.collisions = 0;
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn stores(&self) -> usize {
        self.stores
    }

    /// Stores that evicted a different position.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
