//! Per-move time allocation and deadline tracking.

use std::time::{Duration, Instant};

/// Assumed number of moves left in the game when splitting the clock.
pub const MOVES_TO_GO: u32 = 30;

/// Kept in reserve so the engine never flags on overhead.
pub const SAFETY_MARGIN: Duration = Duration::from_millis(50);

pub const MIN_ALLOCATION: Duration = Duration::from_millis(1);

/// Time to spend on one move given the mover's remaining clock and
/// increment: `time_left / 30 + increment * 3 / 4`, capped at
/// `time_left - 50ms` and never below 1ms.
pub fn allocate_time(time_left: Duration, increment: Duration) -> Duration {
    let allocation = time_left / MOVES_TO_GO + increment * 3 / 4;
    let cap = time_left
        .checked_sub(SAFETY_MARGIN)
        .unwrap_or(Duration::from_millis(0));

    allocation.min(cap).max(MIN_ALLOCATION)
}

/// The wall-clock budget of one search.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    allocation: Option<Duration>,
}

impl TimeBudget {
    /// No deadline: the search is bounded by depth only.
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            allocation: None,
        }
    }

    pub fn new(allocation: Duration) -> Self {
        Self {
            start: Instant::now(),
            allocation: Some(allocation),
        }
    }

    pub fn allocation(&self) -> Option<Duration> {
        self.allocation
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn is_exhausted(&self) -> bool {
        match self.allocation {
            Some(allocation) => self.elapsed() >= allocation,
            None => false,
        }
    }

    /// True once more than half the allocation is spent; a new iteration
    /// started now would most likely not finish.
    pub fn past_half(&self) -> bool {
        match self.allocation {
            Some(allocation) => self.elapsed() * 2 > allocation,
            None => false,
        }
    }
}
