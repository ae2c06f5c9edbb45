//! Generic negamax search with alpha-beta pruning, usable for any two-player
//! zero-sum game that implements the traits in `traits`.

mod killer_moves;
mod score;
mod search;
mod time_control;
mod traits;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use killer_moves::KillerMoves;
pub use score::{
    is_mate_score, mate_distance, mated_in, score_from_table, score_to_table, Score, DRAW_SCORE,
    INFINITY, MATE_SCORE, MAX_PLY,
};
pub use search::{
    fixed_depth_search, full_width_negamax, is_proven_mate, iterative_deepening, SearchConfig,
    SearchContext, SearchError, SearchReport, SearchState, SearchStats, DEFAULT_MAX_DEPTH,
    MAX_QUIESCENCE_DEPTH,
};
pub use time_control::{allocate_time, TimeBudget, MOVES_TO_GO, SAFETY_MARGIN};
pub use traits::{
    Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer, NoOpMoveOrderer,
};
pub use transposition_table::{BoundType, TTEntry, TranspositionTable, DEFAULT_TT_CAPACITY};
