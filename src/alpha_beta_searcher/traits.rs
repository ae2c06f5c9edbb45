//! Core traits for generic negamax search.

use std::fmt::{Debug, Display};

use super::score::Score;

/// Represents the state of a two-player zero-sum game, seen from the side to
/// move.
pub trait GameState {
    /// Returns a hash of the current position for transposition table lookups.
    fn position_hash(&self) -> u64;

    /// Returns true if the side to move is in check. When the side to move
    /// has no moves this decides between a loss and a draw.
    fn is_in_check(&self) -> bool;

    /// Returns true if the position is drawn by rule even though moves remain
    /// (repetition, move counters, dead material). Never consulted at the
    /// root.
    fn is_draw(&self) -> bool {
        false
    }
}

/// Represents an action that can be applied to and undone from a game state.
/// Applying a move also hands the turn to the opponent.
pub trait GameMove: Copy + PartialEq + Debug + Display {
    type State: GameState;
    type Error: Display;

    /// Applies this move to the given state.
    fn apply(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    /// Undoes this move on the given state.
    fn undo(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    /// Returns true if this move is "tactical" and should be searched in
    /// quiescence. Tactical moves change the material balance (captures,
    /// promotions). Default implementation returns false.
    fn is_tactical(&self, _state: &Self::State) -> bool {
        false
    }
}

/// Generates all legal moves from a given game state.
pub trait MoveGenerator<S: GameState> {
    type Move: GameMove<State = S>;
    type MoveList: MoveCollection<Self::Move>;

    /// Generates all legal moves for the side to move.
    fn generate_moves(&self, state: &S) -> Self::MoveList;
}

/// Evaluates a game position and returns a score.
pub trait Evaluator<S: GameState> {
    /// Evaluates the given state from the perspective of the side to move.
    fn evaluate(&self, state: &S) -> Score;
}

/// Orders moves to improve alpha-beta pruning efficiency.
///
/// The search itself places the transposition table move and the killer
/// moves; the orderer is responsible for everything else.
pub trait MoveOrderer<S: GameState, M> {
    /// Sorts moves in-place, placing "better" moves first. Tactical moves are
    /// expected ahead of quiet ones.
    fn order_moves(&self, moves: &mut [M], state: &S);

    /// Called when a quiet move caused a beta cutoff at `depth`.
    fn record_cutoff(&mut self, _game_move: &M, _state: &S, _depth: i32) {}

    /// Called once before each search starts.
    fn new_search(&mut self) {}
}

/// A no-op move orderer for games without move ordering heuristics.
#[derive(Clone, Default, Debug)]
pub struct NoOpMoveOrderer;

impl<S: GameState, M> MoveOrderer<S, M> for NoOpMoveOrderer {
    #[inline(always)]
    fn order_moves(&self, _moves: &mut [M], _state: &S) {}
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}
