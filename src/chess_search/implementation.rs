//! Chess-specific trait implementations for the negamax search.

use crate::alpha_beta_searcher::{Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, Score};
use crate::board::{error::BoardError, Board};
use crate::chess_move::ChessMove;
use crate::evaluate;
use crate::move_generator::{ChessMoveList, MoveGenerator as ChessMoveGen};

impl GameState for Board {
    #[inline]
    fn position_hash(&self) -> u64 {
        self.current_position_hash()
    }

    #[inline]
    fn is_in_check(&self) -> bool {
        ChessMoveGen::new().is_in_check(self, self.turn())
    }

    #[inline]
    fn is_draw(&self) -> bool {
        Board::is_draw(self)
    }
}

impl GameMove for ChessMove {
    type State = Board;
    type Error = BoardError;

    #[inline]
    fn apply(&self, state: &mut Board) -> Result<(), BoardError> {
        ChessMove::apply(self, state)
    }

    #[inline]
    fn undo(&self, state: &mut Board) -> Result<(), BoardError> {
        ChessMove::undo(self, state)
    }

    #[inline]
    fn is_tactical(&self, _state: &Board) -> bool {
        ChessMove::is_tactical(self)
    }
}

impl MoveCollection<ChessMove> for ChessMoveList {}

#[derive(Clone, Copy, Default, Debug)]
pub struct ChessMoveGenerator {
    inner: ChessMoveGen,
}

impl ChessMoveGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &ChessMoveGen {
        &self.inner
    }
}

impl MoveGenerator<Board> for ChessMoveGenerator {
    type Move = ChessMove;
    type MoveList = ChessMoveList;

    #[inline]
    fn generate_moves(&self, state: &Board) -> ChessMoveList {
        self.inner.generate_moves(state)
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct ChessEvaluator;

impl Evaluator<Board> for ChessEvaluator {
    #[inline]
    fn evaluate(&self, state: &Board) -> Score {
        evaluate::evaluate(state)
    }
}
