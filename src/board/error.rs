use common::bitboard::Square;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("cannot put a piece on {square}, the square is already occupied")]
    SquareOccupied { square: Square },
    #[error("cannot {op} chess move, the `from` square {square} is empty")]
    FromSquareIsEmpty { square: Square, op: &'static str },
    #[error("cannot {op} chess move, the `to` square {square} is empty")]
    ToSquareIsEmpty { square: Square, op: &'static str },
    #[error("cannot apply chess move, the expected capture result is different than what is on {square}")]
    UnexpectedCaptureResult { square: Square },
    #[error("cannot apply en passant, the piece on {square} is not a pawn")]
    EnPassantNonPawn { square: Square },
    #[error("en passant didn't result in a capture on {square}")]
    EnPassantDidNotResultInCapture { square: Square },
    #[error("invalid castle move, king can only move 2 squares to left or right on its original rank")]
    InvalidCastleMove,
    #[error("invalid castle state: {msg}")]
    InvalidCastleState { msg: &'static str },
    #[error("promotion square {square} did not contain a pawn")]
    PromotionNonPawn { square: Square },
    #[error("cannot undo, the {stack} history is empty")]
    StateStackUnderflow { stack: &'static str },
}
