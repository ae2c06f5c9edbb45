use common::bitboard::Square;

use crate::board::{castle_rights::NO_CASTLE_RIGHTS, error::BoardError, piece::Piece, Board};

use super::capture::Capture;
use super::chess_move::{pop_move_state, push_move_state};

/// A pawn capturing an enemy pawn that just double-pushed past it. The captured
/// pawn sits beside the origin square, not on the destination.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub struct EnPassantChessMove {
    from_square: Square,
    to_square: Square,
}

impl EnPassantChessMove {
    pub fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn captures(&self) -> Capture {
        Capture(Piece::Pawn)
    }

    /// Square of the pawn that gets removed.
    pub fn captured_square(&self) -> Square {
        Square::from_rank_file(self.from_square.rank(), self.to_square.file())
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let captured_square = self.captured_square();

        let color = match board.get(self.from_square) {
            Some((Piece::Pawn, color)) => color,
            Some(_) => {
                return Err(BoardError::EnPassantNonPawn {
                    square: self.from_square,
                })
            }
            None => {
                return Err(BoardError::FromSquareIsEmpty {
                    square: self.from_square,
                    op: "apply",
                })
            }
        };
        if board.get(captured_square) != Some((Piece::Pawn, color.opposite())) {
            return Err(BoardError::EnPassantDidNotResultInCapture {
                square: captured_square,
            });
        }
        if board.is_occupied(self.to_square) {
            return Err(BoardError::SquareOccupied {
                square: self.to_square,
            });
        }

        board.remove(self.from_square);
        board.remove(captured_square);
        board.put(self.to_square, Piece::Pawn, color)?;

        push_move_state(board, None, NO_CASTLE_RIGHTS, true);
        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let (_, color) = board
            .remove(self.to_square)
            .ok_or(BoardError::ToSquareIsEmpty {
                square: self.to_square,
                op: "undo",
            })?;
        board.put(self.captured_square(), Piece::Pawn, color.opposite())?;
        board.put(self.from_square, Piece::Pawn, color)?;

        pop_move_state(board)
    }
}

#[macro_export]
macro_rules! en_passant_move {
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::EnPassant($crate::chess_move::EnPassantChessMove::new(
            $from, $to,
        ))
    };
}
