use common::bitboard::Square;

use crate::board::{color::Color, error::BoardError, piece::Piece, Board};

use super::capture::Capture;
use super::chess_move::{pop_move_state, push_move_state, rights_lost_by_touching};

/// A move of a single piece from one square to another, optionally capturing
/// whatever stands on the destination. Pawn pushes (including double pushes)
/// are standard moves; promotions, en passant and castling are not.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub struct StandardChessMove {
    from_square: Square,
    to_square: Square,
    capture: Option<Capture>,
}

impl StandardChessMove {
    pub fn new(from_square: Square, to_square: Square, capture: Option<Capture>) -> Self {
        Self {
            from_square,
            to_square,
            capture,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn captures(&self) -> Option<Capture> {
        self.capture
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let StandardChessMove {
            from_square,
            to_square,
            capture: expected_capture,
        } = *self;

        let (piece_to_move, color) =
            board
                .get(from_square)
                .ok_or(BoardError::FromSquareIsEmpty {
                    square: from_square,
                    op: "apply",
                })?;

        let actual_capture = match board.get(to_square) {
            Some((piece, captured_color)) if captured_color != color => Some(Capture(piece)),
            Some(_) => return Err(BoardError::UnexpectedCaptureResult { square: to_square }),
            None => None,
        };
        if actual_capture != expected_capture {
            return Err(BoardError::UnexpectedCaptureResult { square: to_square });
        }

        board.remove(from_square);
        board.remove(to_square);
        board.put(to_square, piece_to_move, color)?;

        let en_passant_target = match piece_to_move {
            Piece::Pawn => double_push_target(board, from_square, to_square, color),
            _ => None,
        };
        let lost_castle_rights =
            rights_lost_by_touching(from_square) | rights_lost_by_touching(to_square);
        let resets_halfmove_clock = piece_to_move == Piece::Pawn || expected_capture.is_some();

        push_move_state(
            board,
            en_passant_target,
            lost_castle_rights,
            resets_halfmove_clock,
        );
        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let StandardChessMove {
            from_square,
            to_square,
            capture,
        } = *self;

        let (piece_to_move_back, color) =
            board
                .remove(to_square)
                .ok_or(BoardError::ToSquareIsEmpty {
                    square: to_square,
                    op: "undo",
                })?;

        if let Some(Capture(piece)) = capture {
            board.put(to_square, piece, color.opposite())?;
        }
        board.put(from_square, piece_to_move_back, color)?;

        pop_move_state(board)
    }
}

/// The en passant target left behind by a pawn double push. Only set when an
/// enemy pawn stands beside the destination, ready to capture.
fn double_push_target(board: &Board, from: Square, to: Square, color: Color) -> Option<Square> {
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    if rank_delta.abs() != 2 {
        return None;
    }

    let capturer_is_adjacent = [-1, 1].iter().any(|&file_delta| {
        to.offset(0, file_delta)
            .and_then(|square| board.get(square))
            .map_or(false, |(piece, c)| piece == Piece::Pawn && c == color.opposite())
    });

    if capturer_is_adjacent {
        from.offset(rank_delta / 2, 0)
    } else {
        None
    }
}

#[macro_export]
macro_rules! std_move {
    ($from:expr, $to:expr, $capture:expr) => {
        $crate::chess_move::ChessMove::Standard($crate::chess_move::StandardChessMove::new(
            $from,
            $to,
            Some($capture),
        ))
    };
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::Standard($crate::chess_move::StandardChessMove::new(
            $from, $to, None,
        ))
    };
}
