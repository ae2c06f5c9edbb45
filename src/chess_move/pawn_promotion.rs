use common::bitboard::Square;

use crate::board::{error::BoardError, piece::Piece, Board};

use super::capture::Capture;
use super::chess_move::{pop_move_state, push_move_state, rights_lost_by_touching};

/// A pawn reaching the last rank and turning into `promote_to_piece`,
/// optionally capturing on the way.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub struct PawnPromotionChessMove {
    from_square: Square,
    to_square: Square,
    capture: Option<Capture>,
    promote_to_piece: Piece,
}

impl PawnPromotionChessMove {
    pub fn new(
        from_square: Square,
        to_square: Square,
        capture: Option<Capture>,
        promote_to_piece: Piece,
    ) -> Self {
        Self {
            from_square,
            to_square,
            capture,
            promote_to_piece,
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

    pub fn promote_to_piece(&self) -> Piece {
        self.promote_to_piece
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let (piece, color) = board
            .get(self.from_square)
            .ok_or(BoardError::FromSquareIsEmpty {
                square: self.from_square,
                op: "apply",
            })?;
        if piece != Piece::Pawn {
            return Err(BoardError::PromotionNonPawn {
                square: self.from_square,
            });
        }

        let actual_capture = match board.get(self.to_square) {
            Some((captured, captured_color)) if captured_color != color => Some(Capture(captured)),
            Some(_) => {
                return Err(BoardError::UnexpectedCaptureResult {
                    square: self.to_square,
                })
            }
            None => None,
        };
        if actual_capture != self.capture {
            return Err(BoardError::UnexpectedCaptureResult {
                square: self.to_square,
            });
        }

        board.remove(self.from_square);
        board.remove(self.to_square);
        board.put(self.to_square, self.promote_to_piece, color)?;

        push_move_state(board, None, rights_lost_by_touching(self.to_square), true);
        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let (_, color) = board
            .remove(self.to_square)
            .ok_or(BoardError::ToSquareIsEmpty {
                square: self.to_square,
                op: "undo",
            })?;

        if let Some(Capture(piece)) = self.capture {
            board.put(self.to_square, piece, color.opposite())?;
        }
        board.put(self.from_square, Piece::Pawn, color)?;

        pop_move_state(board)
    }
}

#[macro_export]
macro_rules! promotion {
    ($from:expr, $to:expr, $capture:expr, $piece:expr) => {
        $crate::chess_move::ChessMove::PawnPromotion(
            $crate::chess_move::PawnPromotionChessMove::new($from, $to, $capture, $piece),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::board::castle_rights::BLACK_KINGSIDE_RIGHTS;
    use crate::board::color::Color;
    use crate::board::piece::Piece;
    use crate::board::Board;
    use crate::chess_move::capture::Capture;
    use common::bitboard::square::*;

    #[test]
    fn test_promote_and_undo() {
        let mut board = Board::new();
        board.put(A7, Piece::Pawn, Color::White).unwrap();
        let hash = board.current_position_hash();

        let chess_move = promotion!(A7, A8, None, Piece::Queen);
        chess_move.apply(&mut board).unwrap();
        assert_eq!(board.get(A8), Some((Piece::Queen, Color::White)));
        assert_eq!(board.get(A7), None);

        chess_move.undo(&mut board).unwrap();
        assert_eq!(board.get(A7), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.get(A8), None);
        assert_eq!(board.current_position_hash(), hash);
    }

    #[test]
    fn test_promote_with_capture_of_rook_loses_castle_rights() {
        let mut board = Board::new();
        board.put(G2, Piece::Pawn, Color::Black).unwrap();
        board.put(H1, Piece::Rook, Color::White).unwrap();
        board.put(H8, Piece::Rook, Color::Black).unwrap();
        board.set_turn(Color::Black);

        let chess_move = promotion!(G2, H1, Some(Capture(Piece::Rook)), Piece::Knight);
        chess_move.apply(&mut board).unwrap();
        assert_eq!(board.get(H1), Some((Piece::Knight, Color::Black)));
        assert!(board.peek_castle_rights().contains(BLACK_KINGSIDE_RIGHTS));

        chess_move.undo(&mut board).unwrap();
        assert_eq!(board.get(H1), Some((Piece::Rook, Color::White)));
        assert_eq!(board.get(G2), Some((Piece::Pawn, Color::Black)));
    }

    #[test]
    fn test_promotion_requires_pawn() {
        let mut board = Board::new();
        board.put(A7, Piece::Rook, Color::White).unwrap();
        assert!(promotion!(A7, A8, None, Piece::Queen)
            .apply(&mut board)
            .is_err());
    }
}
