use common::bitboard::{Square, *};

use crate::board::{
    castle_rights::CastleRights, color::Color, error::BoardError, piece::Piece, Board,
};

use super::chess_move::{pop_move_state, push_move_state};

/// Represents a castle move. The squares stored are the king's; the rook's
/// squares are derived from them. Construct through `castle_kingside` and
/// `castle_queenside` rather than directly.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub struct CastleChessMove {
    /// The square the king is moving from
    from_square: Square,

    /// The square the king is moving to
    to_square: Square,
}

impl CastleChessMove {
    fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
        }
    }

    pub fn castle_kingside(color: Color) -> Self {
        match color {
            Color::White => Self::new(E1, G1),
            Color::Black => Self::new(E8, G8),
        }
    }

    pub fn castle_queenside(color: Color) -> Self {
        match color {
            Color::White => Self::new(E1, C1),
            Color::Black => Self::new(E8, C8),
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn is_kingside(&self) -> bool {
        self.to_square.file() > self.from_square.file()
    }

    /// Returns (color, rook_from, rook_to)
    pub fn castle_details(&self) -> Result<(Color, Square, Square), BoardError> {
        let color = match self.from_square {
            E1 => Color::White,
            E8 => Color::Black,
            _ => return Err(BoardError::InvalidCastleMove),
        };

        let (rook_from, rook_to) = match (self.from_square, self.to_square) {
            (E1, G1) => (H1, F1),
            (E1, C1) => (A1, D1),
            (E8, G8) => (H8, F8),
            (E8, C8) => (A8, D8),
            _ => return Err(BoardError::InvalidCastleMove),
        };

        Ok((color, rook_from, rook_to))
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let king_from = self.from_square;
        let king_to = self.to_square;
        let (color, rook_from, rook_to) = self.castle_details()?;

        if board.get(king_from) != Some((Piece::King, color)) {
            return Err(BoardError::InvalidCastleState {
                msg: "king_from is not a king",
            });
        }
        if board.is_occupied(king_to) {
            return Err(BoardError::InvalidCastleState {
                msg: "king_to is not empty",
            });
        }
        if board.get(rook_from) != Some((Piece::Rook, color)) {
            return Err(BoardError::InvalidCastleState {
                msg: "rook_from is not a rook",
            });
        }
        if board.is_occupied(rook_to) {
            return Err(BoardError::InvalidCastleState {
                msg: "rook_to is not empty",
            });
        }

        board.remove(king_from);
        board.remove(rook_from);
        board.put(king_to, Piece::King, color)?;
        board.put(rook_to, Piece::Rook, color)?;

        push_move_state(board, None, CastleRights::for_color(color), false);
        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let king_from = self.from_square;
        let king_to = self.to_square;
        let (color, rook_from, rook_to) = self.castle_details()?;

        if board.get(king_to) != Some((Piece::King, color)) {
            return Err(BoardError::InvalidCastleState {
                msg: "king_to is not a king",
            });
        }
        if board.get(rook_to) != Some((Piece::Rook, color)) {
            return Err(BoardError::InvalidCastleState {
                msg: "rook_to is not a rook",
            });
        }

        board.remove(king_to);
        board.remove(rook_to);
        board.put(king_from, Piece::King, color)?;
        board.put(rook_from, Piece::Rook, color)?;

        pop_move_state(board)
    }
}

#[macro_export]
macro_rules! castle_kingside {
    ($color:expr) => {
        $crate::chess_move::ChessMove::Castle(
            $crate::chess_move::CastleChessMove::castle_kingside($color),
        )
    };
}

#[macro_export]
macro_rules! castle_queenside {
    ($color:expr) => {
        $crate::chess_move::ChessMove::Castle(
            $crate::chess_move::CastleChessMove::castle_queenside($color),
        )
    };
}
