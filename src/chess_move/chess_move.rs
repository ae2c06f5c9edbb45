use core::fmt;

use common::bitboard::Square;

use crate::board::{
    castle_rights::{
        CastleRights, BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, NO_CASTLE_RIGHTS,
        WHITE_KINGSIDE_RIGHTS, WHITE_QUEENSIDE_RIGHTS,
    },
    color::Color,
    error::BoardError,
    piece::Piece,
    Board,
};
use common::bitboard::square::{A1, A8, E1, E8, H1, H8};

use super::capture::Capture;
use super::castle::CastleChessMove;
use super::en_passant::EnPassantChessMove;
use super::pawn_promotion::PawnPromotionChessMove;
use super::standard::StandardChessMove;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChessMove {
    Standard(StandardChessMove),
    PawnPromotion(PawnPromotionChessMove),
    EnPassant(EnPassantChessMove),
    Castle(CastleChessMove),
}

macro_rules! delegate_to_variants {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        match $self {
            ChessMove::Standard(m) => m.$method($($arg),*),
            ChessMove::PawnPromotion(m) => m.$method($($arg),*),
            ChessMove::EnPassant(m) => m.$method($($arg),*),
            ChessMove::Castle(m) => m.$method($($arg),*),
        }
    };
}

impl ChessMove {
    pub fn from_square(&self) -> Square {
        delegate_to_variants!(self, from_square)
    }

    pub fn to_square(&self) -> Square {
        delegate_to_variants!(self, to_square)
    }

    pub fn captures(&self) -> Option<Capture> {
        match self {
            ChessMove::Standard(m) => m.captures(),
            ChessMove::PawnPromotion(m) => m.captures(),
            ChessMove::EnPassant(m) => Some(m.captures()),
            ChessMove::Castle(_) => None,
        }
    }

    pub fn promotion(&self) -> Option<Piece> {
        match self {
            ChessMove::PawnPromotion(m) => Some(m.promote_to_piece()),
            _ => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captures().is_some()
    }

    /// Captures, en passant and promotions. These are the only moves searched
    /// past the horizon.
    pub fn is_tactical(&self) -> bool {
        self.is_capture() || self.promotion().is_some()
    }

    /// Applies the move for the side to move, then hands the turn over. The
    /// position being left is recorded in the repetition history.
    #[must_use = "move application may fail"]
    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let hash_before = board.current_position_hash();
        delegate_to_variants!(self, apply, board)?;
        board.count_position(hash_before);

        if board.turn() == Color::Black {
            board.increment_fullmove_number();
        }
        board.toggle_turn();
        Ok(())
    }

    #[must_use = "move undo may fail"]
    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        board.toggle_turn();
        if board.turn() == Color::Black {
            board.decrement_fullmove_number();
        }
        delegate_to_variants!(self, undo, board)?;
        board.uncount_position()?;
        Ok(())
    }

    /// Coordinate notation, e.g. `e2e4`, `e7e8q`, `e1g1`.
    pub fn to_coordinate(&self) -> String {
        let promotion = self
            .promotion()
            .and_then(|piece| piece.to_promotion_char())
            .map(String::from)
            .unwrap_or_default();
        format!(
            "{}{}{}",
            self.from_square().to_algebraic(),
            self.to_square().to_algebraic(),
            promotion
        )
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let move_type = match self {
            ChessMove::Standard(_) => "Move".to_string(),
            ChessMove::PawnPromotion(m) => format!("Promote to {}", m.promote_to_piece()),
            ChessMove::EnPassant(_) => "En Passant".to_string(),
            ChessMove::Castle(_) => "Castle".to_string(),
        };
        let capture = match self.captures() {
            Some(capture) => format!(" capturing {}", capture.0),
            None => "".to_string(),
        };
        write!(
            f,
            "{} {}{}{}",
            move_type,
            self.from_square(),
            self.to_square(),
            capture
        )
    }
}

/// Castle rights that disappear once a piece leaves or lands on `square`.
pub(super) fn rights_lost_by_touching(square: Square) -> CastleRights {
    match square {
        A1 => WHITE_QUEENSIDE_RIGHTS,
        H1 => WHITE_KINGSIDE_RIGHTS,
        E1 => WHITE_KINGSIDE_RIGHTS | WHITE_QUEENSIDE_RIGHTS,
        A8 => BLACK_QUEENSIDE_RIGHTS,
        H8 => BLACK_KINGSIDE_RIGHTS,
        E8 => BLACK_KINGSIDE_RIGHTS | BLACK_QUEENSIDE_RIGHTS,
        _ => NO_CASTLE_RIGHTS,
    }
}

/// Pushes one entry on each of the en passant, castle rights and halfmove
/// stacks. Every move pushes exactly one of each so that `pop_move_state`
/// can unwind it.
pub(super) fn push_move_state(
    board: &mut Board,
    en_passant_target: Option<Square>,
    lost_castle_rights: CastleRights,
    resets_halfmove_clock: bool,
) {
    board.push_en_passant_target(en_passant_target);
    board.lose_castle_rights(lost_castle_rights);
    if resets_halfmove_clock {
        board.reset_halfmove_clock();
    } else {
        board.increment_halfmove_clock();
    }
}

pub(super) fn pop_move_state(board: &mut Board) -> Result<(), BoardError> {
    board.pop_halfmove_clock()?;
    board.pop_castle_rights()?;
    board.pop_en_passant_target()?;
    Ok(())
}
