//! Common types re-exported for convenience.

pub use crate::alpha_beta_searcher::{Score, SearchConfig, MATE_SCORE};
pub use crate::board::{color::Color, piece::Piece, Board};
pub use crate::chess_move::{
    CastleChessMove, ChessMove, EnPassantChessMove, PartialMove, PawnPromotionChessMove,
    StandardChessMove,
};
pub use crate::chess_search::{SearchOutcome, Searcher};
pub use common::bitboard::Bitboard;
