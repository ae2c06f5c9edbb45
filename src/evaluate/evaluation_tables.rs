//! Material values and piece-square tables.
//!
//! The tables are written the way a board is drawn: index 0 is a8 and index
//! 63 is h1, all from White's point of view. White pieces look up
//! `square ^ 56`, Black pieces look up `square` directly, which mirrors the
//! table vertically for Black.

use common::bitboard::Square;

use crate::board::color::Color;
use crate::board::piece::Piece;

/// Indexed by `Piece::index`.
pub const MATERIAL_VALUES: [i32; 6] = [
    100,    // pawn
    320,    // knight
    330,    // bishop
    500,    // rook
    900,    // queen
    20_000, // king
];

/// Weight of each piece type towards the game phase, indexed by `Piece::index`.
pub const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];

/// Sum of `PHASE_WEIGHTS` over the starting material.
pub const TOTAL_PHASE: i32 = 24;

#[inline(always)]
pub fn table_index(square: Square, color: Color) -> usize {
    match color {
        Color::White => (square.index() ^ 56) as usize,
        Color::Black => square.index() as usize,
    }
}

/// Middlegame piece-square bonus for every piece type.
#[inline(always)]
pub fn positional_bonus(piece: Piece, square: Square, color: Color) -> i32 {
    PIECE_SQUARE_TABLES[piece.index()][table_index(square, color)]
}

/// Endgame king bonus, rewarding centralisation.
#[inline(always)]
pub fn endgame_king_bonus(square: Square, color: Color) -> i32 {
    KING_ENDGAME_TABLE[table_index(square, color)]
}

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,   5,   5,   5,   0, -10,
    -5,   0,   5,   5,   5,   5,   0,  -5,
     0,   0,   5,   5,   5,   5,   0,  -5,
   -10,   5,   5,   5,   5,   5,   0, -10,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_TABLE: [i32; 64] = [
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -10, -20, -20, -20, -20, -20, -20, -10,
    20,  20,   0,   0,   0,   0,  20,  20,
    20,  30,  10,   0,   0,  10,  30,  20,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
   -50, -40, -30, -20, -20, -30, -40, -50,
   -30, -20, -10,   0,   0, -10, -20, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -30,   0,   0,   0,   0, -30, -30,
   -50, -30, -30, -30, -30, -30, -30, -50,
];

/// Indexed by `Piece::index`.
const PIECE_SQUARE_TABLES: [[i32; 64]; 6] = [
    PAWN_TABLE,
    KNIGHT_TABLE,
    BISHOP_TABLE,
    ROOK_TABLE,
    QUEEN_TABLE,
    KING_MIDDLEGAME_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_tables_are_mirrored_for_black() {
        assert_eq!(
            positional_bonus(Piece::Pawn, D7, Color::White),
            positional_bonus(Piece::Pawn, D2, Color::Black)
        );
        assert_eq!(positional_bonus(Piece::Pawn, D7, Color::White), 50);
        assert_eq!(positional_bonus(Piece::Pawn, D2, Color::White), -20);
        assert_eq!(positional_bonus(Piece::King, G1, Color::White), 30);
        assert_eq!(positional_bonus(Piece::King, G8, Color::Black), 30);
    }

    #[test]
    fn test_endgame_king_prefers_center() {
        assert_eq!(endgame_king_bonus(E4, Color::White), 40);
        assert_eq!(endgame_king_bonus(A8, Color::Black), -50);
        assert!(endgame_king_bonus(D5, Color::Black) > endgame_king_bonus(H1, Color::Black));
    }
}
