use std::fmt;

use super::color::Color;

/// Piece types, ordered from least to most valuable. The discriminant doubles as
/// the index into per-piece tables (bitboards, material values, Zobrist keys).
#[derive(Clone, Copy, PartialEq, Debug, Eq, PartialOrd, Ord, Hash)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

pub const ALL_PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// Pieces a pawn may promote to, strongest first.
pub const PROMOTABLE_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Piece {
    pub fn from_usize(i: usize) -> Piece {
        ALL_PIECES[i % ALL_PIECES.len()]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn to_fen(&self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_fen(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Suffix used for promotions in coordinate notation (`e7e8q`).
    pub fn to_promotion_char(&self) -> Option<char> {
        match self {
            Piece::Knight => Some('n'),
            Piece::Bishop => Some('b'),
            Piece::Rook => Some('r'),
            Piece::Queen => Some('q'),
            Piece::Pawn | Piece::King => None,
        }
    }

    pub fn from_promotion_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "pawn",
            Piece::Knight => "knight",
            Piece::Bishop => "bishop",
            Piece::Rook => "rook",
            Piece::Queen => "queen",
            Piece::King => "king",
        };
        write!(f, "{}", name)
    }
}
