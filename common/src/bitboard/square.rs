use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bitboard::bitboard::Bitboard;

/// A single board square, 0 (A1) through 63 (H8), rank-major.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Square(u8);

static ALGEBRAIC_SQUARE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").expect("square pattern is valid"));

impl Square {
    pub const fn new(index: u8) -> Self {
        debug_assert!(index < 64);
        Self(index)
    }

    pub const fn from_rank_file(rank: u8, file: u8) -> Self {
        Self::new(rank * 8 + file)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn to_bitboard(self) -> Bitboard {
        Bitboard::from_square(self)
    }

    pub fn overlaps(self, bitboard: Bitboard) -> bool {
        bitboard.contains(self)
    }

    /// The same square seen from the other side of the board (rank `r` becomes `7 - r`).
    pub const fn flip_vertical(self) -> Self {
        Self(self.0 ^ 56)
    }

    /// Offsets the square by whole ranks and files, returning `None` when the
    /// result falls off the board.
    pub fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Square> {
        let rank = self.rank() as i8 + rank_delta;
        let file = self.file() as i8 + file_delta;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square::from_rank_file(rank as u8, file as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(algebraic: &str) -> Option<Square> {
        let caps = ALGEBRAIC_SQUARE.captures(algebraic)?;
        let file_char = caps[1].chars().next()?.to_ascii_lowercase();
        let rank_char = caps[2].chars().next()?;
        let file = file_char as u8 - b'a';
        let rank = rank_char as u8 - b'1';
        Some(Square::from_rank_file(rank, file))
    }

    pub fn to_algebraic(self) -> &'static str {
        tables::ALGEBRAIC[self.0 as usize]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

macro_rules! squares {
    ($($name:ident = $index:expr),* $(,)?) => {
        $(pub const $name: Square = Square::new($index);)*
    };
}

#[rustfmt::skip]
squares! {
    A1 = 0,  B1 = 1,  C1 = 2,  D1 = 3,  E1 = 4,  F1 = 5,  G1 = 6,  H1 = 7,
    A2 = 8,  B2 = 9,  C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

/// All squares in index order.
pub const ORDERED: [Square; 64] = {
    let mut squares = [Square(0); 64];
    let mut i = 0;
    while i < 64 {
        squares[i] = Square(i as u8);
        i += 1;
    }
    squares
};

#[rustfmt::skip]
mod tables {
    pub const ALGEBRAIC: [&str; 64] = [
        "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
        "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
        "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
        "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
        "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
        "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
        "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
        "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rank_file() {
        assert_eq!(A1, Square::from_rank_file(0, 0));
        assert_eq!(B2, Square::from_rank_file(1, 1));
        assert_eq!(E4, Square::from_rank_file(3, 4));
    }

    #[test]
    fn test_from_algebraic() {
        assert_eq!(Some(A1), Square::from_algebraic("A1"));
        assert_eq!(Some(A1), Square::from_algebraic("a1"));
        assert_eq!(Some(E5), Square::from_algebraic("e5"));
        assert_eq!(None, Square::from_algebraic("i9"));
        assert_eq!(None, Square::from_algebraic("e45"));
    }

    #[test]
    fn test_to_algebraic() {
        assert_eq!("a1", A1.to_algebraic());
        assert_eq!("a8", A8.to_algebraic());
        assert_eq!("b8", B8.to_algebraic());
        assert_eq!("h8", H8.to_algebraic());
    }

    #[test]
    fn test_flip_vertical() {
        assert_eq!(A1.flip_vertical(), A8);
        assert_eq!(E2.flip_vertical(), E7);
        assert_eq!(H8.flip_vertical(), H1);
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(E4.offset(1, 1), Some(F5));
        assert_eq!(A1.offset(-1, 0), None);
        assert_eq!(H4.offset(0, 1), None);
    }

    #[test]
    fn test_ordered_matches_index() {
        for (i, square) in ORDERED.iter().enumerate() {
            assert_eq!(square.index() as usize, i);
        }
    }
}
