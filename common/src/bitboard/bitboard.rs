use core::fmt;
use std::{
    fmt::{Display, Formatter},
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
        ShrAssign,
    },
};

use super::square::Square;

/// A set of squares, one bit per square. Bit 0 is A1, bit 63 is H8.
#[derive(Clone, Copy, PartialEq, Debug, PartialOrd, Eq, Ord, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Self = Self(0x0000000000000000);
    pub const ALL: Self = Self(0xFFFFFFFFFFFFFFFF);

    pub const A_FILE: Self = Self(0x0101010101010101);
    pub const B_FILE: Self = Self(0x0202020202020202);
    pub const G_FILE: Self = Self(0x4040404040404040);
    pub const H_FILE: Self = Self(0x8080808080808080);

    pub const RANK_1: Self = Self(0xFF);
    pub const RANK_2: Self = Self(0xFF00);
    pub const RANK_3: Self = Self(0xFF0000);
    pub const RANK_4: Self = Self(0xFF000000);
    pub const RANK_5: Self = Self(0xFF00000000);
    pub const RANK_6: Self = Self(0xFF0000000000);
    pub const RANK_7: Self = Self(0xFF000000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);

    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    pub fn overlaps(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn contains(&self, square: Square) -> bool {
        self.overlaps(square.to_bitboard())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest set square, if any.
    pub fn first_square(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::new(self.0.trailing_zeros() as u8))
        }
    }

    /// Iterates over the set squares from A1 towards H8.
    pub fn squares(self) -> SquareIter {
        SquareIter(self.0)
    }
}

pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        // clear the lowest set bit
        self.0 &= self.0 - 1;
        Some(Square::new(index))
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Bitboard::from_square(square)
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Shl<usize> for Bitboard {
    type Output = Self;

    fn shl(self, rhs: usize) -> Self {
        Self(self.0 << rhs)
    }
}

impl Shr<usize> for Bitboard {
    type Output = Self;

    fn shr(self, rhs: usize) -> Self {
        Self(self.0 >> rhs)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl ShlAssign<usize> for Bitboard {
    fn shl_assign(&mut self, rhs: usize) {
        self.0 <<= rhs;
    }
}

impl ShrAssign<usize> for Bitboard {
    fn shr_assign(&mut self, rhs: usize) {
        self.0 >>= rhs;
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut result = String::new();
        for rank in (0..8).rev() {
            for file in 0..8 {
                let cell = match self.contains(Square::from_rank_file(rank, file)) {
                    true => 'X',
                    false => '.',
                };
                result.push(cell);
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}
