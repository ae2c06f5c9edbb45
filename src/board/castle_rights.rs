use std::fmt;

use super::color::Color;

/// The four castling rights packed into the low nibble of a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CastleRights(u8);

pub const WHITE_KINGSIDE_RIGHTS: CastleRights = CastleRights(0b1000);
pub const BLACK_KINGSIDE_RIGHTS: CastleRights = CastleRights(0b0100);
pub const WHITE_QUEENSIDE_RIGHTS: CastleRights = CastleRights(0b0010);
pub const BLACK_QUEENSIDE_RIGHTS: CastleRights = CastleRights(0b0001);
pub const ALL_CASTLE_RIGHTS: CastleRights = CastleRights(0b1111);
pub const NO_CASTLE_RIGHTS: CastleRights = CastleRights(0);

impl CastleRights {
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Index into a 16-entry table (Zobrist keys).
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn without(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    pub fn kingside(color: Color) -> CastleRights {
        match color {
            Color::White => WHITE_KINGSIDE_RIGHTS,
            Color::Black => BLACK_KINGSIDE_RIGHTS,
        }
    }

    pub fn queenside(color: Color) -> CastleRights {
        match color {
            Color::White => WHITE_QUEENSIDE_RIGHTS,
            Color::Black => BLACK_QUEENSIDE_RIGHTS,
        }
    }

    pub fn for_color(color: Color) -> CastleRights {
        Self::kingside(color) | Self::queenside(color)
    }
}

impl std::ops::BitOr for CastleRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for CastleRights {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for CastleRights {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl std::ops::Not for CastleRights {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0 & 0b1111)
    }
}

/// FEN castling field, `-` when no rights remain.
impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let flags = [
            (WHITE_KINGSIDE_RIGHTS, 'K'),
            (WHITE_QUEENSIDE_RIGHTS, 'Q'),
            (BLACK_KINGSIDE_RIGHTS, 'k'),
            (BLACK_QUEENSIDE_RIGHTS, 'q'),
        ];
        for (rights, c) in flags.iter() {
            if self.contains(*rights) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
