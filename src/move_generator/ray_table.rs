use core::fmt;

use common::bitboard::{Bitboard, Square};

#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum Direction {
    East,
    North,
    NorthEast,
    NorthWest,
    South,
    SouthEast,
    SouthWest,
    West,
}

pub const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::NorthWest,
    Direction::NorthEast,
    Direction::SouthWest,
    Direction::SouthEast,
];

impl Direction {
    pub fn all() -> [Direction; 8] {
        [
            Direction::East,
            Direction::North,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::South,
            Direction::SouthEast,
            Direction::SouthWest,
            Direction::West,
        ]
    }

    /// Directions that walk towards higher square indexes. The blocker
    /// nearest the origin is the lowest set bit for these, the highest for
    /// the others.
    pub fn is_ascending(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::NorthEast | Direction::NorthWest
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dir = match self {
            Direction::East => "East",
            Direction::North => "North",
            Direction::NorthEast => "NorthEast",
            Direction::NorthWest => "NorthWest",
            Direction::South => "South",
            Direction::SouthEast => "SouthEast",
            Direction::SouthWest => "SouthWest",
            Direction::West => "West",
        };
        write!(f, "{}", dir)
    }
}

/// Every square reachable from a square in a direction on an empty board.
pub struct RayTable {
    rays: [Bitboard; 64 * 8], // One entry for each square and direction combination
}

impl Default for RayTable {
    fn default() -> Self {
        let mut table = RayTable {
            rays: [Bitboard::EMPTY; 64 * 8],
        };
        table.populate();
        table
    }
}

impl RayTable {
    pub fn new() -> Self {
        Default::default()
    }

    fn populate(&mut self) {
        for square_i in 0..64u8 {
            let square = Square::new(square_i);
            for &dir in &Direction::all() {
                self.rays[Self::index(square, dir)] = generate_ray(square, dir);
            }
        }
    }

    pub fn get(&self, square: Square, dir: Direction) -> Bitboard {
        self.rays[Self::index(square, dir)]
    }

    /// The ray from `square` in `dir`, cut off at (and including) the first
    /// occupied square.
    pub fn blocked_ray(&self, square: Square, dir: Direction, occupied: Bitboard) -> Bitboard {
        let ray = self.get(square, dir);
        let intercepts = ray & occupied;
        if intercepts.is_empty() {
            return ray;
        }

        let blocker = if dir.is_ascending() {
            intercepts.0.trailing_zeros()
        } else {
            63 - intercepts.0.leading_zeros()
        };

        ray ^ self.get(Square::new(blocker as u8), dir)
    }

    fn index(square: Square, dir: Direction) -> usize {
        (square.index() as usize) * 8 + dir as usize
    }
}

#[rustfmt::skip]
fn generate_ray(square: Square, dir: Direction) -> Bitboard {
    let mut ray = Bitboard::EMPTY;
    let mut pos = square.to_bitboard();

    loop {
        pos = match dir {
            Direction::North => if pos.overlaps(Bitboard::RANK_8) { break } else { pos << 8 },
            Direction::South => if pos.overlaps(Bitboard::RANK_1) { break } else { pos >> 8 },
            Direction::East => if pos.overlaps(Bitboard::H_FILE) { break } else { pos << 1 },
            Direction::West => if pos.overlaps(Bitboard::A_FILE) { break } else { pos >> 1 },
            Direction::NorthEast => if pos.overlaps(Bitboard::RANK_8 | Bitboard::H_FILE) { break } else { pos << 9 },
            Direction::NorthWest => if pos.overlaps(Bitboard::RANK_8 | Bitboard::A_FILE) { break } else { pos << 7 },
            Direction::SouthEast => if pos.overlaps(Bitboard::RANK_1 | Bitboard::H_FILE) { break } else { pos >> 7 },
            Direction::SouthWest => if pos.overlaps(Bitboard::RANK_1 | Bitboard::A_FILE) { break } else { pos >> 9 },
        };
        ray |= pos;
    }

    ray
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    fn bb(squares: &[Square]) -> Bitboard {
        squares
            .iter()
            .fold(Bitboard::EMPTY, |acc, &sq| acc | sq.to_bitboard())
    }

    #[test]
    fn test_generate_ray() {
        assert_eq!(
            generate_ray(A1, Direction::North),
            Bitboard::A_FILE ^ A1.to_bitboard()
        );
        assert_eq!(
            generate_ray(A1, Direction::East),
            Bitboard::RANK_1 ^ A1.to_bitboard()
        );
        assert_eq!(
            generate_ray(A1, Direction::NorthEast),
            bb(&[B2, C3, D4, E5, F6, G7, H8])
        );
        assert_eq!(generate_ray(A1, Direction::NorthWest), Bitboard::EMPTY);
        assert_eq!(generate_ray(A1, Direction::SouthWest), Bitboard::EMPTY);
        assert_eq!(generate_ray(C4, Direction::South), bb(&[C3, C2, C1]));
        assert_eq!(generate_ray(C4, Direction::West), bb(&[B4, A4]));
        assert_eq!(
            generate_ray(C4, Direction::NorthEast),
            bb(&[D5, E6, F7, G8])
        );
    }

    #[test]
    fn test_blocked_ray() {
        let table = RayTable::new();
        let occupied = bb(&[C6, C2, F4]);

        assert_eq!(
            table.blocked_ray(C4, Direction::North, occupied),
            bb(&[C5, C6])
        );
        assert_eq!(
            table.blocked_ray(C4, Direction::South, occupied),
            bb(&[C3, C2])
        );
        assert_eq!(
            table.blocked_ray(C4, Direction::East, occupied),
            bb(&[D4, E4, F4])
        );
        assert_eq!(
            table.blocked_ray(C4, Direction::West, occupied),
            bb(&[B4, A4])
        );
    }
}
