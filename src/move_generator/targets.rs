use common::bitboard::{Bitboard, Square};
use once_cell::sync::Lazy;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;

use super::ray_table::{Direction, RayTable, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

/// Precomputed target tables for the non-sliding pieces, plus the ray table
/// used to walk sliders. Built once on first use.
pub struct Targets {
    kings: [Bitboard; 64],
    knights: [Bitboard; 64],
    // indexed by `Color::index`
    pawn_attacks: [[Bitboard; 64]; 2],
    ray_table: RayTable,
}

pub static TARGETS: Lazy<Targets> = Lazy::new(Targets::default);

impl Default for Targets {
    fn default() -> Self {
        Self {
            kings: generate_king_targets_table(),
            knights: generate_knight_targets_table(),
            pawn_attacks: [
                generate_pawn_attack_table(Color::Black),
                generate_pawn_attack_table(Color::White),
            ],
            ray_table: RayTable::new(),
        }
    }
}

impl Targets {
    pub fn king_targets(&self, square: Square) -> Bitboard {
        self.kings[square.index() as usize]
    }

    pub fn knight_targets(&self, square: Square) -> Bitboard {
        self.knights[square.index() as usize]
    }

    /// Squares a pawn of `color` standing on `square` attacks.
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_attacks[color.index()][square.index() as usize]
    }

    pub fn rook_targets(&self, square: Square, occupied: Bitboard) -> Bitboard {
        self.sliding_targets(square, occupied, ROOK_DIRECTIONS)
    }

    pub fn bishop_targets(&self, square: Square, occupied: Bitboard) -> Bitboard {
        self.sliding_targets(square, occupied, BISHOP_DIRECTIONS)
    }

    pub fn queen_targets(&self, square: Square, occupied: Bitboard) -> Bitboard {
        self.rook_targets(square, occupied) | self.bishop_targets(square, occupied)
    }

    /// Squares attacked by `piece` on `square`, including occupied squares the
    /// piece could capture on (or defends).
    pub fn piece_targets(
        &self,
        piece: Piece,
        color: Color,
        square: Square,
        occupied: Bitboard,
    ) -> Bitboard {
        match piece {
            Piece::Pawn => self.pawn_attacks(color, square),
            Piece::Knight => self.knight_targets(square),
            Piece::Bishop => self.bishop_targets(square, occupied),
            Piece::Rook => self.rook_targets(square, occupied),
            Piece::Queen => self.queen_targets(square, occupied),
            Piece::King => self.king_targets(square),
        }
    }

    /// Pieces of `attacker` that attack `square`, given an occupancy and a set
    /// of attacker pieces to ignore (e.g. one that is about to be captured).
    pub fn attackers_of(
        &self,
        board: &Board,
        square: Square,
        attacker: Color,
        occupied: Bitboard,
        ignored: Bitboard,
    ) -> Bitboard {
        let pieces = board.pieces(attacker);
        let live = !ignored;
        let queens = pieces.locate(Piece::Queen);

        let mut attackers = Bitboard::EMPTY;
        attackers |= self.knight_targets(square) & pieces.locate(Piece::Knight);
        attackers |= self.king_targets(square) & pieces.locate(Piece::King);
        // a pawn of the defending color on `square` would attack exactly the
        // squares the attacking pawns stand on
        attackers |= self.pawn_attacks(attacker.opposite(), square) & pieces.locate(Piece::Pawn);
        attackers |=
            self.rook_targets(square, occupied) & (pieces.locate(Piece::Rook) | queens);
        attackers |=
            self.bishop_targets(square, occupied) & (pieces.locate(Piece::Bishop) | queens);

        attackers & live
    }

    fn sliding_targets(
        &self,
        square: Square,
        occupied: Bitboard,
        directions: [Direction; 4],
    ) -> Bitboard {
        directions.iter().fold(Bitboard::EMPTY, |targets, &dir| {
            targets | self.ray_table.blocked_ray(square, dir, occupied)
        })
    }
}

pub fn generate_pawn_attack_table(color: Color) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];

    for (square_i, entry) in table.iter_mut().enumerate() {
        let pawn = Bitboard(1 << square_i);

        let attack_east = match color {
            Color::White => (pawn << 9) & !Bitboard::A_FILE,
            Color::Black => (pawn >> 7) & !Bitboard::A_FILE,
        };
        let attack_west = match color {
            Color::White => (pawn << 7) & !Bitboard::H_FILE,
            Color::Black => (pawn >> 9) & !Bitboard::H_FILE,
        };

        *entry = attack_east | attack_west;
    }

    table
}

pub fn generate_knight_targets_table() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];

    for (square_i, entry) in table.iter_mut().enumerate() {
        let knight = Bitboard(1 << square_i);

        // nne = north-north-east, nee = north-east-east, etc..
        let move_nne = (knight << 17) & !Bitboard::A_FILE;
        let move_nee = (knight << 10) & !Bitboard::A_FILE & !Bitboard::B_FILE;
        let move_see = (knight >> 6) & !Bitboard::A_FILE & !Bitboard::B_FILE;
        let move_sse = (knight >> 15) & !Bitboard::A_FILE;
        let move_nnw = (knight << 15) & !Bitboard::H_FILE;
        let move_nww = (knight << 6) & !Bitboard::G_FILE & !Bitboard::H_FILE;
        let move_sww = (knight >> 10) & !Bitboard::G_FILE & !Bitboard::H_FILE;
        let move_ssw = (knight >> 17) & !Bitboard::H_FILE;

        *entry =
            move_nne | move_nee | move_see | move_sse | move_nnw | move_nww | move_sww | move_ssw;
    }

    table
}

pub fn generate_king_targets_table() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];

    for (square_i, entry) in table.iter_mut().enumerate() {
        let king = Bitboard(1 << square_i);
        let mut targets = Bitboard::EMPTY;

        // shift the king's position. in the event that it falls off of the boundary,
        // we want to negate the rank/file where the king would fall.
        targets |= (king << 9) & !Bitboard::RANK_1 & !Bitboard::A_FILE; // northeast
        targets |= (king << 8) & !Bitboard::RANK_1; // north
        targets |= (king << 7) & !Bitboard::RANK_1 & !Bitboard::H_FILE; // northwest

        targets |= (king >> 7) & !Bitboard::RANK_8 & !Bitboard::A_FILE; // southeast
        targets |= (king >> 8) & !Bitboard::RANK_8; // south
        targets |= (king >> 9) & !Bitboard::RANK_8 & !Bitboard::H_FILE; // southwest

        targets |= (king << 1) & !Bitboard::A_FILE; // east
        targets |= (king >> 1) & !Bitboard::H_FILE; // west

        *entry = targets;
    }

    table
}
