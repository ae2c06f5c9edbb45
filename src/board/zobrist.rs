//! Zobrist keys for incremental position hashing.
//!
//! The hash of a position is the xor of one key per (color, piece, square),
//! one key for the castle rights nibble, one key for the file of the en passant
//! target (if any), and one key when Black is to move. Keys come from a fixed
//! seed so hashes are stable between runs.

use common::bitboard::Square;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::castle_rights::CastleRights;
use super::color::Color;
use super::piece::Piece;

const ZOBRIST_SEED: u64 = 0x6e65_6761_6368_6573;

pub struct ZobristKeys {
    pieces: [[[u64; 64]; 6]; 2],
    castle_rights: [u64; 16],
    en_passant_file: [u64; 8],
    black_to_move: u64,
}

pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut keys = Self {
            pieces: [[[0; 64]; 6]; 2],
            castle_rights: [0; 16],
            en_passant_file: [0; 8],
            black_to_move: 0,
        };

        for color in keys.pieces.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        // no rights hash to zero so a fresh board only needs piece keys
        for key in keys.castle_rights.iter_mut().skip(1) {
            *key = rng.gen();
        }
        for key in keys.en_passant_file.iter_mut() {
            *key = rng.gen();
        }
        keys.black_to_move = rng.gen();
        keys
    }

    #[inline]
    pub fn piece(&self, square: Square, piece: Piece, color: Color) -> u64 {
        self.pieces[color.index()][piece.index()][square.index() as usize]
    }

    #[inline]
    pub fn castle_rights(&self, rights: CastleRights) -> u64 {
        self.castle_rights[rights.index()]
    }

    #[inline]
    pub fn en_passant(&self, target: Option<Square>) -> u64 {
        match target {
            Some(square) => self.en_passant_file[square.file() as usize],
            None => 0,
        }
    }

    #[inline]
    pub fn turn(&self, color: Color) -> u64 {
        match color {
            Color::White => 0,
            Color::Black => self.black_to_move,
        }
    }
}
