use common::bitboard::{Bitboard, Square};

use super::error::BoardError;
use super::piece::{Piece, ALL_PIECES};

/// Encapsulates the state for one side's pieces, represented as bitboards.
#[derive(Clone, PartialEq, Debug)]
pub struct PieceSet {
    /// Bitboards for each piece type, indexed by `Piece as usize`.
    bitboards: [Bitboard; 6],

    /// Bitboard representing all occupied squares. Incrementally updated as pieces are added or removed.
    occupied: Bitboard,
}

impl Default for PieceSet {
    fn default() -> Self {
        PieceSet {
            bitboards: [Bitboard::EMPTY; 6],
            occupied: Bitboard::EMPTY,
        }
    }
}

impl PieceSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn locate(&self, piece: Piece) -> Bitboard {
        self.bitboards[piece.index()]
    }

    pub fn count(&self, piece: Piece) -> u32 {
        self.bitboards[piece.index()].count_ones()
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if !square.overlaps(self.occupied) {
            return None;
        }
        ALL_PIECES
            .iter()
            .copied()
            .find(|piece| square.overlaps(self.bitboards[piece.index()]))
    }

    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        square.overlaps(self.occupied)
    }

    pub fn put(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if square.overlaps(self.occupied) {
            return Err(BoardError::SquareOccupied { square });
        }

        let bb = square.to_bitboard();
        self.bitboards[piece.index()] |= bb;
        self.occupied |= bb;

        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed_piece = self.get(square)?;
        let bb = square.to_bitboard();
        self.bitboards[removed_piece.index()] ^= bb;
        self.occupied ^= bb;
        Some(removed_piece)
    }

    /// Iterates over every `(square, piece)` pair in the set.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        ALL_PIECES.iter().flat_map(move |&piece| {
            self.bitboards[piece.index()]
                .squares()
                .map(move |square| (square, piece))
        })
    }
}
