//! Board state: piece placement, side to move, castle rights, en passant target,
//! move clocks, the incrementally maintained Zobrist hash and the history of
//! position hashes used for repetition detection.

pub mod castle_rights;
pub mod color;
pub mod error;
pub mod fen;
pub mod piece;
pub mod zobrist;

mod display;
mod move_info;
mod piece_set;
mod position_info;
mod state_stack;

use common::bitboard::{Bitboard, Square};

use self::castle_rights::{CastleRights, ALL_CASTLE_RIGHTS};
use self::color::Color;
use self::error::BoardError;
use self::move_info::MoveInfo;
use self::piece::Piece;
use self::position_info::PositionInfo;
use self::zobrist::ZOBRIST;

pub use self::piece_set::PieceSet;

/// A position is drawn once the halfmove clock reaches this many plies.
pub const FIFTY_MOVE_RULE_PLIES: u16 = 100;

/// Represents the state of a chess board. The top level struct holds piece position
/// info, whereas the lower level `move_info` and `position_info` structs hold state
/// related to en passant targets, castling rights, clocks and zobrist hashing.
#[derive(Clone, Debug)]
pub struct Board {
    white: PieceSet,
    black: PieceSet,
    turn: Color,
    move_info: MoveInfo,
    position_info: PositionInfo,
}

impl Default for Board {
    fn default() -> Self {
        let mut position_info = PositionInfo::new();
        position_info.toggle_hash(ZOBRIST.castle_rights(ALL_CASTLE_RIGHTS));
        Self {
            white: PieceSet::new(),
            black: PieceSet::new(),
            turn: Color::White,
            move_info: MoveInfo::new(),
            position_info,
        }
    }
}

impl Board {
    /// An empty board with White to move and all castle rights.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        crate::chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        }
    }

    pub fn pieces(&self, color: Color) -> &PieceSet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn occupied(&self) -> Bitboard {
        self.white.occupied() | self.black.occupied()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        square.overlaps(self.occupied())
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if let Some(piece) = self.white.get(square) {
            return Some((piece, Color::White));
        }
        self.black.get(square).map(|piece| (piece, Color::Black))
    }

    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupied { square });
        }

        match color {
            Color::White => self.white.put(square, piece),
            Color::Black => self.black.put(square, piece),
        }?;

        self.position_info
            .toggle_hash(ZOBRIST.piece(square, piece, color));
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        let (piece, color) = self.get(square)?;
        match color {
            Color::White => self.white.remove(square),
            Color::Black => self.black.remove(square),
        }?;
        self.position_info
            .toggle_hash(ZOBRIST.piece(square, piece, color));
        Some((piece, color))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color).locate(Piece::King).first_square()
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn toggle_turn(&mut self) -> Color {
        self.position_info.toggle_hash(ZOBRIST.turn(Color::Black));
        self.turn = self.turn.opposite();
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) -> Color {
        if turn != self.turn {
            self.toggle_turn();
        }
        turn
    }

    // En passant

    pub fn push_en_passant_target(&mut self, target_square: Option<Square>) -> Option<Square> {
        let old_target = self.peek_en_passant_target();
        self.position_info.toggle_hash(ZOBRIST.en_passant(old_target));
        self.position_info
            .toggle_hash(ZOBRIST.en_passant(target_square));
        self.move_info.push_en_passant_target(target_square)
    }

    pub fn peek_en_passant_target(&self) -> Option<Square> {
        self.move_info.peek_en_passant_target()
    }

    pub fn pop_en_passant_target(&mut self) -> Result<Option<Square>, BoardError> {
        let (old_target, new_target) = self.move_info.pop_en_passant_target()?;
        self.position_info.toggle_hash(ZOBRIST.en_passant(old_target));
        self.position_info.toggle_hash(ZOBRIST.en_passant(new_target));
        Ok(new_target)
    }

    /// Sets the en passant target without recording history. Position setup only.
    pub fn set_en_passant_target(&mut self, target_square: Option<Square>) {
        let old_target = self.peek_en_passant_target();
        self.position_info.toggle_hash(ZOBRIST.en_passant(old_target));
        self.position_info
            .toggle_hash(ZOBRIST.en_passant(target_square));
        self.move_info.set_en_passant_target(target_square);
    }

    // Castle rights

    pub fn peek_castle_rights(&self) -> CastleRights {
        self.move_info.peek_castle_rights()
    }

    pub fn lose_castle_rights(&mut self, lost_rights: CastleRights) -> CastleRights {
        let (old_rights, new_rights) = self.move_info.lose_castle_rights(lost_rights);
        self.toggle_castle_rights_hash(old_rights, new_rights);
        new_rights
    }

    pub fn pop_castle_rights(&mut self) -> Result<CastleRights, BoardError> {
        let (old_rights, new_rights) = self.move_info.pop_castle_rights()?;
        self.toggle_castle_rights_hash(old_rights, new_rights);
        Ok(new_rights)
    }

    /// Sets castle rights without recording history. Position setup only.
    pub fn set_castle_rights(&mut self, rights: CastleRights) {
        let old_rights = self.peek_castle_rights();
        self.move_info.set_castle_rights(rights);
        self.toggle_castle_rights_hash(old_rights, rights);
    }

    fn toggle_castle_rights_hash(&mut self, old_rights: CastleRights, new_rights: CastleRights) {
        if old_rights != new_rights {
            self.position_info
                .toggle_hash(ZOBRIST.castle_rights(old_rights));
            self.position_info
                .toggle_hash(ZOBRIST.castle_rights(new_rights));
        }
    }

    // Clocks

    pub fn increment_fullmove_number(&mut self) -> u16 {
        self.move_info.increment_fullmove_number()
    }

    pub fn decrement_fullmove_number(&mut self) -> u16 {
        self.move_info.decrement_fullmove_number()
    }

    pub fn set_fullmove_number(&mut self, number: u16) -> u16 {
        self.move_info.set_fullmove_number(number)
    }

    pub fn fullmove_number(&self) -> u16 {
        self.move_info.fullmove_number()
    }

    pub fn increment_halfmove_clock(&mut self) -> u16 {
        self.move_info.increment_halfmove_clock()
    }

    pub fn reset_halfmove_clock(&mut self) -> u16 {
        self.move_info.reset_halfmove_clock()
    }

    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.move_info.set_halfmove_clock(clock)
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.move_info.halfmove_clock()
    }

    pub fn pop_halfmove_clock(&mut self) -> Result<u16, BoardError> {
        self.move_info.pop_halfmove_clock()
    }

    // PositionInfo delegation

    pub fn current_position_hash(&self) -> u64 {
        self.position_info.current_position_hash()
    }

    /// Records a position the game has moved away from.
    pub fn count_position(&mut self, hash: u64) {
        self.position_info.push_position(hash)
    }

    pub fn uncount_position(&mut self) -> Result<u64, BoardError> {
        self.position_info.pop_position()
    }

    /// Number of occurrences of the current position, counting this one.
    pub fn repetition_count(&self) -> u32 {
        self.position_info.repetition_count()
    }

    pub fn played_position_count(&self) -> usize {
        self.position_info.history_len()
    }

    // Draw rules

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock() >= FIFTY_MOVE_RULE_PLIES
    }

    /// Bare kings, or a single knight or bishop against a bare king.
    pub fn has_insufficient_material(&self) -> bool {
        let heavy_or_pawn = [Piece::Pawn, Piece::Rook, Piece::Queen];
        for &color in &Color::ALL {
            let pieces = self.pieces(color);
            if heavy_or_pawn.iter().any(|&piece| pieces.count(piece) > 0) {
                return false;
            }
        }
        let minor_count: u32 = Color::ALL
            .iter()
            .map(|&color| {
                let pieces = self.pieces(color);
                pieces.count(Piece::Knight) + pieces.count(Piece::Bishop)
            })
            .sum();
        minor_count <= 1
    }

    pub fn is_draw(&self) -> bool {
        self.is_threefold_repetition() || self.is_fifty_move_draw() || self.has_insufficient_material()
    }

    /// Recomputes the Zobrist hash from scratch. The incremental hash must
    /// always agree with this.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for &color in &Color::ALL {
            for (square, piece) in self.pieces(color).iter() {
                hash ^= ZOBRIST.piece(square, piece, color);
            }
        }
        hash ^= ZOBRIST.turn(self.turn);
        hash ^= ZOBRIST.castle_rights(self.peek_castle_rights());
        hash ^= ZOBRIST.en_passant(self.peek_en_passant_target());
        hash
    }

    /// The same position with colors swapped and the board flipped vertically.
    pub fn mirrored(&self) -> Board {
        let mut board = Board::new();
        for &color in &Color::ALL {
            for (square, piece) in self.pieces(color).iter() {
                // cannot collide: the source squares are distinct
                let _ = board.put(square.flip_vertical(), piece, color.opposite());
            }
        }
        board.set_turn(self.turn.opposite());

        let rights = self.peek_castle_rights();
        let mut mirrored_rights = CastleRights::new(0);
        for &color in &Color::ALL {
            if rights.contains(CastleRights::kingside(color)) {
                mirrored_rights |= CastleRights::kingside(color.opposite());
            }
            if rights.contains(CastleRights::queenside(color)) {
                mirrored_rights |= CastleRights::queenside(color.opposite());
            }
        }
        board.set_castle_rights(mirrored_rights);
        board.set_en_passant_target(self.peek_en_passant_target().map(Square::flip_vertical));
        board.set_halfmove_clock(self.halfmove_clock());
        board.set_fullmove_number(self.fullmove_number());
        board
    }
}
