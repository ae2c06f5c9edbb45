//! Forsyth–Edwards Notation: parsing into a `Board` and serializing back.

use std::str::FromStr;

use common::bitboard::Square;
use thiserror::Error;

use super::castle_rights::{
    CastleRights, BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, NO_CASTLE_RIGHTS,
    WHITE_KINGSIDE_RIGHTS, WHITE_QUEENSIDE_RIGHTS,
};
use super::color::Color;
use super::error::BoardError;
use super::piece::Piece;
use super::Board;

#[derive(Error, Debug, PartialEq)]
pub enum FenParseError {
    #[error("wrong number of fields: 6 expected, {field_count} given")]
    WrongNumberOfFields { field_count: usize },
    #[error("invalid piece character: {invalid_character:?}")]
    InvalidPieceCharacter { invalid_character: char },
    #[error("wrong number of ranks: 8 expected, {rank_count} given")]
    InvalidRankCount { rank_count: usize },
    #[error("rank too long: {invalid_rank:?}")]
    InvalidRankLength { invalid_rank: String },
    #[error("error placing piece: {board_error}")]
    ErrorPlacingPiece { board_error: BoardError },
    #[error("rank incomplete: {incomplete_rank:?}")]
    IncompleteRank { incomplete_rank: String },
    #[error("invalid color: {invalid_color:?}")]
    InvalidColor { invalid_color: String },
    #[error("invalid castling rights: {invalid_castling:?}")]
    InvalidCastlingRights { invalid_castling: char },
    #[error("invalid en passant square: {value:?}")]
    InvalidEnPassant { value: String },
    #[error("invalid halfmove clock: {invalid_clock:?}")]
    InvalidHalfmoveClock { invalid_clock: String },
    #[error("invalid fullmove number: {invalid_number:?}")]
    InvalidFullmoveNumber { invalid_number: String },
}

type FenResult<T> = Result<T, FenParseError>;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses a FEN string into a Board.
/// FEN string contains 6 fields: piece placement, active color, castling rights,
/// en passant target square, halfmove clock, and fullmove number.
pub fn parse_fen(fen: &str) -> FenResult<Board> {
    let fields = split_fen_fields(fen)?;
    let mut board = Board::new();

    parse_piece_placement(&mut board, fields.position)?;
    parse_active_color(&mut board, fields.active_color)?;
    parse_castle_rights(&mut board, fields.castle_rights)?;
    parse_en_passant(&mut board, fields.en_passant)?;
    parse_halfmove_clock(&mut board, fields.halfmove_clock)?;
    parse_fullmove_number(&mut board, fields.fullmove_number)?;

    Ok(board)
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        parse_fen(fen)
    }
}

/// Serializes the position back into FEN.
pub fn to_fen(board: &Board) -> String {
    let mut placement = String::new();
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match board.get(Square::from_rank_file(rank, file)) {
                Some((piece, color)) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(piece.to_fen(color));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let active_color = match board.turn() {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = board
        .peek_en_passant_target()
        .map_or("-", |square| square.to_algebraic());

    format!(
        "{} {} {} {} {} {}",
        placement,
        active_color,
        board.peek_castle_rights(),
        en_passant,
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

impl Board {
    pub fn to_fen(&self) -> String {
        to_fen(self)
    }
}

/// Represents the six fields in a FEN string
struct FenFields<'a> {
    position: &'a str,
    active_color: &'a str,
    castle_rights: &'a str,
    en_passant: &'a str,
    halfmove_clock: &'a str,
    fullmove_number: &'a str,
}

/// Splits a FEN string into its six component fields
fn split_fen_fields(fen: &str) -> FenResult<FenFields> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(FenParseError::WrongNumberOfFields {
            field_count: parts.len(),
        });
    }

    Ok(FenFields {
        position: parts[0],
        active_color: parts[1],
        castle_rights: parts[2],
        en_passant: parts[3],
        halfmove_clock: parts[4],
        fullmove_number: parts[5],
    })
}

/// Parses the piece placement section of the FEN string
fn parse_piece_placement(board: &mut Board, position: &str) -> FenResult<()> {
    let ranks: Vec<&str> = position.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount {
            rank_count: ranks.len(),
        });
    }

    for (rank_idx, rank) in ranks.iter().enumerate() {
        parse_rank(board, rank, 7 - rank_idx as u8)?;
    }

    Ok(())
}

/// Parses a single rank of the piece placement section
fn parse_rank(board: &mut Board, rank: &str, rank_number: u8) -> FenResult<()> {
    let mut file = 0u8;

    for c in rank.chars() {
        if file >= 8 {
            return Err(FenParseError::InvalidRankLength {
                invalid_rank: rank.to_string(),
            });
        }

        if let Some(empty_squares) = c.to_digit(10) {
            file += empty_squares as u8;
        } else {
            let (piece, color) =
                Piece::from_fen(c).ok_or(FenParseError::InvalidPieceCharacter {
                    invalid_character: c,
                })?;
            board
                .put(Square::from_rank_file(rank_number, file), piece, color)
                .map_err(|board_error| FenParseError::ErrorPlacingPiece { board_error })?;
            file += 1;
        }
    }

    if file != 8 {
        return Err(FenParseError::IncompleteRank {
            incomplete_rank: rank.to_string(),
        });
    }

    Ok(())
}

/// Parses the active color field
fn parse_active_color(board: &mut Board, active_color: &str) -> FenResult<()> {
    let color = match active_color {
        "w" => Color::White,
        "b" => Color::Black,
        _ => {
            return Err(FenParseError::InvalidColor {
                invalid_color: active_color.to_string(),
            })
        }
    };
    board.set_turn(color);
    Ok(())
}

/// Parses the castling rights field
fn parse_castle_rights(board: &mut Board, castle_rights: &str) -> FenResult<()> {
    if castle_rights == "-" {
        board.set_castle_rights(NO_CASTLE_RIGHTS);
        return Ok(());
    }

    let mut rights = CastleRights::new(0);
    for c in castle_rights.chars() {
        rights |= match c {
            'K' => WHITE_KINGSIDE_RIGHTS,
            'Q' => WHITE_QUEENSIDE_RIGHTS,
            'k' => BLACK_KINGSIDE_RIGHTS,
            'q' => BLACK_QUEENSIDE_RIGHTS,
            _ => {
                return Err(FenParseError::InvalidCastlingRights {
                    invalid_castling: c,
                })
            }
        };
    }
    board.set_castle_rights(rights);
    Ok(())
}

/// Parses the en passant target square field
fn parse_en_passant(board: &mut Board, en_passant: &str) -> FenResult<()> {
    if en_passant == "-" {
        return Ok(());
    }

    let square = Square::from_algebraic(en_passant)
        .filter(|square| square.rank() == 2 || square.rank() == 5)
        .ok_or_else(|| FenParseError::InvalidEnPassant {
            value: en_passant.to_string(),
        })?;
    board.set_en_passant_target(Some(square));
    Ok(())
}

/// Parses the halfmove clock field
fn parse_halfmove_clock(board: &mut Board, halfmove_clock: &str) -> FenResult<()> {
    let halfmove =
        halfmove_clock
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidHalfmoveClock {
                invalid_clock: halfmove_clock.to_string(),
            })?;
    board.set_halfmove_clock(halfmove);
    Ok(())
}

/// Parses the fullmove number field
fn parse_fullmove_number(board: &mut Board, fullmove_number: &str) -> FenResult<()> {
    let fullmove = fullmove_number
        .parse::<u16>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| FenParseError::InvalidFullmoveNumber {
            invalid_number: fullmove_number.to_string(),
        })?;
    board.set_fullmove_number(fullmove);
    Ok(())
}
