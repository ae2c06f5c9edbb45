use std::str::FromStr;

use common::bitboard::Square;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::piece::Piece;

use super::ChessMove;

static COORDINATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-h][1-8])([a-h][1-8])([nbrq])?$").expect("coordinate pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoveParseError {
    #[error("invalid coordinate notation: {input:?}")]
    InvalidFormat { input: String },
    #[error("no legal move matches {input:?}")]
    NoMatchingMove { input: String },
}

/// A move as typed by a user: origin, destination and an optional promotion
/// piece. It carries none of the capture or special-move information a
/// `ChessMove` needs, so it has to be matched against the legal moves of a
/// position with `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialMove {
    pub from_square: Square,
    pub to_square: Square,
    pub promotion: Option<Piece>,
}

impl PartialMove {
    pub fn matches(&self, chess_move: &ChessMove) -> bool {
        chess_move.from_square() == self.from_square
            && chess_move.to_square() == self.to_square
            && chess_move.promotion() == self.promotion
    }

    /// Finds the legal move this partial move describes.
    pub fn resolve<'a, I>(&self, candidates: I) -> Result<ChessMove, MoveParseError>
    where
        I: IntoIterator<Item = &'a ChessMove>,
    {
        candidates
            .into_iter()
            .find(|chess_move| self.matches(chess_move))
            .copied()
            .ok_or_else(|| MoveParseError::NoMatchingMove {
                input: self.to_string(),
            })
    }
}

impl FromStr for PartialMove {
    type Err = MoveParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        let invalid = || MoveParseError::InvalidFormat {
            input: input.to_string(),
        };

        let caps = COORDINATE_REGEX.captures(&normalized).ok_or_else(invalid)?;
        let from_square = Square::from_algebraic(&caps[1]).ok_or_else(invalid)?;
        let to_square = Square::from_algebraic(&caps[2]).ok_or_else(invalid)?;
        let promotion = match caps.get(3) {
            Some(m) => Some(
                m.as_str()
                    .chars()
                    .next()
                    .and_then(Piece::from_promotion_char)
                    .ok_or_else(invalid)?,
            ),
            None => None,
        };

        Ok(Self {
            from_square,
            to_square,
            promotion,
        })
    }
}

impl std::fmt::Display for PartialMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let promotion = self
            .promotion
            .and_then(|piece| piece.to_promotion_char())
            .map(String::from)
            .unwrap_or_default();
        write!(f, "{}{}{}", self.from_square, self.to_square, promotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::chess_move::capture::Capture;
    use crate::{castle_kingside, promotion, std_move};
    use common::bitboard::square::*;

    #[test]
    fn test_parse_partial_move() {
        let partial: PartialMove = "e2e4".parse().unwrap();
        assert_eq!(partial.from_square, E2);
        assert_eq!(partial.to_square, E4);
        assert_eq!(partial.promotion, None);

        let partial: PartialMove = "A7A8Q".parse().unwrap();
        assert_eq!(partial.from_square, A7);
        assert_eq!(partial.promotion, Some(Piece::Queen));
        assert_eq!(partial.to_string(), "a7a8q");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "e2", "e9e4", "e2e4k", "e2-e4", "i1a1"].iter() {
            assert!(
                matches!(
                    input.parse::<PartialMove>(),
                    Err(MoveParseError::InvalidFormat { .. })
                ),
                "{} should not parse",
                input
            );
        }
    }

    #[test]
    fn test_resolve_against_candidates() {
        let candidates = vec![
            std_move!(D4, E5, Capture(Piece::Pawn)),
            promotion!(A7, A8, None, Piece::Queen),
            promotion!(A7, A8, None, Piece::Knight),
            castle_kingside!(Color::White),
        ];

        let capture: PartialMove = "d4e5".parse().unwrap();
        assert_eq!(capture.resolve(&candidates), Ok(candidates[0]));

        let underpromotion: PartialMove = "a7a8n".parse().unwrap();
        assert_eq!(underpromotion.resolve(&candidates), Ok(candidates[2]));

        let castle: PartialMove = "e1g1".parse().unwrap();
        assert_eq!(castle.resolve(&candidates), Ok(candidates[3]));

        let missing_promotion: PartialMove = "a7a8".parse().unwrap();
        assert!(matches!(
            missing_promotion.resolve(&candidates),
            Err(MoveParseError::NoMatchingMove { .. })
        ));
    }
}
