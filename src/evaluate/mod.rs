//! Static evaluation and game-ending detection.
//!
//! The evaluation tapers between an opening score and an endgame score based
//! on how much non-pawn material has left the board.

use core::fmt;

use log::trace;

use crate::alpha_beta_searcher::Score;
use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::move_generator::MoveGenerator;

use self::evaluation_tables::{
    endgame_king_bonus, positional_bonus, MATERIAL_VALUES, PHASE_WEIGHTS, TOTAL_PHASE,
};

mod evaluation_tables;

/// 0 is the opening, `PHASE_SCALE` is a bare endgame.
pub const PHASE_SCALE: i32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate,
    Stalemate,
    Repetition,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl fmt::Display for GameEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GameEnding::Checkmate => "checkmate",
            GameEnding::Stalemate => "stalemate",
            GameEnding::Repetition => "draw by threefold repetition",
            GameEnding::FiftyMoveRule => "draw by the fifty-move rule",
            GameEnding::InsufficientMaterial => "draw by insufficient material",
        };
        write!(f, "{}", msg)
    }
}

#[inline(always)]
pub fn current_player_is_in_check(board: &Board, move_generator: &MoveGenerator) -> bool {
    player_is_in_check(board, move_generator, board.turn())
}

#[inline(always)]
pub fn player_is_in_check(board: &Board, move_generator: &MoveGenerator, player: Color) -> bool {
    move_generator.is_in_check(board, player)
}

pub fn player_is_in_checkmate(
    board: &Board,
    move_generator: &MoveGenerator,
    player: Color,
) -> bool {
    player_is_in_check(board, move_generator, player)
        && move_generator.generate_moves_for(board, player).is_empty()
}

pub fn player_is_in_stalemate(
    board: &Board,
    move_generator: &MoveGenerator,
    player: Color,
) -> bool {
    !player_is_in_check(board, move_generator, player)
        && move_generator.generate_moves_for(board, player).is_empty()
}

/// Returns the game ending state if the game has ended, otherwise returns None.
/// A position without legal moves is decided by mate or stalemate before any
/// draw rule is considered.
pub fn game_ending(board: &Board, move_generator: &MoveGenerator) -> Option<GameEnding> {
    if move_generator.generate_moves(board).is_empty() {
        return if current_player_is_in_check(board, move_generator) {
            Some(GameEnding::Checkmate)
        } else {
            Some(GameEnding::Stalemate)
        };
    }

    if board.is_threefold_repetition() {
        Some(GameEnding::Repetition)
    } else if board.is_fifty_move_draw() {
        Some(GameEnding::FiftyMoveRule)
    } else if board.has_insufficient_material() {
        Some(GameEnding::InsufficientMaterial)
    } else {
        None
    }
}

/// The score of the board from the perspective of the side to move.
#[inline(always)]
pub fn evaluate(board: &Board) -> Score {
    white_score(board) * board.turn().perspective()
}

/// The score of the board from White's perspective.
pub fn white_score(board: &Board) -> Score {
    let terms = EvaluationTerms::collect(board);
    taper(terms.opening(), terms.endgame(), terms.phase)
}

/// Game phase in `0..=PHASE_SCALE`, derived from the non-pawn material still
/// on the board.
pub fn phase(board: &Board) -> i32 {
    let remaining: i32 = Color::ALL
        .iter()
        .flat_map(|&color| board.pieces(color).iter())
        .map(|(_, piece)| PHASE_WEIGHTS[piece.index()])
        .sum();
    phase_from_remaining(remaining)
}

fn phase_from_remaining(remaining: i32) -> i32 {
    let phase = ((TOTAL_PHASE - remaining) * PHASE_SCALE + TOTAL_PHASE / 2) / TOTAL_PHASE;
    phase.max(0).min(PHASE_SCALE)
}

fn taper(opening: Score, endgame: Score, phase: i32) -> Score {
    (opening * (PHASE_SCALE - phase) + endgame * phase) / PHASE_SCALE
}

/// White-relative sub-scores of a position.
struct EvaluationTerms {
    material: Score,
    positional: Score,
    king_endgame: Score,
    phase: i32,
}

impl EvaluationTerms {
    fn collect(board: &Board) -> Self {
        let mut terms = EvaluationTerms {
            material: 0,
            positional: 0,
            king_endgame: 0,
            phase: phase(board),
        };

        for &color in Color::ALL.iter() {
            let sign = color.perspective();
            for (square, piece) in board.pieces(color).iter() {
                terms.material += sign * MATERIAL_VALUES[piece.index()];
                terms.positional += sign * positional_bonus(piece, square, color);
                if piece == Piece::King {
                    terms.king_endgame += sign * endgame_king_bonus(square, color);
                }
            }
        }

        terms
    }

    fn opening(&self) -> Score {
        self.material + self.positional
    }

    /// Only king activity counts once the board has emptied out; material
    /// fades with the opening half of the blend.
    fn endgame(&self) -> Score {
        self.king_endgame
    }
}

/// Every intermediate term of the evaluation, for diagnostics. All values
/// except `score` are White-relative; `score` is what `evaluate` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationBreakdown {
    pub material: Score,
    pub positional: Score,
    pub opening: Score,
    pub endgame: Score,
    pub phase: i32,
    pub score: Score,
}

pub fn breakdown(board: &Board) -> EvaluationBreakdown {
    let terms = EvaluationTerms::collect(board);
    let white = taper(terms.opening(), terms.endgame(), terms.phase);

    let breakdown = EvaluationBreakdown {
        material: terms.material,
        positional: terms.positional,
        opening: terms.opening(),
        endgame: terms.endgame(),
        phase: terms.phase,
        score: white * board.turn().perspective(),
    };
    trace!("evaluation breakdown: {:?}", breakdown);
    breakdown
}

impl fmt::Display for EvaluationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "material: {}", self.material)?;
        writeln!(f, "position: {}", self.positional)?;
        writeln!(f, "opening score: {}", self.opening)?;
        writeln!(f, "endgame score: {}", self.endgame)?;
        writeln!(f, "phase: {}", self.phase)?;
        writeln!(
            f,
            "adjusted opening score: {}",
            self.opening * (PHASE_SCALE - self.phase) / PHASE_SCALE
        )?;
        writeln!(
            f,
            "adjusted endgame score: {}",
            self.endgame * self.phase / PHASE_SCALE
        )?;
        write!(f, "score (side to move): {}", self.score)
    }
}
