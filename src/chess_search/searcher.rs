//! The engine facade: owns the game position, the search context and the
//! clock, and answers "what should the side to move play?".

use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::alpha_beta_searcher::{
    allocate_time, fixed_depth_search, iterative_deepening, Score, SearchConfig,
    SearchContext, SearchError, SearchReport, SearchStats, TimeBudget, DRAW_SCORE, MATE_SCORE,
};
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::fen::FenParseError;
use crate::board::Board;
use crate::chess_move::{ChessMove, MoveParseError, PartialMove};
use crate::evaluate::{self, GameEnding};

use super::implementation::{ChessEvaluator, ChessMoveGenerator};
use super::move_orderer::ChessMoveOrderer;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    MoveParse(#[from] MoveParseError),
    #[error(transparent)]
    Fen(#[from] FenParseError),
    #[error("{chess_move} is not a legal move in this position")]
    IllegalMove { chess_move: ChessMove },
    #[error("no move has been played")]
    NothingToUndo,
}

/// Both players' clocks, as sent by a GUI before each move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeControl {
    pub white_time: Duration,
    pub black_time: Duration,
    pub white_increment: Duration,
    pub black_increment: Duration,
}

impl TimeControl {
    pub fn from_millis(wtime: u64, btime: u64, winc: u64, binc: u64) -> Self {
        Self {
            white_time: Duration::from_millis(wtime),
            black_time: Duration::from_millis(btime),
            white_increment: Duration::from_millis(winc),
            black_increment: Duration::from_millis(binc),
        }
    }

    /// Time to spend on the current move for `color`.
    pub fn allocation(&self, color: Color) -> Duration {
        match color {
            Color::White => allocate_time(self.white_time, self.white_increment),
            Color::Black => allocate_time(self.black_time, self.black_increment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    BestMove {
        chess_move: ChessMove,
        score: Score,
        depth: u8,
        legal_moves: usize,
        best_moves: Vec<ChessMove>,
    },
    /// The side to move has no legal moves.
    GameOver { ending: GameEnding, score: Score },
}

impl From<SearchReport<ChessMove>> for SearchOutcome {
    fn from(report: SearchReport<ChessMove>) -> Self {
        SearchOutcome::BestMove {
            chess_move: report.best_move,
            score: report.score,
            depth: report.depth,
            legal_moves: report.legal_moves,
            best_moves: report.best_moves,
        }
    }
}

pub struct Searcher {
    board: Board,
    played_moves: Vec<ChessMove>,
    context: SearchContext<ChessMove>,
    move_generator: ChessMoveGenerator,
    evaluator: ChessEvaluator,
    move_orderer: ChessMoveOrderer,
    clock: Option<TimeControl>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Searcher {
    /// A searcher for the standard starting position.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_board(Board::starting_position(), config)
    }

    pub fn with_board(board: Board, config: SearchConfig) -> Self {
        Self {
            board,
            played_moves: Vec::new(),
            context: SearchContext::new(config),
            move_generator: ChessMoveGenerator::new(),
            evaluator: ChessEvaluator,
            move_orderer: ChessMoveOrderer::new(),
            clock: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        self.move_generator
            .inner()
            .generate_moves(&self.board)
            .into_iter()
            .collect()
    }

    /// Plays a move in the game. The position left behind is recorded in the
    /// repetition history.
    pub fn play_move(&mut self, chess_move: ChessMove) -> Result<(), EngineError> {
        if !self.legal_moves().contains(&chess_move) {
            return Err(EngineError::IllegalMove { chess_move });
        }
        chess_move.apply(&mut self.board)?;
        self.played_moves.push(chess_move);
        debug!("played {}", chess_move);
        Ok(())
    }

    /// Parses a move in coordinate notation (e.g. `e2e4`, `e7e8q`) and plays
    /// it.
    pub fn play_coordinate_move(&mut self, input: &str) -> Result<ChessMove, EngineError> {
        let partial: PartialMove = input.parse()?;
        let chess_move = partial.resolve(self.legal_moves().iter())?;
        self.play_move(chess_move)?;
        Ok(chess_move)
    }

    /// Takes back the last played move.
    pub fn undo_move(&mut self) -> Result<ChessMove, EngineError> {
        let chess_move = self.played_moves.pop().ok_or(EngineError::NothingToUndo)?;
        chess_move.undo(&mut self.board)?;
        Ok(chess_move)
    }

    pub fn set_max_depth(&mut self, max_depth: u8) {
        self.context.set_max_depth(max_depth);
    }

    pub fn clear_transposition_table(&mut self) {
        self.context.clear_transposition_table();
    }

    /// Milliseconds left on each clock and the per-move increments. Without a
    /// clock the search is bounded by depth only.
    pub fn set_clock(&mut self, wtime: u64, btime: u64, winc: u64, binc: u64) {
        self.clock = Some(TimeControl::from_millis(wtime, btime, winc, binc));
    }

    pub fn clear_clock(&mut self) {
        self.clock = None;
    }

    pub fn stats(&self) -> &SearchStats {
        self.context.stats()
    }

    /// Full-window alpha-beta score of the current position at a fixed
    /// depth, from the side to move's perspective.
    pub fn score_position(&mut self, depth: u8) -> Result<Score, EngineError> {
        let score = fixed_depth_search(
            &mut self.context,
            &mut self.board,
            &self.move_generator,
            &self.evaluator,
            &mut self.move_orderer,
            depth,
        )?;
        Ok(score)
    }

    /// Picks a move for the side to move.
    pub fn search(&mut self) -> Result<SearchOutcome, EngineError> {
        let candidates = self.move_generator.inner().generate_moves(&self.board);
        if candidates.is_empty() {
            let outcome = if evaluate::current_player_is_in_check(
                &self.board,
                self.move_generator.inner(),
            ) {
                SearchOutcome::GameOver {
                    ending: GameEnding::Checkmate,
                    score: -MATE_SCORE,
                }
            } else {
                SearchOutcome::GameOver {
                    ending: GameEnding::Stalemate,
                    score: DRAW_SCORE,
                }
            };
            info!("no legal moves: {:?}", outcome);
            return Ok(outcome);
        }

        let budget = match self.clock {
            Some(clock) => TimeBudget::new(clock.allocation(self.board.turn())),
            None => TimeBudget::unlimited(),
        };
        debug!("searching with budget {:?}", budget.allocation());

        let report = match iterative_deepening(
            &mut self.context,
            &mut self.board,
            &self.move_generator,
            &self.evaluator,
            &mut self.move_orderer,
            budget,
        ) {
            Ok(report) => report,
            Err(SearchError::InvalidMove(reason)) => {
                debug_assert!(false, "search applied an invalid move: {}", reason);
                warn!("search failed ({}), falling back to the first legal move", reason);
                let chess_move = candidates[0];
                return Ok(SearchOutcome::BestMove {
                    chess_move,
                    score: evaluate::evaluate(&self.board),
                    depth: 0,
                    legal_moves: candidates.len(),
                    best_moves: vec![chess_move],
                });
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            "best move {} score {} depth {} legal moves {} best-scoring moves {} nodes {} time {}ms",
            report.best_move,
            report.score,
            report.depth,
            report.legal_moves,
            report.best_moves.len(),
            report.nodes,
            report.elapsed.as_millis()
        );

        Ok(report.into())
    }
}
