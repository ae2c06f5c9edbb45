//! Chess-specific move ordering for improved alpha-beta pruning.

use std::cmp::Reverse;

use crate::alpha_beta_searcher::MoveOrderer;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::chess_move::{Capture, ChessMove};

use super::history_table::HistoryTable;

/// Orders captures and promotions first by MVV-LVA (most valuable victim,
/// least valuable attacker), then quiet moves by their history score.
#[derive(Default)]
pub struct ChessMoveOrderer {
    history: HistoryTable,
}

impl ChessMoveOrderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn sort_key(&self, chess_move: &ChessMove, board: &Board) -> (bool, u32) {
        if chess_move.is_tactical() {
            (true, mvv_lva(chess_move, board))
        } else {
            (
                false,
                self.history
                    .score(chess_move.from_square(), chess_move.to_square()),
            )
        }
    }
}

impl MoveOrderer<Board, ChessMove> for ChessMoveOrderer {
    #[inline]
    fn order_moves(&self, moves: &mut [ChessMove], state: &Board) {
        moves.sort_by_cached_key(|chess_move| Reverse(self.sort_key(chess_move, state)));
    }

    fn record_cutoff(&mut self, chess_move: &ChessMove, _state: &Board, depth: i32) {
        self.history
            .record_cutoff(chess_move.from_square(), chess_move.to_square(), depth);
    }

    fn new_search(&mut self) {
        self.history.age();
    }
}

/// Victim and promotion value dominate; the attacker's value only breaks ties.
fn mvv_lva(chess_move: &ChessMove, board: &Board) -> u32 {
    let victim = chess_move
        .captures()
        .map_or(0, |Capture(piece)| piece.index() as u32 + 1);
    let promotion = chess_move
        .promotion()
        .map_or(0, |piece| piece.index() as u32);
    let attacker = match chess_move {
        ChessMove::Standard(_) => board
            .get(chess_move.from_square())
            .map_or(Piece::King, |(piece, _)| piece),
        _ => Piece::Pawn,
    };

    (victim + promotion) * 8 + (Piece::King.index() as u32 + 1 - attacker.index() as u32)
}
