use common::bitboard::square::*;
use negachess::alpha_beta_searcher::SearchConfig;
use negachess::board::castle_rights::ALL_CASTLE_RIGHTS;
use negachess::board::color::Color;
use negachess::board::piece::Piece;
use negachess::board::Board;
use negachess::chess_search::{SearchOutcome, Searcher};
use negachess::evaluate::{self, GameEnding};
use negachess::move_generator::MoveGenerator;

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("alpha beta mate in 2", |b| {
        b.iter(find_alpha_beta_mate_in_2)
    });
    c.bench_function("alpha beta starting position depth 4", |b| {
        b.iter(search_starting_position)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn config(max_depth: u8) -> SearchConfig {
    SearchConfig {
        max_depth,
        seed: Some(0),
        ..SearchConfig::default()
    }
}

fn find_alpha_beta_mate_in_2() {
    let mut board = Board::new();
    board.put(F2, Piece::Pawn, Color::White).unwrap();
    board.put(G2, Piece::Pawn, Color::White).unwrap();
    board.put(H2, Piece::Pawn, Color::White).unwrap();
    board.put(G1, Piece::King, Color::White).unwrap();
    board.put(A1, Piece::Rook, Color::White).unwrap();
    board.put(E8, Piece::Rook, Color::Black).unwrap();
    board.put(E7, Piece::Queen, Color::Black).unwrap();
    board.put(H8, Piece::King, Color::Black).unwrap();
    board.set_turn(Color::Black);
    board.lose_castle_rights(ALL_CASTLE_RIGHTS);

    let mut searcher = Searcher::with_board(board, config(4));
    for _ in 0..3 {
        match searcher.search().unwrap() {
            SearchOutcome::BestMove { chess_move, .. } => searcher.play_move(chess_move).unwrap(),
            SearchOutcome::GameOver { .. } => break,
        }
    }

    assert_eq!(
        evaluate::game_ending(searcher.board(), &MoveGenerator::new()),
        Some(GameEnding::Checkmate)
    );
}

fn search_starting_position() {
    let mut searcher = Searcher::new(config(4));
    searcher.search().unwrap();
}
