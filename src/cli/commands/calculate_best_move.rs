//! Calculate best move command - determine the best move from a position.

use negachess::alpha_beta_searcher::{SearchConfig, DEFAULT_TT_CAPACITY};
use negachess::board::Board;
use negachess::chess_search::{SearchOutcome, Searcher};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(short, long, default_value = "6")]
    pub depth: u8,
    #[structopt(
        long = "fen",
        default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    )]
    pub starting_position: Board,
    /// White's remaining time in milliseconds
    #[structopt(long)]
    pub wtime: Option<u64>,
    /// Black's remaining time in milliseconds
    #[structopt(long)]
    pub btime: Option<u64>,
    #[structopt(long, default_value = "0")]
    pub winc: u64,
    #[structopt(long, default_value = "0")]
    pub binc: u64,
    /// Seed for breaking ties between equally scored moves
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let config = SearchConfig {
            max_depth: self.depth,
            tt_capacity: DEFAULT_TT_CAPACITY,
            seed: self.seed,
        };
        let mut searcher = Searcher::with_board(self.starting_position, config);

        if self.wtime.is_some() || self.btime.is_some() {
            // a missing clock means that side has time to spare
            searcher.set_clock(
                self.wtime.unwrap_or(u64::MAX / 2),
                self.btime.unwrap_or(u64::MAX / 2),
                self.winc,
                self.binc,
            );
        }

        match searcher.search() {
            Ok(SearchOutcome::BestMove {
                chess_move, score, ..
            }) => {
                println!("{}", chess_move);
                println!("score: {}", score);
            }
            Ok(SearchOutcome::GameOver { ending, .. }) => {
                eprintln!("There are no valid moves in the given position: {:?}", ending);
            }
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
