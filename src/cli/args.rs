//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, count_positions::CountPositionsArgs,
    evaluate_position::EvaluatePositionArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "negachess",
    about = "A negamax chess engine with alpha-beta pruning ♛"
)]
pub enum Chess {
    #[structopt(
        name = "calculate-best-move",
        about = "Search for the best move from a position given in FEN notation with `--fen` (default: starting position). The search deepens iteratively up to `--depth` (default: 6). Clock times in milliseconds (`--wtime`, `--btime`, `--winc`, `--binc`) bound the search by time as well."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "evaluate",
        about = "Print the static evaluation of a position given with `--fen`, term by term."
    )]
    EvaluatePosition(EvaluatePositionArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the positions reachable in exactly `--depth` plies (default: 4) from `--fen` (default: starting position), and report the time it took to do so."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for Chess {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            CalculateBestMove(cmd),
            EvaluatePosition(cmd),
            CountPositions(cmd),
        }
    }
}
