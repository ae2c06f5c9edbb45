//! Evaluate position command - print the static evaluation of a position.

use negachess::board::Board;
use negachess::evaluate;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct EvaluatePositionArgs {
    #[structopt(long = "fen")]
    pub position: Board,
}

impl Command for EvaluatePositionArgs {
    fn execute(self) {
        println!("{}", self.position);
        println!("{}", evaluate::breakdown(&self.position));
    }
}
