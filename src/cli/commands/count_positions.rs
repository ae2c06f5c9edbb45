//! Count positions command - count possible positions at a given depth.

use std::time::Instant;

use negachess::board::Board;
use negachess::move_generator::MoveGenerator;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(
        long = "fen",
        default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    )]
    pub starting_position: Board,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let mut board = self.starting_position;
        let move_generator = MoveGenerator::new();

        for depth in 1..=self.depth {
            let start = Instant::now();
            match move_generator.count_positions(depth, &mut board) {
                Ok(count) => {
                    let elapsed = start.elapsed();
                    let positions_per_second = count as f64 / elapsed.as_secs_f64().max(1e-9);
                    println!(
                        "depth: {}, positions: {}, elapsed: {:?}, positions/s: {:.0}",
                        depth, count, elapsed, positions_per_second
                    );
                }
                Err(err) => {
                    eprintln!("Failed to count positions at depth {}: {}", depth, err);
                    return;
                }
            }
        }
    }
}
