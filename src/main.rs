mod cli;

use cli::commands::Command;
use cli::Chess;
use structopt::StructOpt;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    Chess::from_args().execute();
}
