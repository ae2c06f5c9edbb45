//! Chess-specific implementation of the alpha-beta search traits, plus the
//! `Searcher` facade that plays games with them.

mod history_table;
pub mod implementation;
mod move_orderer;
mod searcher;


pub use history_table::HistoryTable;
pub use implementation::{ChessEvaluator, ChessMoveGenerator};
pub use move_orderer::ChessMoveOrderer;
pub use searcher::{EngineError, SearchOutcome, Searcher, TimeControl};
