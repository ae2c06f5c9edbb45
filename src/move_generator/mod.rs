//! Chess move generation algorithms.

pub mod generator;
mod ray_table;
mod targets;

pub use generator::{ChessMoveList, MoveGenerator};
