use crate::board::piece::Piece;

/// The type of piece removed by a capturing move. The captured piece always
/// belongs to the side not making the move.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub struct Capture(pub Piece);
