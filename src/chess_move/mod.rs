pub mod capture;
pub mod castle;
pub mod chess_move;
pub mod coordinate_notation;
pub mod en_passant;
pub mod pawn_promotion;
pub mod standard;

pub use capture::Capture;
pub use castle::CastleChessMove;
pub use chess_move::ChessMove;
pub use coordinate_notation::{MoveParseError, PartialMove};
pub use en_passant::EnPassantChessMove;
pub use pawn_promotion::PawnPromotionChessMove;
pub use standard::StandardChessMove;
