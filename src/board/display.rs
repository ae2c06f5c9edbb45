use std::fmt;

use common::bitboard::Square;

use super::Board;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let square = Square::from_rank_file(rank, file);
                let c = match self.get(square) {
                    Some((piece, color)) => piece.to_fen(color),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  abcdefgh")?;
        write!(f, "{} to move", self.turn())
    }
}

/// Builds a `Board` from an 8x8 grid of FEN piece characters, rank 8 first.
/// `.` marks an empty square. The side to move is White and all castle rights
/// are set; adjust them afterwards when the fixture needs something else.
#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (piece, color) = $crate::board::piece::Piece::from_fen(c)
                    .expect("Invalid character in chess position");
                // The macro input is from white's perspective, so the bottom
                // left character is A1 (rather than the first character in the
                // sequence).
                let row = i / 8;
                let col = i % 8;
                let square_num = (8 * (7 - row) + col) as u8;
                board
                    .put(common::bitboard::square::Square::new(square_num), piece, color)
                    .expect("each square is filled once");
            }
        }
        board
    }};
}
