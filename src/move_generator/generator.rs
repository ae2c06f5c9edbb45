//! Legal move generation.
//!
//! Moves are produced pseudo-legally per piece type from the precomputed
//! target tables, then filtered by checking whether the mover's king would be
//! attacked in the resulting occupancy. The filter never touches the board,
//! so generation only needs a shared reference.

use log::trace;
use smallvec::SmallVec;

use common::bitboard::{Bitboard, Square, *};

use crate::board::{
    castle_rights::CastleRights,
    color::Color,
    error::BoardError,
    piece::{Piece, PROMOTABLE_PIECES},
    Board,
};
use crate::chess_move::{
    capture::Capture, castle::CastleChessMove, chess_move::ChessMove,
    en_passant::EnPassantChessMove, pawn_promotion::PawnPromotionChessMove,
    standard::StandardChessMove,
};

use super::targets::{Targets, TARGETS};

/// A list of chess moves that is optimized for small sizes.
pub type ChessMoveList = SmallVec<[ChessMove; 32]>;

/// Generates all legal moves for a given board state.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// All legal moves for the side to move.
    pub fn generate_moves(&self, board: &Board) -> ChessMoveList {
        self.generate_moves_for(board, board.turn())
    }

    /// All legal moves for `player`, regardless of whose turn it is.
    pub fn generate_moves_for(&self, board: &Board, player: Color) -> ChessMoveList {
        let targets: &Targets = &TARGETS;
        let mut moves = ChessMoveList::new();

        generate_pawn_moves(&mut moves, board, player, targets);
        generate_piece_moves(&mut moves, board, player, targets);
        generate_castle_moves(&mut moves, board, player, targets);

        moves.retain(|chess_move| !leaves_king_in_check(board, chess_move, player, targets));
        moves
    }

    pub fn is_square_attacked(&self, board: &Board, square: Square, attacker: Color) -> bool {
        !TARGETS
            .attackers_of(board, square, attacker, board.occupied(), Bitboard::EMPTY)
            .is_empty()
    }

    /// A side without a king is never in check.
    pub fn is_in_check(&self, board: &Board, player: Color) -> bool {
        board
            .king_square(player)
            .map_or(false, |king| {
                self.is_square_attacked(board, king, player.opposite())
            })
    }

    /// Counts the leaf positions reachable in exactly `depth` plies (perft).
    pub fn count_positions(&self, depth: u8, board: &mut Board) -> Result<usize, BoardError> {
        if depth == 0 {
            return Ok(1);
        }

        let candidates = self.generate_moves(board);
        if depth == 1 {
            return Ok(candidates.len());
        }

        let mut count = 0;
        for chess_move in candidates.iter() {
            chess_move.apply(board)?;
            count += self.count_positions(depth - 1, board)?;
            chess_move.undo(board)?;
        }

        trace!("counted {} positions at depth {}", count, depth);
        Ok(count)
    }
}

fn captured_piece(board: &Board, color: Color, square: Square) -> Option<Capture> {
    board.pieces(color.opposite()).get(square).map(Capture)
}

fn generate_pawn_moves(moves: &mut ChessMoveList, board: &Board, color: Color, targets: &Targets) {
    let pawns = board.pieces(color).locate(Piece::Pawn);
    let occupied = board.occupied();
    let opponent_pieces = board.pieces(color.opposite()).occupied();
    let en_passant_target = board.peek_en_passant_target();

    let (forward, start_rank, promotion_rank) = match color {
        Color::White => (1, Bitboard::RANK_2, Bitboard::RANK_8),
        Color::Black => (-1, Bitboard::RANK_7, Bitboard::RANK_1),
    };

    for from in pawns.squares() {
        let mut destinations: SmallVec<[(Square, Option<Capture>); 4]> = SmallVec::new();

        if let Some(single) = from.offset(forward, 0) {
            if !occupied.contains(single) {
                destinations.push((single, None));

                if from.overlaps(start_rank) {
                    if let Some(double) = single.offset(forward, 0) {
                        if !occupied.contains(double) {
                            destinations.push((double, None));
                        }
                    }
                }
            }
        }

        let attacks = targets.pawn_attacks(color, from);
        for to in (attacks & opponent_pieces).squares() {
            destinations.push((to, captured_piece(board, color, to)));
        }

        for (to, capture) in destinations {
            if to.overlaps(promotion_rank) {
                for &piece in PROMOTABLE_PIECES.iter() {
                    moves.push(ChessMove::PawnPromotion(PawnPromotionChessMove::new(
                        from, to, capture, piece,
                    )));
                }
            } else {
                moves.push(ChessMove::Standard(StandardChessMove::new(from, to, capture)));
            }
        }

        if let Some(target) = en_passant_target {
            if attacks.contains(target) {
                moves.push(ChessMove::EnPassant(EnPassantChessMove::new(from, target)));
            }
        }
    }
}

/// Knights, bishops, rooks, queens and the king's single steps.
fn generate_piece_moves(moves: &mut ChessMoveList, board: &Board, color: Color, targets: &Targets) {
    let own_pieces = board.pieces(color).occupied();
    let occupied = board.occupied();

    for (from, piece) in board.pieces(color).iter() {
        if piece == Piece::Pawn {
            continue;
        }

        let destinations = targets.piece_targets(piece, color, from, occupied) & !own_pieces;
        for to in destinations.squares() {
            let capture = captured_piece(board, color, to);
            moves.push(ChessMove::Standard(StandardChessMove::new(from, to, capture)));
        }
    }
}

/// Castling requires the right, the king and rook on their home squares,
/// empty squares between them, and a king that neither starts on, passes
/// through, nor lands on an attacked square.
fn generate_castle_moves(moves: &mut ChessMoveList, board: &Board, color: Color, targets: &Targets) {
    let rights = board.peek_castle_rights();
    let (king_home, kingside_rook, queenside_rook) = match color {
        Color::White => (E1, H1, A1),
        Color::Black => (E8, H8, A8),
    };

    if board.get(king_home) != Some((Piece::King, color)) {
        return;
    }

    let occupied = board.occupied();
    let opponent = color.opposite();
    let is_attacked = |square: Square| {
        !targets
            .attackers_of(board, square, opponent, occupied, Bitboard::EMPTY)
            .is_empty()
    };

    if is_attacked(king_home) {
        return;
    }

    let (kingside_path, kingside_empty) = match color {
        Color::White => ([F1, G1], [F1, G1]),
        Color::Black => ([F8, G8], [F8, G8]),
    };
    if rights.contains(CastleRights::kingside(color))
        && board.get(kingside_rook) == Some((Piece::Rook, color))
        && kingside_empty.iter().all(|&sq| !occupied.contains(sq))
        && kingside_path.iter().all(|&sq| !is_attacked(sq))
    {
        moves.push(ChessMove::Castle(CastleChessMove::castle_kingside(color)));
    }

    let (queenside_path, queenside_empty) = match color {
        Color::White => ([D1, C1], [D1, C1, B1]),
        Color::Black => ([D8, C8], [D8, C8, B8]),
    };
    if rights.contains(CastleRights::queenside(color))
        && board.get(queenside_rook) == Some((Piece::Rook, color))
        && queenside_empty.iter().all(|&sq| !occupied.contains(sq))
        && queenside_path.iter().all(|&sq| !is_attacked(sq))
    {
        moves.push(ChessMove::Castle(CastleChessMove::castle_queenside(color)));
    }
}

/// Replays the move on the occupancy only and tests the king square against
/// the opponent's remaining pieces.
fn leaves_king_in_check(
    board: &Board,
    chess_move: &ChessMove,
    color: Color,
    targets: &Targets,
) -> bool {
    let from = chess_move.from_square();
    let to = chess_move.to_square();

    let king_square = match board.king_square(color) {
        Some(king) if king == from => to,
        Some(king) => king,
        None => return false,
    };

    let mut occupied = board.occupied();
    occupied &= !from.to_bitboard();
    occupied |= to.to_bitboard();

    let mut removed = to.to_bitboard();
    match chess_move {
        ChessMove::EnPassant(m) => {
            let captured = m.captured_square();
            occupied &= !captured.to_bitboard();
            removed |= captured.to_bitboard();
        }
        ChessMove::Castle(m) => {
            if let Ok((_, rook_from, rook_to)) = m.castle_details() {
                occupied &= !rook_from.to_bitboard();
                occupied |= rook_to.to_bitboard();
            }
        }
        _ => {}
    }

    !targets
        .attackers_of(board, king_square, color.opposite(), occupied, removed)
        .is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::parse_fen;
    use crate::{
        castle_kingside, castle_queenside, chess_position, en_passant_move, promotion, std_move,
    };
    use smallvec::smallvec;

    fn sorted(mut moves: ChessMoveList) -> ChessMoveList {
        moves.sort();
        moves
    }

    #[test]
    fn test_generate_pawn_moves() {
        let board = chess_position! {
            ..r.....
            .P.p...p
            ......P.
            p.......
            P.......
            .....r..
            p..P.P..
            ........
        };

        let expected_white_moves: ChessMoveList = smallvec![
            std_move!(D2, D3),
            std_move!(D2, D4),
            std_move!(G6, G7),
            std_move!(G6, H7, Capture(Piece::Pawn)),
            promotion!(B7, B8, None, Piece::Queen),
            promotion!(B7, B8, None, Piece::Rook),
            promotion!(B7, B8, None, Piece::Knight),
            promotion!(B7, B8, None, Piece::Bishop),
            promotion!(B7, C8, Some(Capture(Piece::Rook)), Piece::Queen),
            promotion!(B7, C8, Some(Capture(Piece::Rook)), Piece::Rook),
            promotion!(B7, C8, Some(Capture(Piece::Rook)), Piece::Knight),
            promotion!(B7, C8, Some(Capture(Piece::Rook)), Piece::Bishop),
        ];

        let expected_black_moves: ChessMoveList = smallvec![
            std_move!(D7, D6),
            std_move!(D7, D5),
            std_move!(H7, H6),
            std_move!(H7, H5),
            std_move!(H7, G6, Capture(Piece::Pawn)),
            promotion!(A2, A1, None, Piece::Queen),
            promotion!(A2, A1, None, Piece::Rook),
            promotion!(A2, A1, None, Piece::Knight),
            promotion!(A2, A1, None, Piece::Bishop),
        ];

        let mut white_moves = smallvec![];
        generate_pawn_moves(&mut white_moves, &board, Color::White, &TARGETS);
        assert_eq!(sorted(expected_white_moves), sorted(white_moves));

        let mut black_moves = smallvec![];
        generate_pawn_moves(&mut black_moves, &board, Color::Black, &TARGETS);
        assert_eq!(sorted(expected_black_moves), sorted(black_moves));
    }

    #[test]
    fn test_generate_pawn_double_moves() {
        let board = chess_position! {
            ........
            ........
            ........
            ........
            ........
            ..P.p...
            .PP.P...
            ........
        };

        let expected_moves: ChessMoveList =
            smallvec![std_move!(B2, B3), std_move!(B2, B4), std_move!(C3, C4)];

        let mut moves = smallvec![];
        generate_pawn_moves(&mut moves, &board, Color::White, &TARGETS);
        assert_eq!(sorted(expected_moves), sorted(moves));
    }

    #[test]
    fn test_generate_knight_and_king_moves() {
        let board = chess_position! {
            ........
            ........
            ........
            ........
            ........
            .p......
            ..P.....
            N......K
        };

        let expected_moves: ChessMoveList = smallvec![
            std_move!(A1, B3, Capture(Piece::Pawn)),
            std_move!(H1, G1),
            std_move!(H1, G2),
            std_move!(H1, H2),
        ];

        let mut moves = smallvec![];
        generate_piece_moves(&mut moves, &board, Color::White, &TARGETS);
        assert_eq!(sorted(expected_moves), sorted(moves));
    }

    #[test]
    fn test_generate_rook_moves() {
        let board = chess_position! {
            ........
            ...n....
            ........
            ........
            .P.R...p
            ........
            ........
            ........
        };

        let expected_moves: ChessMoveList = smallvec![
            std_move!(D4, C4),
            std_move!(D4, E4),
            std_move!(D4, F4),
            std_move!(D4, G4),
            std_move!(D4, H4, Capture(Piece::Pawn)),
            std_move!(D4, D5),
            std_move!(D4, D6),
            std_move!(D4, D7, Capture(Piece::Knight)),
            std_move!(D4, D3),
            std_move!(D4, D2),
            std_move!(D4, D1),
        ];

        let mut moves = smallvec![];
        generate_piece_moves(&mut moves, &board, Color::White, &TARGETS);
        moves.retain(|m: &mut ChessMove| m.from_square() == D4);
        assert_eq!(sorted(expected_moves), sorted(moves));
    }

    #[test]
    fn test_generate_en_passant_moves() {
        let mut board = chess_position! {
            ....k...
            ........
            ........
            ........
            ...p....
            ........
            ..P.....
            ....K...
        };

        std_move!(C2, C4).apply(&mut board).unwrap();
        assert_eq!(Some(C3), board.peek_en_passant_target());

        let expected_black_moves: ChessMoveList =
            smallvec![std_move!(D4, D3), en_passant_move!(D4, C3)];

        let mut moves = smallvec![];
        generate_pawn_moves(&mut moves, &board, Color::Black, &TARGETS);
        assert_eq!(sorted(expected_black_moves), sorted(moves));
    }

    #[test]
    fn test_en_passant_exposing_king_is_illegal() {
        let mut board = chess_position! {
            ........
            ........
            ........
            ........
            k..p...R
            ........
            ..P.....
            ....K...
        };
        board.set_castle_rights(crate::board::castle_rights::NO_CASTLE_RIGHTS);

        std_move!(C2, C4).apply(&mut board).unwrap();
        let moves = MoveGenerator::new().generate_moves(&board);
        assert!(!moves.contains(&en_passant_move!(D4, C3)));
        assert!(moves.contains(&std_move!(D4, D3)));
    }

    #[test]
    fn test_generate_castle_moves_with_all_rights() {
        let board = chess_position! {
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };

        let mut white_moves = smallvec![];
        generate_castle_moves(&mut white_moves, &board, Color::White, &TARGETS);
        assert_eq!(
            sorted(smallvec![
                castle_kingside!(Color::White),
                castle_queenside!(Color::White)
            ]),
            sorted(white_moves),
            "failed to generate white castling moves"
        );

        let mut black_moves = smallvec![];
        generate_castle_moves(&mut black_moves, &board, Color::Black, &TARGETS);
        assert_eq!(
            sorted(smallvec![
                castle_kingside!(Color::Black),
                castle_queenside!(Color::Black)
            ]),
            sorted(black_moves),
            "failed to generate black castling moves"
        );
    }

    #[test]
    fn test_generate_castle_moves_under_attack() {
        let board = chess_position! {
            r...k..r
            ...r....
            ........
            ........
            ........
            B.......
            ........
            R...K..R
        };

        let mut white_moves = smallvec![];
        generate_castle_moves(&mut white_moves, &board, Color::White, &TARGETS);
        let expected_white_moves: ChessMoveList = smallvec![castle_kingside!(Color::White)];
        assert_eq!(expected_white_moves, white_moves);

        let mut black_moves = smallvec![];
        generate_castle_moves(&mut black_moves, &board, Color::Black, &TARGETS);
        let expected_black_moves: ChessMoveList = smallvec![castle_queenside!(Color::Black)];
        assert_eq!(expected_black_moves, black_moves);
    }

    #[test]
    fn test_generate_castle_moves_blocked() {
        let board = chess_position! {
            rn..k.nr
            ........
            ........
            ........
            ........
            ........
            ........
            R..QKB.R
        };

        let mut white_moves = smallvec![];
        generate_castle_moves(&mut white_moves, &board, Color::White, &TARGETS);
        assert!(white_moves.is_empty());

        let mut black_moves = smallvec![];
        generate_castle_moves(&mut black_moves, &board, Color::Black, &TARGETS);
        assert!(black_moves.is_empty());
    }

    #[test]
    fn test_no_castling_when_in_check() {
        let board = chess_position! {
            ....k...
            ....r...
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };

        let moves = MoveGenerator::new().generate_moves(&board);
        assert!(!moves.iter().any(|m| matches!(m, ChessMove::Castle(_))));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_pin_ray() {
        let board = chess_position! {
            ....r..k
            ........
            ........
            ........
            ........
            ........
            ....N...
            ....K...
        };

        let moves = MoveGenerator::new().generate_moves(&board);
        assert!(moves.iter().all(|m| m.from_square() != E2));
    }

    #[test]
    fn test_double_check_only_king_moves() {
        let board = chess_position! {
            ....r..k
            ........
            ........
            b.......
            ........
            ........
            ........
            ....K.N.
        };

        let moves = MoveGenerator::new().generate_moves(&board);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.from_square() == E1));
    }

    #[test]
    fn test_is_in_check() {
        let board = chess_position! {
            ....k...
            ........
            ........
            .B......
            ........
            ........
            ........
            ....K...
        };

        let generator = MoveGenerator::new();
        assert!(generator.is_in_check(&board, Color::Black));
        assert!(!generator.is_in_check(&board, Color::White));
    }

    #[test]
    fn test_count_positions_from_starting_position() {
        let generator = MoveGenerator::new();
        let mut board = Board::starting_position();
        let hash = board.current_position_hash();

        assert_eq!(generator.count_positions(0, &mut board).unwrap(), 1);
        assert_eq!(generator.count_positions(1, &mut board).unwrap(), 20);
        assert_eq!(generator.count_positions(2, &mut board).unwrap(), 400);
        assert_eq!(generator.count_positions(3, &mut board).unwrap(), 8_902);
        assert_eq!(board.current_position_hash(), hash);
    }

    #[test]
    fn test_count_positions_kiwipete() {
        let generator = MoveGenerator::new();
        let mut board =
            parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();

        assert_eq!(generator.count_positions(1, &mut board).unwrap(), 48);
        assert_eq!(generator.count_positions(2, &mut board).unwrap(), 2_039);
    }

    #[test]
    fn test_count_positions_endgame_with_en_passant_pins() {
        let generator = MoveGenerator::new();
        let mut board = parse_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();

        assert_eq!(generator.count_positions(1, &mut board).unwrap(), 14);
        assert_eq!(generator.count_positions(2, &mut board).unwrap(), 191);
        assert_eq!(generator.count_positions(3, &mut board).unwrap(), 2_812);
    }
}
