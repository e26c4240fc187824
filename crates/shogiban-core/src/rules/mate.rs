//! 詰みと打ち歩詰め

use log::trace;

use crate::board::{Board, Overlay, is_attacked_by};
use crate::types::{Direction, Move, Piece, PieceType};

impl Board {
    /// 手番側が詰んでいるか（王手がかかっていて回避手がない）
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_move()
    }

    /// 歩を打つ手 `mv` が打ち歩詰めになるか
    ///
    /// 打った歩が玉の正面でなければ王手ではないので詰みもない。
    /// 王手なら、玉以外の駒で歩を取る手（取った駒がピンされていないか）、玉で歩を取る手、
    /// 玉が隣の升へ逃げる手のいずれもないときに詰み。合駒はできない。
    pub fn is_drop_pawn_mate(&self, mv: Move) -> bool {
        debug_assert!(mv.is_drop() && mv.drop_piece_type() == PieceType::Pawn);
        let us = self.side_to_move();
        let them = !us;
        let to = mv.to();
        let Some(ksq) = self.king_square(them) else {
            return false;
        };
        if to.offset(Direction::Up.offset(us)) != ksq {
            return false;
        }
        let pawn = Piece::new(us, PieceType::Pawn);
        let squares = self.squares();

        // 玉以外の駒で歩を取る
        for from in self.attackers_of(to, them) {
            if from == ksq {
                continue;
            }
            let view = Overlay::new(squares).with(to, self.piece_on(from)).with(from, Piece::EMPTY);
            if !is_attacked_by(&view, ksq, us) {
                return false;
            }
        }

        // 玉で歩を取る
        let king = self.piece_on(ksq);
        let view = Overlay::new(squares).with(ksq, Piece::EMPTY).with(to, king);
        if !is_attacked_by(&view, to, us) {
            return false;
        }

        // 玉が逃げる
        for d in Direction::KING {
            let escape = ksq.offset(d.offset(them));
            if escape == to {
                continue;
            }
            let target = self.piece_on(escape);
            if target.is_wall() || target.is_color(them) {
                continue;
            }
            let view = Overlay::new(squares)
                .with(to, pawn)
                .with(ksq, Piece::EMPTY)
                .with(escape, king);
            if !is_attacked_by(&view, escape, us) {
                return false;
            }
        }

        trace!("pawn drop on {to} mates the king on {ksq}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PositionRecord;
    use crate::movegen::{GenType, reference};
    use crate::types::{Color, Hand, Square};

    fn board_from(pieces: &[(Square, Piece)], hand: Hand) -> Board {
        let record = PositionRecord::from_pieces(pieces.iter().copied()).with_hand(Color::Black, hand);
        Board::from_record(&record).unwrap()
    }

    #[test]
    fn test_initial_position_is_not_mate() {
        assert!(!Board::new().is_checkmate());
    }

    #[test]
    fn test_head_gold_mate() {
        // 5一玉、5三に先手の歩、5二に金を打って頭金
        let mut board = board_from(
            &[
                (Square::new(5, 9), Piece::B_KING),
                (Square::new(5, 1), Piece::W_KING),
                (Square::new(5, 3), Piece::B_PAWN),
            ],
            Hand::EMPTY.add(PieceType::Gold),
        );
        let mv = board.make_drop(PieceType::Gold, Square::new(5, 2));
        assert!(board.is_check_move(mv));
        board.do_move(mv);
        assert!(board.in_check());
        assert!(board.is_checkmate());
        assert!(board.legal_moves(GenType::All).is_empty());
    }

    #[test]
    fn test_pawn_drop_mate_rejected() {
        // 1一玉の逃げ道を後手の香で塞ぎ、1三の金で 1二の歩に紐を付ける
        let board = board_from(
            &[
                (Square::new(5, 9), Piece::B_KING),
                (Square::new(1, 1), Piece::W_KING),
                (Square::new(2, 1), Piece::W_LANCE),
                (Square::new(2, 2), Piece::W_LANCE),
                (Square::new(1, 3), Piece::B_GOLD),
            ],
            Hand::EMPTY.add(PieceType::Pawn).add(PieceType::Silver),
        );
        let pawn = board.make_drop(PieceType::Pawn, Square::new(1, 2));
        assert!(board.is_drop_pawn_mate(pawn));
        assert!(!board.is_legal_move(pawn));
        assert!(!board.legal_moves(GenType::All).contains(pawn));
        // 銀なら打てる
        let silver = board.make_drop(PieceType::Silver, Square::new(1, 2));
        assert!(board.is_legal_move(silver));
        assert!(!reference::legal_moves(&board).contains(&pawn));
    }

    #[test]
    fn test_pawn_drop_check_with_escape_is_legal() {
        // 紐がないので玉で取れる
        let board = board_from(
            &[
                (Square::new(5, 9), Piece::B_KING),
                (Square::new(1, 1), Piece::W_KING),
                (Square::new(2, 1), Piece::W_LANCE),
                (Square::new(2, 2), Piece::W_LANCE),
            ],
            Hand::EMPTY.add(PieceType::Pawn),
        );
        let pawn = board.make_drop(PieceType::Pawn, Square::new(1, 2));
        assert!(board.is_check_move(pawn));
        assert!(!board.is_drop_pawn_mate(pawn));
        assert!(board.is_legal_move(pawn));
    }

    #[test]
    fn test_pinned_defender_cannot_capture_pawn() {
        // 2一の金は 1二の歩を取れるが、動くと 3一の飛車が玉に通る。歩の紐は 2四の桂
        let board = board_from(
            &[
                (Square::new(5, 9), Piece::B_KING),
                (Square::new(1, 1), Piece::W_KING),
                (Square::new(2, 1), Piece::W_GOLD),
                (Square::new(3, 1), Piece::B_ROOK),
                (Square::new(2, 2), Piece::W_LANCE),
                (Square::new(2, 4), Piece::B_KNIGHT),
            ],
            Hand::EMPTY.add(PieceType::Pawn),
        );
        let pawn = board.make_drop(PieceType::Pawn, Square::new(1, 2));
        assert!(board.is_drop_pawn_mate(pawn));
        assert!(!reference::legal_moves(&board).contains(&pawn));
    }
}
