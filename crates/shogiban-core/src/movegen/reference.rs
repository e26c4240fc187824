//! 総当たりによる合法手生成
//!
//! 利きテーブルも駒種ごとの生成も使わず、全ての (移動元, 移動先, 成り) と
//! (駒種, 打つ升) を盤面の直接走査で確かめる。遅いが独立した実装なので、
//! 差分更新版の生成結果を検証する基準として使う。
//! 生成の種類は `GenType::AllWithUnpromotions` に相当する。

use super::generator::is_dead_end;
use crate::board::{Board, is_attacked_by};
use crate::types::{Direction, Move, Piece, PieceType, Square};

/// 全ての合法手（不成を含む）
pub fn legal_moves(board: &Board) -> Vec<Move> {
    collect(board, true)
}

fn collect(board: &Board, reject_pawn_drop_mate: bool) -> Vec<Move> {
    let us = board.side_to_move();
    let mut moves = Vec::new();

    for from in Square::ALL {
        let pc = board.piece_on(from);
        if !pc.is_color(us) {
            continue;
        }
        let pt = pc.piece_type();
        for to in Square::ALL {
            let target = board.piece_on(to);
            if target.is_color(us) || !reaches(board, from, to, pc) {
                continue;
            }
            for promote in [false, true] {
                if promote
                    && !(pt.can_promote()
                        && (from.in_promotion_zone(us) || to.in_promotion_zone(us)))
                {
                    continue;
                }
                if !promote && is_dead_end(pt, to.relative_rank(us)) {
                    continue;
                }
                let mv = Move::new_move(from, to, promote, target);
                if king_safe_after(board, mv) {
                    moves.push(mv);
                }
            }
        }
    }

    let hand = board.hand(us);
    for pt in PieceType::HAND_PIECES {
        if !hand.has(pt) {
            continue;
        }
        for to in Square::ALL {
            if !board.piece_on(to).is_empty() || is_dead_end(pt, to.relative_rank(us)) {
                continue;
            }
            if pt == PieceType::Pawn && file_has_pawn(board, to.file()) {
                continue;
            }
            let mv = Move::new_drop(pt, to);
            if !king_safe_after(board, mv) {
                continue;
            }
            if reject_pawn_drop_mate && pt == PieceType::Pawn && mates(board, mv) {
                continue;
            }
            moves.push(mv);
        }
    }
    moves
}

/// 盤面を直接たどって `from` の駒が `to` に届くか
fn reaches(board: &Board, from: Square, to: Square, pc: Piece) -> bool {
    let us = pc.color();
    for d in Direction::ALL {
        let offset = d.offset(us);
        if pc.can_step(d) && from.offset(offset) == to {
            return true;
        }
        if pc.can_slide(d) {
            let mut sq = from.offset(offset);
            loop {
                let target = board.piece_on(sq);
                if target.is_wall() {
                    break;
                }
                if sq == to {
                    return true;
                }
                if target.is_piece() {
                    break;
                }
                sq = sq.offset(offset);
            }
        }
    }
    false
}

/// 筋に手番側の生の歩があるか（盤面の走査）
fn file_has_pawn(board: &Board, file: u8) -> bool {
    let pawn = Piece::new(board.side_to_move(), PieceType::Pawn);
    (1..=9).any(|rank| board.piece_on(Square::new(file, rank)) == pawn)
}

/// 指した後の盤面配列を作り、自玉に相手の利きがないか確かめる
fn king_safe_after(board: &Board, mv: Move) -> bool {
    let us = board.side_to_move();
    let mut squares = *board.squares();
    let to = mv.to();
    let mut king = board.king_square(us);
    if mv.is_drop() {
        squares[to.index()] = Piece::new(us, mv.drop_piece_type());
    } else {
        let from = mv.from();
        let pc = squares[from.index()];
        squares[from.index()] = Piece::EMPTY;
        squares[to.index()] = if mv.is_promotion() { pc.promote().unwrap_or(pc) } else { pc };
        if pc.piece_type() == PieceType::King {
            king = Some(to);
        }
    }
    match king {
        Some(ksq) => !is_attacked_by(&squares, ksq, !us),
        None => true,
    }
}

/// 指した後に相手が王手されていて、合法手が 1 つもないか
fn mates(board: &Board, mv: Move) -> bool {
    let mut next = board.detached();
    next.do_move(mv);
    next.in_check() && collect(&next, false).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PositionRecord;
    use crate::movegen::GenType;
    use crate::types::{Color, Hand};

    fn sorted(mut moves: Vec<Move>) -> Vec<Move> {
        moves.sort_by_key(|m| m.raw());
        moves
    }

    #[test]
    fn test_reference_matches_initial_position() {
        let board = Board::new();
        let reference = sorted(legal_moves(&board));
        assert_eq!(reference.len(), 30);
        let generated = sorted(board.legal_moves(GenType::AllWithUnpromotions).into_iter().collect());
        assert_eq!(reference, generated);
    }

    #[test]
    fn test_reference_rejects_pawn_drop_mate() {
        // 1一玉の逃げ道を後手自身の香で塞ぎ、1三の金で歩に紐を付ける。1二への歩打ちは打ち歩詰め
        let record = PositionRecord::from_pieces([
            (Square::new(5, 9), Piece::B_KING),
            (Square::new(1, 1), Piece::W_KING),
            (Square::new(2, 1), Piece::W_LANCE),
            (Square::new(2, 2), Piece::W_LANCE),
            (Square::new(1, 3), Piece::B_GOLD),
        ])
        .with_hand(Color::Black, Hand::EMPTY.add(PieceType::Pawn));
        let board = Board::from_record(&record).unwrap();
        let reference = legal_moves(&board);
        assert!(!reference.contains(&Move::new_drop(PieceType::Pawn, Square::new(1, 2))));
        assert!(reference.contains(&Move::new_drop(PieceType::Pawn, Square::new(1, 4))));
    }
}
