//! 王手がかかっていない局面の指し手生成
//!
//! 盤上の自分の駒を升順に走査し、駒種ごとの 1 歩の利きと飛び利きから移動先を作る。
//! 自玉の安全は見ない（合法性の絞り込みは呼び出し側で行う）。

use super::drops::generate_drops;
use super::{GenType, MoveList};
use crate::board::Board;
use crate::types::{DirectionIter, Move, Piece, PieceType, Square};

/// 行き所のない段か（手番から見た段）
#[inline]
pub(crate) const fn is_dead_end(pt: PieceType, relative_rank: u8) -> bool {
    match pt {
        PieceType::Pawn | PieceType::Lance => relative_rank <= 1,
        PieceType::Knight => relative_rank <= 2,
        _ => false,
    }
}

/// 移動先が決まった 1 手について、成り・不成の規則と生成の種類に従って追加する
#[inline]
pub(crate) fn push_board_move(
    board: &Board,
    from: Square,
    to: Square,
    pc: Piece,
    gen_type: GenType,
    list: &mut MoveList,
) {
    let us = pc.color();
    let pt = pc.piece_type();
    let captured = board.piece_on(to);
    let capture = captured.is_piece();
    let rank = to.relative_rank(us);

    let can_promote = pt.can_promote() && (from.in_promotion_zone(us) || to.in_promotion_zone(us));
    if can_promote && gen_type.accepts(capture, true) {
        list.push(Move::new_move(from, to, true, captured));
    }

    if is_dead_end(pt, rank) {
        return;
    }
    // 成れるのに成らない歩・角・飛と、2段目への香の不成は指定があるときだけ
    let pointless_unpromotion =
        can_promote && (pt.always_promote() || (pt == PieceType::Lance && rank == 2));
    if pointless_unpromotion && !gen_type.keeps_unpromotions() {
        return;
    }
    if gen_type.accepts(capture, false) {
        list.push(Move::new_move(from, to, false, captured));
    }
}

/// `from` にある駒 `pc` の移動を全て追加する
pub(crate) fn generate_piece_moves(
    board: &Board,
    from: Square,
    pc: Piece,
    gen_type: GenType,
    list: &mut MoveList,
) {
    let us = pc.color();
    let pt = pc.piece_type();
    match pt {
        PieceType::King => {
            let them = !us;
            for d in DirectionIter::new(pt.step_mask() as u32) {
                let to = from.offset(d.offset(us));
                let target = board.piece_on(to);
                // 利かされている升へは動けない
                if target.is_wall() || target.is_color(us) || board.is_attacked(to, them) {
                    continue;
                }
                push_board_move(board, from, to, pc, gen_type, list);
            }
        }
        _ => {
            for d in DirectionIter::new(pt.step_mask() as u32) {
                let to = from.offset(d.offset(us));
                let target = board.piece_on(to);
                if target.is_wall() || target.is_color(us) {
                    continue;
                }
                push_board_move(board, from, to, pc, gen_type, list);
            }
            for d in DirectionIter::new(pt.slide_mask() as u32) {
                let offset = d.offset(us);
                let mut to = from.offset(offset);
                loop {
                    let target = board.piece_on(to);
                    if target.is_wall() || target.is_color(us) {
                        break;
                    }
                    push_board_move(board, from, to, pc, gen_type, list);
                    if target.is_piece() {
                        break;
                    }
                    to = to.offset(offset);
                }
            }
        }
    }
}

/// 王手がかかっていない局面の指し手（自玉への王手放置を含みうる候補手）
pub(crate) fn generate_non_evasions(board: &Board, gen_type: GenType, list: &mut MoveList) {
    let us = board.side_to_move();
    for from in Square::ALL {
        let pc = board.piece_on(from);
        if pc.is_color(us) {
            generate_piece_moves(board, from, pc, gen_type, list);
        }
    }
    if gen_type.includes_drops() {
        generate_drops(board, list);
    }
}
