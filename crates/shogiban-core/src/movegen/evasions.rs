//! 王手回避手の生成
//!
//! 王手している駒は自玉の升の利きマスクから直接わかる。
//! 1 歩の利きのビットなら隣接（桂を含む）、飛び利きのビットなら玉から逆向きにたどった最初の駒。

use smallvec::SmallVec;

use super::drops::generate_drops_to;
use super::generator::push_board_move;
use super::{GenType, MoveList};
use crate::board::Board;
use crate::types::{Direction, SLIDE_BITS, SLIDE_SHIFT, STEP_BITS, Square};

/// 王手されている手番側の回避手の候補
///
/// 玉の移動先は相手の利きがない升だけを候補にする。玉の真後ろ（飛び利きの延長）は
/// 利きテーブル上は空いて見えるので、合法性の判定で落とす。
pub(crate) fn generate_evasions(board: &Board, gen_type: GenType, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = !us;
    let Some(ksq) = board.king_square(us) else {
        return;
    };
    let king = board.piece_on(ksq);

    for d in Direction::KING {
        let to = ksq.offset(d.offset(us));
        let target = board.piece_on(to);
        if target.is_wall() || target.is_color(us) || board.is_attacked(to, them) {
            continue;
        }
        push_board_move(board, ksq, to, king, gen_type, list);
    }

    let mask = board.attack_mask(them, ksq);
    debug_assert_ne!(mask, 0, "generate_evasions called without check");
    // 両王手は玉を動かすしかない
    if mask.count_ones() != 1 {
        return;
    }

    let mut between: SmallVec<[Square; 8]> = SmallVec::new();
    let checker = if mask & STEP_BITS != 0 {
        let d = Direction::from_index(mask.trailing_zeros() as usize);
        ksq.offset(-d.offset(them))
    } else {
        debug_assert_ne!(mask & SLIDE_BITS, 0);
        let d = Direction::from_index((mask >> SLIDE_SHIFT).trailing_zeros() as usize);
        let back = -d.offset(them);
        let mut sq = ksq.offset(back);
        while board.piece_on(sq).is_empty() {
            between.push(sq);
            sq = sq.offset(back);
        }
        sq
    };

    // 王手している駒を玉以外で取る
    for from in board.attackers_of(checker, us) {
        if from != ksq {
            push_board_move(board, from, checker, board.piece_on(from), gen_type, list);
        }
    }

    // 合駒
    for &sq in &between {
        for from in board.attackers_of(sq, us) {
            if from != ksq {
                push_board_move(board, from, sq, board.piece_on(from), gen_type, list);
            }
        }
        if gen_type.includes_drops() {
            generate_drops_to(board, sq, list);
        }
    }
}
