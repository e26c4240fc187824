//! 駒打ちの生成
//!
//! 打てる駒種は「持っている駒種の集合」「打つ升の段（手番から見て 1段目 / 2段目 / それ以外）」
//! 「その筋に自分の生の歩があるか」だけで決まる。
//! 持ち駒の集合 128 通り × 段の 3 区分について、打つ駒種の並びをコンパイル時に表にしておく。
//! 二歩の筋では集合から歩を除いてから表を引く。

use super::MoveList;
use crate::board::Board;
use crate::types::{Move, PieceType, Square};

/// 1 つの升に打てる駒種の並び
#[derive(Clone, Copy)]
pub(crate) struct DropKinds {
    kinds: [PieceType; PieceType::HAND_NUM],
    len: u8,
}

impl DropKinds {
    #[inline]
    pub(crate) fn as_slice(&self) -> &[PieceType] {
        &self.kinds[..self.len as usize]
    }
}

/// 段の区分（手番から見た段）
#[inline]
pub(crate) const fn rank_class(relative_rank: u8) -> usize {
    match relative_rank {
        1 => 0,
        2 => 1,
        _ => 2,
    }
}

const fn build_drop_table() -> [[DropKinds; 3]; 128] {
    let empty = DropKinds { kinds: [PieceType::Pawn; PieceType::HAND_NUM], len: 0 };
    let mut table = [[empty; 3]; 128];
    let mut mask = 0;
    while mask < 128 {
        let mut class = 0;
        while class < 3 {
            let mut entry = empty;
            let mut i = 0;
            while i < PieceType::HAND_NUM {
                let pt = PieceType::HAND_PIECES[i];
                let allowed = match class {
                    0 => !pt.is_pawn_lance_knight(),
                    1 => !matches!(pt, PieceType::Knight),
                    _ => true,
                };
                if allowed && mask & (1 << i) != 0 {
                    entry.kinds[entry.len as usize] = pt;
                    entry.len += 1;
                }
                i += 1;
            }
            table[mask][class] = entry;
            class += 1;
        }
        mask += 1;
    }
    table
}

/// [持ち駒の集合][段の区分] → 打てる駒種
pub(crate) static DROP_TABLE: [[DropKinds; 3]; 128] = build_drop_table();

/// 手番側が `to` に打てる駒種（二歩と行き所のない駒を除く、打ち歩詰めは見ない）
#[inline]
pub(crate) fn drop_kinds(board: &Board, to: Square) -> &'static [PieceType] {
    let us = board.side_to_move();
    let mut mask = board.hand(us).presence_mask();
    if board.has_pawn_on_file(us, to.file()) {
        mask &= !1;
    }
    DROP_TABLE[mask as usize][rank_class(to.relative_rank(us))].as_slice()
}

/// 空き升 `to` への駒打ちを追加する
#[inline]
pub(crate) fn generate_drops_to(board: &Board, to: Square, list: &mut MoveList) {
    debug_assert!(board.piece_on(to).is_empty());
    for &pt in drop_kinds(board, to) {
        list.push(Move::new_drop(pt, to));
    }
}

/// 全ての空き升への駒打ちを追加する
pub(crate) fn generate_drops(board: &Board, list: &mut MoveList) {
    if board.hand(board.side_to_move()).is_empty() {
        return;
    }
    for sq in Square::ALL {
        if board.piece_on(sq).is_empty() {
            generate_drops_to(board, sq, list);
        }
    }
}
