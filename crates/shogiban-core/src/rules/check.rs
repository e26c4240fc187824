//! 王手になる手の判定

use crate::board::{Board, Overlay, PieceAt};
use crate::types::{Direction, DirectionIter, Move, Piece, SLIDE_BITS, SLIDE_SHIFT, Square};

/// 仮の盤面で `sq` の駒 `pc` が `target` に利いているか
fn piece_attacks<P: PieceAt>(view: &P, sq: Square, pc: Piece, target: Square) -> bool {
    let color = pc.color();
    for d in DirectionIter::new(pc.piece_type().step_mask() as u32) {
        if sq.offset(d.offset(color)) == target {
            return true;
        }
    }
    for d in DirectionIter::new(pc.piece_type().slide_mask() as u32) {
        if ray_reaches(view, sq, d.offset(color), target) {
            return true;
        }
    }
    false
}

/// `from` の先を `offset` 方向にたどり、途中に駒がなく `target` に着くか
fn ray_reaches<P: PieceAt>(view: &P, from: Square, offset: i16, target: Square) -> bool {
    let mut sq = from.offset(offset);
    loop {
        if sq == target {
            return true;
        }
        if !view.piece_at(sq).is_empty() {
            return false;
        }
        sq = sq.offset(offset);
    }
}

/// `from` から `offset` 方向にたどって最初に駒がある升
fn first_occupied<P: PieceAt>(view: &P, from: Square, offset: i16) -> Square {
    let mut sq = from.offset(offset);
    while view.piece_at(sq).is_empty() {
        sq = sq.offset(offset);
    }
    sq
}

impl Board {
    /// 指すと相手玉に王手がかかる手か
    ///
    /// 直接の王手は動かした駒の利きで、開き王手は移動元に自分の飛び利きが
    /// 通っているときだけその先をたどって調べる。移動先が飛び駒と移動元の
    /// 間にあれば、その方向はまだ遮られている。
    pub fn is_check_move(&self, mv: Move) -> bool {
        if !mv.is_board_move() {
            return false;
        }
        let us = self.side_to_move();
        let Some(ksq) = self.king_square(!us) else {
            return false;
        };
        let to = mv.to();

        if mv.is_drop() {
            let pc = Piece::new(us, mv.drop_piece_type());
            let view = Overlay::new(self.squares()).with(to, pc);
            return piece_attacks(&view, to, pc, ksq);
        }

        let from = mv.from();
        let pc = self.piece_on(from);
        let moved = if mv.is_promotion() { pc.promote().unwrap_or(pc) } else { pc };
        let view = Overlay::new(self.squares()).with(from, Piece::EMPTY).with(to, moved);
        if piece_attacks(&view, to, moved, ksq) {
            return true;
        }

        let rays = (self.attack_mask(us, from) & SLIDE_BITS) >> SLIDE_SHIFT;
        DirectionIter::new(rays).any(|d: Direction| {
            let offset = d.offset(us);
            first_occupied(&view, from, -offset) != to && ray_reaches(&view, from, offset, ksq)
        })
    }
}
