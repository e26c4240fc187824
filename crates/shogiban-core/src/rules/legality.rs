//! 指し手の合法性

use thiserror::Error;

use crate::board::{Board, Overlay, is_attacked_by};
use crate::movegen::is_dead_end;
use crate::types::{
    Color, DirectionIter, Move, Piece, PieceType, RepetitionState, SLIDE_BITS, SLIDE_SHIFT,
    STEP_BITS, SpecialMove, Square,
};

/// 指し手が非合法な理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("null move")]
    NullMove,

    #[error("pass is not allowed")]
    Pass,

    #[error("win declaration requirements are not met")]
    DeclarationNotSatisfied,

    #[error("no repetition to claim")]
    NoRepetition,

    #[error("no perpetual check to claim")]
    NoPerpetualCheck,

    #[error("square {0} is off the board")]
    OffBoard(Square),

    #[error("{0:?} is not in hand")]
    NotInHand(PieceType),

    #[error("destination {0} is occupied")]
    Occupied(Square),

    #[error("{piece_type:?} has nowhere to go on {to}")]
    DeadEnd { piece_type: PieceType, to: Square },

    #[error("double pawn on file {0}")]
    DoublePawn(u8),

    #[error("pawn drop on {0} gives mate")]
    PawnDropMate(Square),

    #[error("no piece of the side to move on {0}")]
    NoOwnPiece(Square),

    #[error("cannot capture own piece on {0}")]
    CapturesOwnPiece(Square),

    #[error("captured piece does not match the board on {0}")]
    StaleCapture(Square),

    #[error("{piece:?} on {from} does not reach {to}")]
    Unreachable { piece: Piece, from: Square, to: Square },

    #[error("{piece_type:?} cannot promote from {from} to {to}")]
    CannotPromote { piece_type: PieceType, from: Square, to: Square },

    #[error("leaves own king in check")]
    LeavesKingInCheck,
}

impl Board {
    /// 合法手か
    #[inline]
    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.legality(mv).is_ok()
    }

    /// 合法手かどうかを理由付きで判定する
    ///
    /// 特殊な手は投了が常に合法、パスは常に非合法、宣言勝ち・千日手・連続王手の千日手の主張は
    /// その条件が成り立つときだけ合法。
    pub fn legality(&self, mv: Move) -> Result<(), IllegalMove> {
        if mv.is_none() {
            return Err(IllegalMove::NullMove);
        }
        if let Some(kind) = mv.special_kind() {
            return self.special_legality(kind);
        }
        if mv.is_special() {
            return Err(IllegalMove::NullMove);
        }

        let us = self.side_to_move();
        let to = mv.to();
        if !to.is_on_board() {
            return Err(IllegalMove::OffBoard(to));
        }

        if mv.is_drop() {
            let pt = mv.drop_piece_type();
            if !self.hand(us).has(pt) {
                return Err(IllegalMove::NotInHand(pt));
            }
            if !self.piece_on(to).is_empty() {
                return Err(IllegalMove::Occupied(to));
            }
            if is_dead_end(pt, to.relative_rank(us)) {
                return Err(IllegalMove::DeadEnd { piece_type: pt, to });
            }
            if pt == PieceType::Pawn {
                if self.has_pawn_on_file(us, to.file()) {
                    return Err(IllegalMove::DoublePawn(to.file()));
                }
                if self.is_drop_pawn_mate(mv) {
                    return Err(IllegalMove::PawnDropMate(to));
                }
            }
        } else {
            let from = mv.from();
            if !from.is_on_board() {
                return Err(IllegalMove::OffBoard(from));
            }
            let pc = self.piece_on(from);
            if !pc.is_color(us) {
                return Err(IllegalMove::NoOwnPiece(from));
            }
            let target = self.piece_on(to);
            if target.is_color(us) {
                return Err(IllegalMove::CapturesOwnPiece(to));
            }
            if target != mv.captured() {
                return Err(IllegalMove::StaleCapture(to));
            }
            if !self.attacks_from(from, to, us) {
                return Err(IllegalMove::Unreachable { piece: pc, from, to });
            }
            let pt = pc.piece_type();
            if mv.is_promotion() {
                if !pt.can_promote() || !(from.in_promotion_zone(us) || to.in_promotion_zone(us)) {
                    return Err(IllegalMove::CannotPromote { piece_type: pt, from, to });
                }
            } else if is_dead_end(pt, to.relative_rank(us)) {
                return Err(IllegalMove::DeadEnd { piece_type: pt, to });
            }
        }

        if !self.leaves_king_safe(mv) {
            return Err(IllegalMove::LeavesKingInCheck);
        }
        Ok(())
    }

    fn special_legality(&self, kind: SpecialMove) -> Result<(), IllegalMove> {
        match kind {
            SpecialMove::Resign => Ok(()),
            SpecialMove::Pass => Err(IllegalMove::Pass),
            SpecialMove::WinDeclaration => {
                if self.can_declare_win() {
                    Ok(())
                } else {
                    Err(IllegalMove::DeclarationNotSatisfied)
                }
            }
            SpecialMove::RepetitionClaim => {
                if self.repetition_state() == RepetitionState::Draw {
                    Ok(())
                } else {
                    Err(IllegalMove::NoRepetition)
                }
            }
            SpecialMove::PerpetualCheckClaim => {
                if self.repetition_state() == RepetitionState::Win {
                    Ok(())
                } else {
                    Err(IllegalMove::NoPerpetualCheck)
                }
            }
        }
    }

    /// `to` に届く `color` の利きのうち `from` の駒によるものがあるか
    fn attacks_from(&self, from: Square, to: Square, color: Color) -> bool {
        let mask = self.attack_mask(color, to);
        DirectionIter::new(mask & STEP_BITS).any(|d| to.offset(-d.offset(color)) == from)
            || DirectionIter::new((mask & SLIDE_BITS) >> SLIDE_SHIFT)
                .any(|d| self.ray_source(to, color, d) == from)
    }

    /// 生成済みの候補手が合法か（自玉の安全と打ち歩詰めだけを見る）
    #[inline]
    pub(crate) fn is_legal_candidate(&self, mv: Move) -> bool {
        self.leaves_king_safe(mv)
            && !(mv.is_drop()
                && mv.drop_piece_type() == PieceType::Pawn
                && self.is_drop_pawn_mate(mv))
    }

    /// 指した後に自玉に相手の利きがないか
    ///
    /// 王手がかかっておらず、動かす駒に相手の飛び利きが当たっていなければ開き王手はない。
    /// それ以外は盤面配列に仮の書き換えを重ねて玉の升を走査する。
    pub(crate) fn leaves_king_safe(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let them = !us;
        let Some(ksq) = self.king_square(us) else {
            return true;
        };
        let in_check = self.in_check();
        let to = mv.to();

        if mv.is_drop() {
            if !in_check {
                return true;
            }
            let view = Overlay::new(self.squares()).with(to, Piece::new(us, mv.drop_piece_type()));
            return !is_attacked_by(&view, ksq, them);
        }

        let from = mv.from();
        let pc = self.piece_on(from);
        let moved = if mv.is_promotion() { pc.promote().unwrap_or(pc) } else { pc };
        let view = Overlay::new(self.squares()).with(from, Piece::EMPTY).with(to, moved);

        if from == ksq {
            if !in_check {
                return !self.is_attacked(to, them);
            }
            // 玉の背後の升は利きテーブル上では利きがないように見える
            return !is_attacked_by(&view, to, them);
        }

        if !in_check && self.attack_mask(them, from) & SLIDE_BITS == 0 {
            return true;
        }
        !is_attacked_by(&view, ksq, them)
    }
}
