//! 指し手生成
//!
//! 王手がかかっていなければ駒種ごとの指し手と駒打ち、かかっていれば王手回避手を生成し、
//! 自玉に王手がかかる手と打ち歩詰めを取り除いて合法手だけを返す。

mod drops;
mod evasions;
mod generator;
mod movelist;
pub mod reference;

pub use movelist::MoveList;

pub(crate) use generator::is_dead_end;

use crate::board::Board;
use crate::types::Move;

/// 生成する指し手の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenType {
    /// 全ての指し手（歩・角・飛の不成と、香の2段目への不成を除く）
    All,
    /// 盤上の駒を動かす手だけ（駒打ちを除く）
    MovesOnly,
    /// 全ての指し手（不成含む）
    AllWithUnpromotions,
    /// 駒を取る指し手
    Captures,
    /// 駒を取らない指し手（駒打ちを含む）
    NonCaptures,
    /// 駒を取る指し手 + 成る指し手
    CapturesProPlus,
    /// 駒を取る指し手 + 成る指し手 + 王手
    Tactical,
}

impl GenType {
    /// 駒打ちを生成するか
    #[inline]
    pub(crate) const fn includes_drops(self) -> bool {
        matches!(
            self,
            GenType::All | GenType::AllWithUnpromotions | GenType::NonCaptures | GenType::Tactical
        )
    }

    /// 成れるときの不成（歩・角・飛、香の2段目）も生成するか
    #[inline]
    pub(crate) const fn keeps_unpromotions(self) -> bool {
        matches!(self, GenType::AllWithUnpromotions)
    }

    /// 盤上の手の種類による絞り込み（王手かどうかは後で見る）
    #[inline]
    pub(crate) const fn accepts(self, capture: bool, promotion: bool) -> bool {
        match self {
            GenType::Captures => capture,
            GenType::NonCaptures => !capture,
            GenType::CapturesProPlus => capture || promotion,
            GenType::All
            | GenType::MovesOnly
            | GenType::AllWithUnpromotions
            | GenType::Tactical => true,
        }
    }
}

impl Board {
    /// 合法手を生成する
    pub fn legal_moves(&self, gen_type: GenType) -> MoveList {
        let mut list = MoveList::new();
        self.generate_legal_moves(gen_type, &mut list);
        list
    }

    /// 合法手を `list` に追加する
    pub fn generate_legal_moves(&self, gen_type: GenType, list: &mut MoveList) {
        let start = list.len();
        let mut candidates = MoveList::new();
        if self.in_check() {
            evasions::generate_evasions(self, gen_type, &mut candidates);
        } else {
            generator::generate_non_evasions(self, gen_type, &mut candidates);
        }
        for mv in candidates {
            if !self.is_legal_candidate(mv) {
                continue;
            }
            if gen_type == GenType::Tactical
                && !(mv.is_capture() || mv.is_promotion() || self.is_check_move(mv))
            {
                continue;
            }
            list.push(mv);
        }
        debug_assert!(list.as_slice()[start..].iter().all(|&mv| self.is_legal_move(mv)));
    }

    /// 合法手が 1 つでもあるか
    pub fn has_legal_move(&self) -> bool {
        let mut candidates = MoveList::new();
        if self.in_check() {
            evasions::generate_evasions(self, GenType::AllWithUnpromotions, &mut candidates);
        } else {
            generator::generate_non_evasions(self, GenType::AllWithUnpromotions, &mut candidates);
        }
        candidates.iter().any(|&mv| self.is_legal_candidate(mv))
    }

    /// 指定した深さまでの合法手の数（不成を含む）
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves(GenType::AllWithUnpromotions);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            self.do_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move(mv);
        }
        nodes
    }

    /// 初手ごとの perft の内訳
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let moves = self.legal_moves(GenType::AllWithUnpromotions);
        let mut out = Vec::with_capacity(moves.len());
        for mv in moves {
            self.do_move(mv);
            out.push((mv, self.perft(depth - 1)));
            self.undo_move(mv);
        }
        out
    }
}
