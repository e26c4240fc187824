//! 対局の状態のまとめ

use crate::board::Board;
use crate::types::{Color, RepetitionState};

/// 現局面での対局の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// 対局中
    InProgress,
    /// 詰み
    Checkmate { winner: Color },
    /// 王手はかかっていないが合法手がない
    NoLegalMoves { winner: Color },
    /// 千日手（引き分け）
    Sennichite,
    /// 連続王手の千日手（王手をかけ続けた側の負け）
    PerpetualCheck { winner: Color },
    /// 手番側が入玉宣言できる
    DeclarationAvailable { side: Color },
    /// 手数制限に到達（引き分け）
    MaxPly,
}

impl GameStatus {
    /// 対局が終わっているか（宣言できるだけの局面は終わっていない）
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress | GameStatus::DeclarationAvailable { .. })
    }

    /// 勝者（引き分けや対局中は `None`）
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner }
            | GameStatus::NoLegalMoves { winner }
            | GameStatus::PerpetualCheck { winner } => Some(winner),
            _ => None,
        }
    }
}

impl Board {
    /// 詰み・千日手・入玉宣言・手数制限をまとめて判定する
    pub fn game_status(&self) -> GameStatus {
        let us = self.side_to_move();
        if !self.has_legal_move() {
            return if self.in_check() {
                GameStatus::Checkmate { winner: !us }
            } else {
                GameStatus::NoLegalMoves { winner: !us }
            };
        }
        match self.repetition_state() {
            RepetitionState::Draw => return GameStatus::Sennichite,
            RepetitionState::Win => return GameStatus::PerpetualCheck { winner: us },
            RepetitionState::Lose => return GameStatus::PerpetualCheck { winner: !us },
            _ => {}
        }
        if self.can_declare_win() {
            return GameStatus::DeclarationAvailable { side: us };
        }
        if self.config().max_ply.is_some_and(|max| self.ply() >= max) {
            return GameStatus::MaxPly;
        }
        GameStatus::InProgress
    }
}
