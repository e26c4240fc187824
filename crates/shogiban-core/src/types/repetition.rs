//! 千日手の判定結果（RepetitionState）

/// 手番側から見た千日手の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepetitionState {
    /// 同一局面の繰り返しではない
    #[default]
    None,
    /// 通常の千日手（引き分け）
    Draw,
    /// 相手の連続王手による千日手（手番側の勝ち）
    Win,
    /// 手番側の連続王手による千日手（手番側の負け）
    Lose,
    /// 盤面が同一で手番側の手駒が多い局面
    Superior,
    /// 盤面が同一で手番側の手駒が少ない局面
    Inferior,
}

impl RepetitionState {
    /// 千日手が成立しているか（通常の千日手または連続王手）
    #[inline]
    pub const fn is_repetition(self) -> bool {
        matches!(self, RepetitionState::Draw | RepetitionState::Win | RepetitionState::Lose)
    }

    /// 勝敗が決まる千日手か
    #[inline]
    pub const fn is_decisive(self) -> bool {
        matches!(self, RepetitionState::Win | RepetitionState::Lose)
    }

    /// 優等/劣等局面か
    #[inline]
    pub const fn is_superior_inferior(self) -> bool {
        matches!(self, RepetitionState::Superior | RepetitionState::Inferior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repetition_state_predicates() {
        let table = [
            (RepetitionState::None, false, false, false),
            (RepetitionState::Draw, true, false, false),
            (RepetitionState::Win, true, true, false),
            (RepetitionState::Lose, true, true, false),
            (RepetitionState::Superior, false, false, true),
            (RepetitionState::Inferior, false, false, true),
        ];
        for (state, repetition, decisive, superior_inferior) in table {
            assert_eq!(state.is_repetition(), repetition, "{state:?}");
            assert_eq!(state.is_decisive(), decisive, "{state:?}");
            assert_eq!(state.is_superior_inferior(), superior_inferior, "{state:?}");
        }
        assert_eq!(RepetitionState::default(), RepetitionState::None);
    }
}
