//! 千日手と優等/劣等局面

use crate::board::Board;
use crate::board::zobrist::hand_key;
use crate::types::RepetitionState;

impl Board {
    /// 現局面の千日手の状態（手番側から見た結果）
    ///
    /// 手番が同じ局面だけを履歴から遡り、キーが一致する局面が `sennichite_count - 1` 回
    /// 見つかれば千日手。最初の一致からの間、片方が手番のたびに王手されていれば
    /// 連続王手の千日手になる。
    /// 千日手でなければ、盤面が同じで手駒だけ違う局面を探して優等/劣等を返す。
    pub fn repetition_state(&self) -> RepetitionState {
        let key = self.key();
        let needed = self.config().sennichite_count.saturating_sub(1).max(1) as usize;
        let history = self.history();
        let n = history.len();

        let mut count = 0;
        let mut earliest = None;
        for i in (0..n).rev().skip(1).step_by(2) {
            if history[i].key == key {
                count += 1;
                if count == needed {
                    earliest = Some(i);
                    break;
                }
            }
        }

        if let Some(start) = earliest {
            let span = &history[start..];
            // 現局面から見て偶数手前は手番側、奇数手前は相手の局面
            let mut us_checked = self.in_check();
            let mut them_checked = true;
            for (offset, entry) in span.iter().enumerate() {
                if (n - start - offset) % 2 == 0 {
                    us_checked &= entry.in_check;
                } else {
                    them_checked &= entry.in_check;
                }
            }
            return if us_checked {
                RepetitionState::Win
            } else if them_checked {
                RepetitionState::Lose
            } else {
                RepetitionState::Draw
            };
        }

        let us = self.side_to_move().index();
        let board_key = self.board_key();
        let hands = self.hands();
        for i in (0..n).rev().skip(1).step_by(2) {
            let entry = &history[i];
            if entry.hands == hands || entry.key ^ hand_key(&entry.hands) != board_key {
                continue;
            }
            if hands[us].is_superior_or_equal(entry.hands[us]) {
                return RepetitionState::Superior;
            }
            if entry.hands[us].is_superior_or_equal(hands[us]) {
                return RepetitionState::Inferior;
            }
        }
        RepetitionState::None
    }
}
