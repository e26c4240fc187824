//! 指し手の履歴（HistoryEntry）と再生・巻き戻し

use super::{Board, PositionRecord};
use crate::error::PositionError;
use crate::types::{Hand, Move};

/// 指し手を適用する直前の局面の情報
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 局面のキー
    pub key: u64,
    /// 両者の手駒
    pub hands: [Hand; 2],
    /// この局面で指された手
    pub mv: Move,
    /// この局面で手番側が王手されていたか
    pub in_check: bool,
}

impl Board {
    /// 履歴（古い順）
    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// 履歴の指し手（古い順）
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = Move> + ExactSizeIterator + '_ {
        self.history.iter().map(|e| e.mv)
    }

    /// 履歴の先頭の局面
    #[inline]
    pub fn initial_record(&self) -> &PositionRecord {
        &self.initial
    }

    /// 履歴の先頭の手数
    #[inline]
    pub fn earliest_ply(&self) -> u16 {
        self.ply - self.history.len() as u16
    }

    /// 局面の記録から指し手を順に適用した盤面を作る（各手の合法性を検査する）
    pub fn replay(record: &PositionRecord, moves: &[Move]) -> Result<Board, PositionError> {
        let mut board = Board::from_record(record)?;
        board.replay_moves(moves)?;
        Ok(board)
    }

    /// 現在の局面から指し手を順に適用する（各手の合法性を検査する）
    pub fn replay_moves(&mut self, moves: &[Move]) -> Result<(), PositionError> {
        for (index, &mv) in moves.iter().enumerate() {
            if !mv.is_board_move() || !self.is_legal_move(mv) {
                return Err(PositionError::IllegalMove { index, mv });
            }
            self.do_move(mv);
        }
        Ok(())
    }

    /// 指定した手数の局面まで巻き戻す
    pub fn truncate(&mut self, ply: u16) -> Result<(), PositionError> {
        let earliest = self.earliest_ply();
        if ply < earliest || ply > self.ply {
            return Err(PositionError::PlyOutOfRange { requested: ply, earliest, current: self.ply });
        }
        while self.ply > ply {
            let Some(mv) = self.history.last().map(|e| e.mv) else {
                break;
            };
            self.undo_move(mv);
        }
        Ok(())
    }

    /// 履歴の先頭まで巻き戻す
    pub fn rewind(&mut self) {
        while let Some(mv) = self.history.last().map(|e| e.mv) {
            self.undo_move(mv);
        }
    }
}
