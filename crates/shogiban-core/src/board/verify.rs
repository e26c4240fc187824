//! 差分更新の整合性検査
//!
//! 利きテーブル・局面のキー・玉の位置・歩のある筋を盤面から全て計算し直して照合する。
//! デバッグビルドと `consistency-checks` フィーチャーでは `do_move` / `undo_move` のたびに呼ばれる。

use super::effect::AttackTable;
use super::zobrist::{hand_key, zobrist_psq, zobrist_side};
use super::Board;
use crate::error::ConsistencyError;
use crate::types::{Color, PieceType, Square};

impl Board {
    /// 差分更新した状態が盤面からの再計算と一致するか
    pub fn verify(&self) -> Result<(), ConsistencyError> {
        let scanned = AttackTable::scan(&self.squares);
        if scanned != self.attacks {
            for color in Color::ALL {
                for sq in Square::ALL {
                    let incremental = self.attacks.get(color, sq);
                    let scanned = scanned.get(color, sq);
                    if incremental != scanned {
                        return Err(ConsistencyError::AttackMask {
                            color,
                            square: sq,
                            incremental,
                            scanned,
                        });
                    }
                }
            }
            if let Some(sq) = self.attacks.first_wall_with_bits() {
                return Err(ConsistencyError::WallAttack(sq));
            }
        }

        let recomputed = self.compute_key();
        if recomputed != self.key() {
            return Err(ConsistencyError::Key { incremental: self.key(), recomputed });
        }

        let mut kings = [None; Color::NUM];
        let mut pawn_files = [0u16; Color::NUM];
        for sq in Square::ALL {
            let pc = self.piece_on(sq);
            if !pc.is_piece() {
                continue;
            }
            match pc.piece_type() {
                PieceType::King => kings[pc.color().index()] = Some(sq),
                PieceType::Pawn => pawn_files[pc.color().index()] |= 1 << sq.file(),
                _ => {}
            }
        }
        for color in Color::ALL {
            if kings[color.index()] != self.king_square[color.index()] {
                return Err(ConsistencyError::KingSquare(color));
            }
            let incremental = self.pawn_files[color.index()];
            let scanned = pawn_files[color.index()];
            if incremental != scanned {
                return Err(ConsistencyError::PawnFiles { color, incremental, scanned });
            }
        }
        Ok(())
    }

    /// 局面のキーを盤面から計算する
    pub fn compute_key(&self) -> u64 {
        let mut key = 0u64;
        for sq in Square::ALL {
            key ^= zobrist_psq(self.piece_on(sq), sq);
        }
        if self.side_to_move == Color::White {
            key ^= zobrist_side();
        }
        key ^ hand_key(&self.hands)
    }
}
