//! バイナリスナップショット
//!
//! 形式（数値はすべてリトルエンディアン）:
//!
//! ```text
//! [u8; 81]   駒コード（1筋の1段目..9段目、2筋...の順、0 は空き升）
//! [u32; 2]   手駒（先手, 後手）
//! u8         手番（0 = 先手, 1 = 後手）
//! u16        手数
//! u16        履歴の長さ n
//! n × { u32 指し手, u64 指す前の局面のキー, u32 指す前の手番側の手駒 }
//! ```
//!
//! 復元では現局面から履歴を逆順に取り消してキーと手駒を照合し、
//! 履歴の先頭の局面から各手の合法性を確かめながら指し直す。

use super::{Board, PositionRecord};
use crate::error::SnapshotError;
use crate::types::{Color, Hand, Move, Piece, PieceType, Square};

/// 履歴を除いた先頭部分のバイト数
pub const SNAPSHOT_HEADER_LEN: usize = Square::BOARD_NUM + 4 * Color::NUM + 1 + 2 + 2;

/// 履歴 1 件のバイト数
const ENTRY_LEN: usize = 4 + 8 + 4;

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], SnapshotError> {
        let end = self.pos + N;
        let slice = self.bytes.get(self.pos..end).ok_or(SnapshotError::Truncated {
            expected: end,
            actual: self.bytes.len(),
        })?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, SnapshotError> {
        Ok(self.take::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, SnapshotError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    fn u32(&mut self) -> Result<u32, SnapshotError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn u64(&mut self) -> Result<u64, SnapshotError> {
        Ok(u64::from_le_bytes(self.take()?))
    }
}

struct RecordedEntry {
    mv: Move,
    key: u64,
    hand: u32,
}

impl Board {
    /// スナップショットに書き出す
    pub fn to_snapshot(&self) -> Vec<u8> {
        let n = self.history.len();
        let mut out = Vec::with_capacity(SNAPSHOT_HEADER_LEN + n * ENTRY_LEN);

        out.extend(Square::ALL.iter().map(|&sq| self.piece_on(sq).raw()));
        for hand in self.hands {
            out.extend_from_slice(&hand.raw().to_le_bytes());
        }
        out.push(self.side_to_move as u8);
        out.extend_from_slice(&self.ply.to_le_bytes());
        out.extend_from_slice(&(n as u16).to_le_bytes());

        for (i, entry) in self.history.iter().enumerate() {
            let mover = if (n - i) % 2 == 0 { self.side_to_move } else { !self.side_to_move };
            out.extend_from_slice(&entry.mv.to_bytes());
            out.extend_from_slice(&entry.key.to_le_bytes());
            out.extend_from_slice(&entry.hands[mover.index()].raw().to_le_bytes());
        }
        out
    }

    /// スナップショットから復元する
    pub fn from_snapshot(bytes: &[u8]) -> Result<Board, SnapshotError> {
        let result = decode(bytes);
        match &result {
            Ok(board) => log::debug!(
                "snapshot decoded: ply {}, {} history entries",
                board.ply(),
                board.history().len()
            ),
            Err(e) => log::warn!("snapshot rejected: {e}"),
        }
        result
    }

    /// 指し手 `mv` を現局面から取り消せるか（駒の有無と手駒だけを見る）
    fn can_retract(&self, mv: Move) -> bool {
        if self.ply == 0 || !mv.is_board_move() {
            return false;
        }
        let mover = !self.side_to_move;
        let to = mv.to();
        let moved = self.piece_on(to);
        if mv.is_drop() {
            return moved == Piece::new(mover, mv.drop_piece_type());
        }
        if !moved.is_color(mover) || !self.piece_on(mv.from()).is_empty() {
            return false;
        }
        if mv.is_promotion() && !moved.piece_type().is_promoted() {
            return false;
        }
        let captured = mv.captured();
        if captured.is_piece() {
            let pt = captured.piece_type();
            if captured.color() == mover || pt == PieceType::King {
                return false;
            }
            if !self.hand(mover).has(pt.unpromote()) {
                return false;
            }
        }
        true
    }
}

fn decode(bytes: &[u8]) -> Result<Board, SnapshotError> {
    let mut reader = Reader { bytes, pos: 0 };

    let mut pieces = Vec::with_capacity(40);
    for (index, &sq) in Square::ALL.iter().enumerate() {
        let code = reader.u8()?;
        let pc = Piece::from_code(code).ok_or(SnapshotError::InvalidPiece { index, code })?;
        if pc.is_piece() {
            pieces.push((sq, pc));
        }
    }
    let mut hands = [Hand::EMPTY; Color::NUM];
    for hand in &mut hands {
        let raw = reader.u32()?;
        *hand = Hand::from_raw(raw).ok_or(SnapshotError::InvalidHand(raw))?;
    }
    let side_byte = reader.u8()?;
    let side_to_move = Color::from_u8(side_byte).ok_or(SnapshotError::InvalidColor(side_byte))?;
    let ply = reader.u16()?;
    let history_len = reader.u16()?;
    if history_len > ply {
        return Err(SnapshotError::HistoryTooLong { history: history_len, ply });
    }

    let mut entries = Vec::with_capacity(history_len as usize);
    for index in 0..history_len as usize {
        let mv = Move::from_bytes(reader.take()?)
            .map_err(|source| SnapshotError::MoveDecode { index, source })?;
        let key = reader.u64()?;
        let hand = reader.u32()?;
        entries.push(RecordedEntry { mv, key, hand });
    }
    let trailing = bytes.len() - reader.pos;
    if trailing != 0 {
        return Err(SnapshotError::TrailingBytes(trailing));
    }

    let current = PositionRecord { pieces, hands, side_to_move, ply };
    let mut board = Board::from_record(&current)?;

    // 履歴を逆順に取り消しながら、記録されたキーと手駒を照合する
    for (index, entry) in entries.iter().enumerate().rev() {
        if !board.can_retract(entry.mv) {
            return Err(SnapshotError::UnretractableMove { index, mv: entry.mv });
        }
        board.retract(entry.mv);
        let computed = board.key();
        if computed != entry.key {
            return Err(SnapshotError::KeyMismatch { index, recorded: entry.key, computed });
        }
        let computed = board.hand(board.side_to_move()).raw();
        if computed != entry.hand {
            return Err(SnapshotError::HandMismatch { index, recorded: entry.hand, computed });
        }
    }

    // 先頭の局面から指し直して合法性を確かめる
    let mut board = Board::from_record(&board.to_record())?;
    for (index, entry) in entries.iter().enumerate() {
        if !board.is_legal_move(entry.mv) {
            return Err(SnapshotError::IllegalHistoryMove { index, mv: entry.mv });
        }
        board.do_move(entry.mv);
    }
    Ok(board)
}
