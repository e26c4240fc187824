//! 指し手リスト

use smallvec::SmallVec;

use crate::types::Move;

/// 指し手生成バッファ
///
/// 通常の局面は 128 手に収まるので、それを超えたときだけヒープを使う。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: SmallVec<[Move; 128]>,
}

impl MoveList {
    /// 空のMoveListを作成
    #[inline]
    pub fn new() -> Self {
        Self { moves: SmallVec::new() }
    }

    /// 指し手の数
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// 空かどうか
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// イテレータを取得
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// 指定された指し手が含まれているか
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// 指し手を追加
    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// スライスとして取得
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = smallvec::IntoIter<[Move; 128]>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self { moves: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceType, Square};

    #[test]
    fn test_movelist_push_and_contains() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        let mv = Move::new_drop(PieceType::Gold, Square::SQ_55);
        list.push(mv);
        assert_eq!(list.len(), 1);
        assert!(list.contains(mv));
        assert_eq!(list[0], mv);
    }

    #[test]
    fn test_movelist_spills_beyond_inline_capacity() {
        let list: MoveList = Square::ALL
            .iter()
            .flat_map(|&sq| [Move::new_drop(PieceType::Gold, sq), Move::new_drop(PieceType::Silver, sq)])
            .collect();
        assert_eq!(list.len(), 162);
        assert_eq!(list.iter().filter(|m| m.drop_piece_type() == PieceType::Gold).count(), 81);
    }
}
