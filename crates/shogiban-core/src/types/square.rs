//! 升目（Square）
//!
//! 9x9 の盤面を番兵（壁）で囲んだ 192 要素の一次元配列上のインデックス。
//!
//! ```text
//! index = file * 16 + rank + 16      (file, rank ∈ 1..=9)
//! ```
//!
//! - 筋を 1 つ動かすと ±16、段を 1 つ動かすと ±1。
//! - 筋 0 / 筋 10 と段 0 / 段 10..=15 は常に壁。
//! - 先頭に 16 要素の余白を置くため、盤内の升から桂の跳びを含むどの方向へ 1 歩進んでも
//!   配列の範囲を外れず、別の行へ回り込むこともない。
//!
//! これにより方向テーブルは単なる整数オフセットになり、走査中の盤外判定は
//! 「壁の駒が置かれているか」だけで済む。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 升目（盤面配列のインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// 盤面配列の要素数（壁を含む）
    pub const NUM: usize = 192;

    /// 盤内の升の数
    pub const BOARD_NUM: usize = 81;

    /// 筋方向の歩幅
    pub const FILE_STRIDE: i16 = 16;

    /// 配列先頭の余白
    pub const PADDING: u8 = 16;

    /// 1一
    pub const SQ_11: Square = Square::new(1, 1);
    /// 5五（中央）
    pub const SQ_55: Square = Square::new(5, 5);
    /// 9九
    pub const SQ_99: Square = Square::new(9, 9);

    /// 盤内の全升（1筋の1段目から9段目、2筋…の順）
    pub const ALL: [Square; 81] = {
        let mut all = [Square(0); 81];
        let mut i = 0;
        while i < 81 {
            all[i] = Square::new((i / 9) as u8 + 1, (i % 9) as u8 + 1);
            i += 1;
        }
        all
    };

    /// 筋・段（ともに 1..=9）から生成
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file >= 1 && file <= 9 && rank >= 1 && rank <= 9);
        Square(file * 16 + rank + Self::PADDING)
    }

    /// 筋・段から生成（範囲チェックあり）
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Square> {
        if file >= 1 && file <= 9 && rank >= 1 && rank <= 9 {
            Some(Square::new(file, rank))
        } else {
            None
        }
    }

    /// 配列インデックスから生成（盤内の升のみ受け付ける）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Square> {
        let sq = Square(n);
        if sq.is_on_board() { Some(sq) } else { None }
    }

    /// 配列インデックスから生成（壁も含めて受け付ける）
    #[inline]
    pub(crate) const fn from_index_unchecked(n: usize) -> Square {
        debug_assert!(n < Self::NUM);
        Square(n as u8)
    }

    /// 盤内（9x9）の升かどうか
    #[inline]
    pub const fn is_on_board(self) -> bool {
        if self.0 < Self::PADDING || self.0 as usize >= Self::NUM {
            return false;
        }
        let v = self.0 - Self::PADDING;
        let file = v / 16;
        let rank = v % 16;
        file >= 1 && file <= 9 && rank >= 1 && rank <= 9
    }

    /// 筋（1..=9）
    #[inline]
    pub const fn file(self) -> u8 {
        debug_assert!(self.is_on_board());
        (self.0 - Self::PADDING) / 16
    }

    /// 段（1..=9）
    #[inline]
    pub const fn rank(self) -> u8 {
        debug_assert!(self.is_on_board());
        (self.0 - Self::PADDING) % 16
    }

    /// 手番側から見た段（1 が敵陣の最奥）
    #[inline]
    pub const fn relative_rank(self, color: super::Color) -> u8 {
        match color {
            super::Color::Black => self.rank(),
            super::Color::White => 10 - self.rank(),
        }
    }

    /// 成れる升（敵陣三段）かどうか
    #[inline]
    pub const fn in_promotion_zone(self, color: super::Color) -> bool {
        self.relative_rank(color) <= 3
    }

    /// オフセットを加えた升（壁の場合もある）
    ///
    /// 盤内の升から方向テーブルの 1 歩分進む用途を前提とする。
    #[inline]
    pub const fn offset(self, delta: i16) -> Square {
        let next = self.0 as i16 + delta;
        debug_assert!(next >= 0 && (next as usize) < Self::NUM);
        Square(next as u8)
    }

    /// 180度回転
    #[inline]
    pub const fn inverse(self) -> Square {
        Square::new(10 - self.file(), 10 - self.rank())
    }

    /// 盤内の升の通し番号（0..81、筋優先）
    #[inline]
    pub const fn board_index(self) -> usize {
        (self.file() as usize - 1) * 9 + (self.rank() as usize - 1)
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Square {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Square::from_u8(n).ok_or_else(|| format!("square index {n} is not on the board"))
    }
}

impl From<Square> for u8 {
    fn from(sq: Square) -> u8 {
        sq.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", self.file(), self.rank())
        } else {
            write!(f, "wall({})", self.0)
        }
    }
}
