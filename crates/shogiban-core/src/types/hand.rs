//! 手駒（Hand）

use serde::{Deserialize, Serialize};

use super::PieceType;

/// 手駒（32bit packed）
///
/// ビット配置（各フィールドの直上に 1bit のガードを置く）:
/// - bit 0-4:   歩 (5bit, 最大18枚)  ガード bit 5
/// - bit 8-10:  香 (3bit, 最大4枚)   ガード bit 11
/// - bit 12-14: 桂 (3bit, 最大4枚)   ガード bit 15
/// - bit 16-18: 銀 (3bit, 最大4枚)   ガード bit 19
/// - bit 20-22: 金 (3bit, 最大4枚)   ガード bit 23
/// - bit 24-25: 角 (2bit, 最大2枚)   ガード bit 26
/// - bit 28-29: 飛 (2bit, 最大2枚)   ガード bit 30
///
/// ガードは常に 0。`a - b` を計算すると、どこかの駒種で `a < b` のときに限り
/// そのフィールドの借りがガードに現れるので、優越判定が 1 回の減算で済む。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct Hand(u32);

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand(0);

    const PAWN_SHIFT: u32 = 0;
    const PAWN_MASK: u32 = 0x1F;
    const LANCE_SHIFT: u32 = 8;
    const LANCE_MASK: u32 = 0x07;
    const KNIGHT_SHIFT: u32 = 12;
    const KNIGHT_MASK: u32 = 0x07;
    const SILVER_SHIFT: u32 = 16;
    const SILVER_MASK: u32 = 0x07;
    const GOLD_SHIFT: u32 = 20;
    const GOLD_MASK: u32 = 0x07;
    const BISHOP_SHIFT: u32 = 24;
    const BISHOP_MASK: u32 = 0x03;
    const ROOK_SHIFT: u32 = 28;
    const ROOK_MASK: u32 = 0x03;

    /// 各フィールドのガードビット
    pub const BORROW_MASK: u32 =
        (1 << 5) | (1 << 11) | (1 << 15) | (1 << 19) | (1 << 23) | (1 << 26) | (1 << 30);

    /// 駒数フィールド全体
    const FIELD_MASK: u32 = (Self::PAWN_MASK << Self::PAWN_SHIFT)
        | (Self::LANCE_MASK << Self::LANCE_SHIFT)
        | (Self::KNIGHT_MASK << Self::KNIGHT_SHIFT)
        | (Self::SILVER_MASK << Self::SILVER_SHIFT)
        | (Self::GOLD_MASK << Self::GOLD_SHIFT)
        | (Self::BISHOP_MASK << Self::BISHOP_SHIFT)
        | (Self::ROOK_MASK << Self::ROOK_SHIFT);

    /// 指定駒種の枚数を取得
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        let (shift, mask) = Self::shift_mask(pt);
        (self.0 >> shift) & mask
    }

    /// 指定駒種を持っているか
    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        let (shift, mask) = Self::shift_mask(pt);
        self.0 & (mask << shift) != 0
    }

    /// 1枚追加
    #[inline]
    pub const fn add(self, pt: PieceType) -> Hand {
        debug_assert!(pt.is_hand_piece());
        let (shift, _) = Self::shift_mask(pt);
        Hand(self.0 + (1 << shift))
    }

    /// 1枚減らす
    #[inline]
    pub const fn sub(self, pt: PieceType) -> Hand {
        debug_assert!(self.has(pt));
        let (shift, _) = Self::shift_mask(pt);
        Hand(self.0 - (1 << shift))
    }

    /// 指定枚数をセット
    #[inline]
    pub const fn set(self, pt: PieceType, count: u32) -> Hand {
        let (shift, mask) = Self::shift_mask(pt);
        Hand((self.0 & !(mask << shift)) | ((count & mask) << shift))
    }

    /// 優等判定: 全ての駒種で self >= other
    #[inline]
    pub const fn is_superior_or_equal(self, other: Hand) -> bool {
        (self.0.wrapping_sub(other.0) & Self::BORROW_MASK) == 0
    }

    /// 持っている駒種の集合（bit i = `PieceType::HAND_PIECES[i]`）
    #[inline]
    pub const fn presence_mask(self) -> u8 {
        let mut mask = 0u8;
        let mut i = 0;
        while i < PieceType::HAND_NUM {
            if self.has(PieceType::HAND_PIECES[i]) {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    /// 手駒の総枚数
    #[inline]
    pub const fn total(self) -> u32 {
        let mut sum = 0;
        let mut i = 0;
        while i < PieceType::HAND_NUM {
            sum += self.count(PieceType::HAND_PIECES[i]);
            i += 1;
        }
        sum
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// 内部値から生成（ガードビットや範囲外の枚数を含む値は拒否）
    #[inline]
    pub const fn from_raw(raw: u32) -> Option<Hand> {
        if raw & !Self::FIELD_MASK != 0 {
            return None;
        }
        let hand = Hand(raw);
        let mut i = 0;
        while i < PieceType::HAND_NUM {
            let pt = PieceType::HAND_PIECES[i];
            if hand.count(pt) > pt.total_count() {
                return None;
            }
            i += 1;
        }
        Some(hand)
    }

    const fn shift_mask(pt: PieceType) -> (u32, u32) {
        match pt {
            PieceType::Pawn => (Self::PAWN_SHIFT, Self::PAWN_MASK),
            PieceType::Lance => (Self::LANCE_SHIFT, Self::LANCE_MASK),
            PieceType::Knight => (Self::KNIGHT_SHIFT, Self::KNIGHT_MASK),
            PieceType::Silver => (Self::SILVER_SHIFT, Self::SILVER_MASK),
            PieceType::Gold => (Self::GOLD_SHIFT, Self::GOLD_MASK),
            PieceType::Bishop => (Self::BISHOP_SHIFT, Self::BISHOP_MASK),
            PieceType::Rook => (Self::ROOK_SHIFT, Self::ROOK_MASK),
            _ => (0, 0), // King, 成駒は手駒にならない
        }
    }
}

impl TryFrom<u32> for Hand {
    type Error = String;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Hand::from_raw(raw).ok_or_else(|| format!("invalid hand value {raw:#010x}"))
    }
}

impl From<Hand> for u32 {
    fn from(hand: Hand) -> u32 {
        hand.0
    }
}
