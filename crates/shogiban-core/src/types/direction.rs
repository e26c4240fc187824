//! 方向と駒の利きの定義
//!
//! 方向は手番から見た相対方向。先手の「上」は段の小さい方、「左」は筋の大きい方。
//! 後手のオフセットは先手の符号を反転したもの。
//!
//! 利きテーブルのビット:
//! - bit 0..10: 1 歩で届く利き（`Direction` の値がそのままビット位置）
//! - bit 16..24: 飛び利き（玉の 8 方向のみ、`16 + Direction`）

use super::{Color, Piece, PieceType};

/// 手番から見た相対方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    UpLeft = 1,
    UpRight = 2,
    Left = 3,
    Right = 4,
    Down = 5,
    DownLeft = 6,
    DownRight = 7,
    /// 桂の左跳び
    KnightLeft = 8,
    /// 桂の右跳び
    KnightRight = 9,
}

/// 先手から見たオフセット（`Direction` 順）
const BLACK_OFFSETS: [i16; Direction::NUM] = [-1, 15, -17, 16, -16, 1, 17, -15, 14, -18];

const fn negate(offsets: [i16; Direction::NUM]) -> [i16; Direction::NUM] {
    let mut out = [0; Direction::NUM];
    let mut i = 0;
    while i < Direction::NUM {
        out[i] = -offsets[i];
        i += 1;
    }
    out
}

/// 手番ごとのオフセット表
pub const OFFSETS: [[i16; Direction::NUM]; Color::NUM] = [BLACK_OFFSETS, negate(BLACK_OFFSETS)];

impl Direction {
    /// 方向の数（桂の 2 方向を含む）
    pub const NUM: usize = 10;

    /// 玉の 8 方向
    pub const KING: [Direction; 8] = [
        Direction::Up,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// 全方向
    pub const ALL: [Direction; 10] = [
        Direction::Up,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::KnightLeft,
        Direction::KnightRight,
    ];

    /// 盤面配列上のオフセット
    #[inline]
    pub const fn offset(self, color: Color) -> i16 {
        OFFSETS[color as usize][self as usize]
    }

    /// 1 歩の利きのビット
    #[inline]
    pub const fn step_bit(self) -> u32 {
        1 << self as u32
    }

    /// 飛び利きのビット
    #[inline]
    pub const fn slide_bit(self) -> u32 {
        debug_assert!(!self.is_knight());
        1 << (SLIDE_SHIFT + self as u32)
    }

    /// 桂の跳びか
    #[inline]
    pub const fn is_knight(self) -> bool {
        matches!(self, Direction::KnightLeft | Direction::KnightRight)
    }

    /// 逆方向（玉の 8 方向のみ）
    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
            Direction::KnightLeft | Direction::KnightRight => self,
        }
    }

    /// 手番 `from_color` の方向を、同じ盤上の向きを持つ手番 `to_color` の方向に変換
    #[inline]
    pub const fn relative_to(self, from_color: Color, to_color: Color) -> Direction {
        if from_color as u8 == to_color as u8 { self } else { self.reverse() }
    }

    #[inline]
    pub const fn from_index(i: usize) -> Direction {
        Direction::ALL[i]
    }
}

/// 飛び利きビットの開始位置
pub const SLIDE_SHIFT: u32 = 16;

/// 1 歩の利きのビット全体
pub const STEP_BITS: u32 = 0x3FF;

/// 飛び利きのビット全体
pub const SLIDE_BITS: u32 = 0xFF << SLIDE_SHIFT;

const U: u16 = 1 << Direction::Up as u16;
const LU: u16 = 1 << Direction::UpLeft as u16;
const RU: u16 = 1 << Direction::UpRight as u16;
const L: u16 = 1 << Direction::Left as u16;
const R: u16 = 1 << Direction::Right as u16;
const D: u16 = 1 << Direction::Down as u16;
const LD: u16 = 1 << Direction::DownLeft as u16;
const RD: u16 = 1 << Direction::DownRight as u16;
const KL: u16 = 1 << Direction::KnightLeft as u16;
const KR: u16 = 1 << Direction::KnightRight as u16;

const GOLD_STEPS: u16 = U | LU | RU | L | R | D;
const DIAGONALS: u16 = LU | RU | LD | RD;
const ORTHOGONALS: u16 = U | L | R | D;

/// 駒種ごとの 1 歩の利き（`PieceType` の値で引く、0 は未使用）
pub const STEP_CAPS: [u16; 15] = [
    0,
    U,                      // 歩
    0,                      // 香
    KL | KR,                // 桂
    U | LU | RU | LD | RD,  // 銀
    0,                      // 角
    0,                      // 飛
    GOLD_STEPS,             // 金
    DIAGONALS | ORTHOGONALS, // 玉
    GOLD_STEPS,             // と
    GOLD_STEPS,             // 成香
    GOLD_STEPS,             // 成桂
    GOLD_STEPS,             // 成銀
    ORTHOGONALS,            // 馬
    DIAGONALS,              // 龍
];

/// 駒種ごとの飛び利き（bit は `Direction` の値）
pub const SLIDE_CAPS: [u8; 15] = [
    0,
    0,
    U as u8,
    0,
    0,
    DIAGONALS as u8,
    ORTHOGONALS as u8,
    0,
    0,
    0,
    0,
    0,
    0,
    DIAGONALS as u8,
    ORTHOGONALS as u8,
];

impl PieceType {
    /// 方向 `d` に 1 歩の利きがあるか
    #[inline]
    pub const fn can_step(self, d: Direction) -> bool {
        STEP_CAPS[self as usize] & (1 << d as u16) != 0
    }

    /// 方向 `d` に飛び利きがあるか
    #[inline]
    pub const fn can_slide(self, d: Direction) -> bool {
        !d.is_knight() && SLIDE_CAPS[self as usize] & (1 << d as u8) != 0
    }

    /// 1 歩の利きの方向集合
    #[inline]
    pub const fn step_mask(self) -> u16 {
        STEP_CAPS[self as usize]
    }

    /// 飛び利きの方向集合
    #[inline]
    pub const fn slide_mask(self) -> u8 {
        SLIDE_CAPS[self as usize]
    }

    /// 方向 `d` に（1 歩または飛びで）利きがあるか
    #[inline]
    pub const fn attacks_toward(self, d: Direction) -> bool {
        self.can_step(d) || self.can_slide(d)
    }
}

impl Piece {
    /// 駒の手番から見た方向 `d` に 1 歩の利きがあるか
    #[inline]
    pub const fn can_step(self, d: Direction) -> bool {
        self.piece_type().can_step(d)
    }

    /// 駒の手番から見た方向 `d` に飛び利きがあるか
    #[inline]
    pub const fn can_slide(self, d: Direction) -> bool {
        self.piece_type().can_slide(d)
    }
}

/// 方向集合のビットを順に取り出すイテレータ
#[derive(Clone, Copy)]
pub struct DirectionIter(u32);

impl DirectionIter {
    #[inline]
    pub const fn new(mask: u32) -> DirectionIter {
        DirectionIter(mask)
    }
}

impl Iterator for DirectionIter {
    type Item = Direction;

    #[inline]
    fn next(&mut self) -> Option<Direction> {
        if self.0 == 0 {
            return None;
        }
        let i = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(Direction::from_index(i as usize))
    }
}
