//! 駒（Piece）
//!
//! 盤面配列に置かれる 1 バイトの値。
//! - bit 0-3: `PieceType`（1..=14）
//! - bit 4: `Color`（0 = Black, 1 = White）
//! - `Piece::EMPTY`（0）は空き升、`Piece::WALL`（32）は盤外の番兵。
//!
//! `piece_type()` / `color()` は実際の駒（`is_piece()`）に対してのみ呼び出すのが契約。

use super::{Color, PieceType};
use serde::{Deserialize, Serialize};

/// 駒（先後の区別あり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(transparent)]
pub struct Piece(u8);

/// 下位4bitから駒種への変換表（0 と 15 は使われない）
const KIND_TABLE: [PieceType; 16] = [
    PieceType::Pawn,
    PieceType::Pawn,
    PieceType::Lance,
    PieceType::Knight,
    PieceType::Silver,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Gold,
    PieceType::King,
    PieceType::ProPawn,
    PieceType::ProLance,
    PieceType::ProKnight,
    PieceType::ProSilver,
    PieceType::Horse,
    PieceType::Dragon,
    PieceType::Dragon,
];

impl Piece {
    /// 空き升
    pub const EMPTY: Piece = Piece(0);

    /// 盤外（番兵）
    pub const WALL: Piece = Piece(32);

    // 先手の駒
    pub const B_PAWN: Piece = Piece(1);
    pub const B_LANCE: Piece = Piece(2);
    pub const B_KNIGHT: Piece = Piece(3);
    pub const B_SILVER: Piece = Piece(4);
    pub const B_BISHOP: Piece = Piece(5);
    pub const B_ROOK: Piece = Piece(6);
    pub const B_GOLD: Piece = Piece(7);
    pub const B_KING: Piece = Piece(8);
    pub const B_PRO_PAWN: Piece = Piece(9);
    pub const B_PRO_LANCE: Piece = Piece(10);
    pub const B_PRO_KNIGHT: Piece = Piece(11);
    pub const B_PRO_SILVER: Piece = Piece(12);
    pub const B_HORSE: Piece = Piece(13);
    pub const B_DRAGON: Piece = Piece(14);

    // 後手の駒（+16）
    pub const W_PAWN: Piece = Piece(17);
    pub const W_LANCE: Piece = Piece(18);
    pub const W_KNIGHT: Piece = Piece(19);
    pub const W_SILVER: Piece = Piece(20);
    pub const W_BISHOP: Piece = Piece(21);
    pub const W_ROOK: Piece = Piece(22);
    pub const W_GOLD: Piece = Piece(23);
    pub const W_KING: Piece = Piece(24);
    pub const W_PRO_PAWN: Piece = Piece(25);
    pub const W_PRO_LANCE: Piece = Piece(26);
    pub const W_PRO_KNIGHT: Piece = Piece(27);
    pub const W_PRO_SILVER: Piece = Piece(28);
    pub const W_HORSE: Piece = Piece(29);
    pub const W_DRAGON: Piece = Piece(30);

    /// 配列サイズ用（EMPTY を含む、WALL を含まない）
    pub const NUM: usize = 31;

    /// ColorとPieceTypeから生成
    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(piece_type as u8 | ((color as u8) << 4))
    }

    /// 駒種を取得
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        debug_assert!(self.is_piece());
        KIND_TABLE[(self.0 & 0x0F) as usize]
    }

    /// 手番を取得
    #[inline]
    pub const fn color(self) -> Color {
        debug_assert!(self.is_piece());
        if self.0 & 0x10 == 0 { Color::Black } else { Color::White }
    }

    /// 空き升か
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 盤外か
    #[inline]
    pub const fn is_wall(self) -> bool {
        self.0 == Self::WALL.0
    }

    /// 駒か（空き升でも盤外でもない）
    #[inline]
    pub const fn is_piece(self) -> bool {
        self.0 != 0 && self.0 < Self::WALL.0
    }

    /// 指定した手番の駒か
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        self.is_piece() && (self.0 >> 4) == color as u8
    }

    /// 成り駒を返す
    #[inline]
    pub const fn promote(self) -> Option<Piece> {
        match self.piece_type().promote() {
            Some(pt) => Some(Piece::new(self.color(), pt)),
            None => None,
        }
    }

    /// 生駒を返す
    #[inline]
    pub const fn unpromote(self) -> Piece {
        Piece::new(self.color(), self.piece_type().unpromote())
    }

    /// インデックス（0-30、0は空き升）
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 盤面コード（0 = 空き升、それ以外は駒）から復元。盤外は受け付けない。
    #[inline]
    pub const fn from_code(code: u8) -> Option<Piece> {
        if code == 0 {
            return Some(Piece::EMPTY);
        }
        match PieceType::from_u8(code & 0x0F) {
            Some(_) if code & !0x1F == 0 => Some(Piece(code)),
            _ => None,
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::EMPTY
    }
}

impl TryFrom<u8> for Piece {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Piece::from_code(code).ok_or_else(|| format!("invalid piece code {code}"))
    }
}

impl From<Piece> for u8 {
    fn from(pc: Piece) -> u8 {
        pc.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_new() {
        assert_eq!(Piece::new(Color::Black, PieceType::Pawn), Piece::B_PAWN);
        assert_eq!(Piece::new(Color::White, PieceType::Pawn), Piece::W_PAWN);
        assert_eq!(Piece::new(Color::Black, PieceType::King), Piece::B_KING);
        assert_eq!(Piece::new(Color::White, PieceType::Dragon), Piece::W_DRAGON);
    }

    #[test]
    fn test_piece_type_and_color() {
        for color in Color::ALL {
            for pt in PieceType::ALL {
                let pc = Piece::new(color, pt);
                assert!(pc.is_piece());
                assert_eq!(pc.piece_type(), pt);
                assert_eq!(pc.color(), color);
                assert!(pc.is_color(color));
                assert!(!pc.is_color(!color));
            }
        }
    }

    #[test]
    fn test_piece_empty_and_wall() {
        assert!(Piece::EMPTY.is_empty());
        assert!(!Piece::EMPTY.is_piece());
        assert!(Piece::WALL.is_wall());
        assert!(!Piece::WALL.is_piece());
        assert!(!Piece::WALL.is_color(Color::Black));
        assert!(!Piece::WALL.is_color(Color::White));
    }

    #[test]
    fn test_piece_promote() {
        assert_eq!(Piece::B_PAWN.promote(), Some(Piece::B_PRO_PAWN));
        assert_eq!(Piece::W_ROOK.promote(), Some(Piece::W_DRAGON));
        assert_eq!(Piece::B_GOLD.promote(), None);
        assert_eq!(Piece::W_HORSE.unpromote(), Piece::W_BISHOP);
    }

    #[test]
    fn test_piece_from_code() {
        assert_eq!(Piece::from_code(0), Some(Piece::EMPTY));
        assert_eq!(Piece::from_code(1), Some(Piece::B_PAWN));
        assert_eq!(Piece::from_code(30), Some(Piece::W_DRAGON));
        assert_eq!(Piece::from_code(15), None);
        assert_eq!(Piece::from_code(16), None);
        assert_eq!(Piece::from_code(31), None);
        assert_eq!(Piece::from_code(32), None);
        assert_eq!(Piece::from_code(0x81), None);
    }
}
