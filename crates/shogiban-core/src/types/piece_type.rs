//! 駒種（PieceType）

use serde::{Deserialize, Serialize};

/// 駒種（先後の区別なし）
///
/// 成駒は生駒の値に 8 を足したもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    // 生駒
    Pawn = 1,
    Lance = 2,
    Knight = 3,
    Silver = 4,
    Bishop = 5,
    Rook = 6,
    Gold = 7,
    King = 8,
    // 成駒
    ProPawn = 9,
    ProLance = 10,
    ProKnight = 11,
    ProSilver = 12,
    Horse = 13,  // 成角
    Dragon = 14, // 成飛
}

impl PieceType {
    /// 有効な駒種の数（1-14）
    pub const NUM: usize = 14;

    /// 手駒になる駒種の数
    pub const HAND_NUM: usize = 7;

    /// 成りフラグのビット
    pub const PROMOTED_BIT: u8 = 8;

    /// 全駒種
    pub const ALL: [PieceType; 14] = [
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
    ];

    /// 手駒になる駒種一覧（`hand_index()` の順）
    pub const HAND_PIECES: [PieceType; 7] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
    ];

    /// 成れるかどうか
    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            PieceType::Pawn
                | PieceType::Lance
                | PieceType::Knight
                | PieceType::Silver
                | PieceType::Bishop
                | PieceType::Rook
        )
    }

    /// 成り駒を返す（成れない場合はNone）
    #[inline]
    pub const fn promote(self) -> Option<PieceType> {
        match self {
            PieceType::Pawn => Some(PieceType::ProPawn),
            PieceType::Lance => Some(PieceType::ProLance),
            PieceType::Knight => Some(PieceType::ProKnight),
            PieceType::Silver => Some(PieceType::ProSilver),
            PieceType::Bishop => Some(PieceType::Horse),
            PieceType::Rook => Some(PieceType::Dragon),
            _ => None,
        }
    }

    /// 生駒を返す（既に生駒の場合はそのまま）
    #[inline]
    pub const fn unpromote(self) -> PieceType {
        match self {
            PieceType::ProPawn => PieceType::Pawn,
            PieceType::ProLance => PieceType::Lance,
            PieceType::ProKnight => PieceType::Knight,
            PieceType::ProSilver => PieceType::Silver,
            PieceType::Horse => PieceType::Bishop,
            PieceType::Dragon => PieceType::Rook,
            _ => self,
        }
    }

    /// 成駒かどうか
    #[inline]
    pub const fn is_promoted(self) -> bool {
        self as u8 > PieceType::King as u8
    }

    /// 遠方駒（香角飛馬龍）かどうか
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(
            self,
            PieceType::Lance
                | PieceType::Bishop
                | PieceType::Rook
                | PieceType::Horse
                | PieceType::Dragon
        )
    }

    /// 歩・香・桂（行き所のない升がある駒）かどうか
    #[inline]
    pub const fn is_pawn_lance_knight(self) -> bool {
        matches!(self, PieceType::Pawn | PieceType::Lance | PieceType::Knight)
    }

    /// 成らないと不利にしかならない駒（歩・角・飛）かどうか
    #[inline]
    pub const fn always_promote(self) -> bool {
        matches!(self, PieceType::Pawn | PieceType::Bishop | PieceType::Rook)
    }

    /// 手駒にできる駒種かどうか
    #[inline]
    pub const fn is_hand_piece(self) -> bool {
        (self as u8) < PieceType::King as u8
    }

    /// 手駒配列でのインデックス（0..7）。手駒にならない駒種は生駒のインデックス。
    #[inline]
    pub const fn hand_index(self) -> usize {
        match self.unpromote() {
            PieceType::Pawn => 0,
            PieceType::Lance => 1,
            PieceType::Knight => 2,
            PieceType::Silver => 3,
            PieceType::Gold => 4,
            PieceType::Bishop => 5,
            PieceType::Rook => 6,
            _ => 7,
        }
    }

    /// 入玉宣言での点数（大駒5点、小駒1点、玉0点）
    #[inline]
    pub const fn declaration_points(self) -> u32 {
        match self.unpromote() {
            PieceType::Bishop | PieceType::Rook => 5,
            PieceType::King => 0,
            _ => 1,
        }
    }

    /// 手駒・盤上で最大何枚存在しうるか（駒箱の総数）
    #[inline]
    pub const fn total_count(self) -> u32 {
        match self.unpromote() {
            PieceType::Pawn => 18,
            PieceType::Bishop | PieceType::Rook | PieceType::King => 2,
            _ => 4,
        }
    }

    /// インデックス（1-14）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// u8から変換（範囲チェックあり）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<PieceType> {
        match n {
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Lance),
            3 => Some(PieceType::Knight),
            4 => Some(PieceType::Silver),
            5 => Some(PieceType::Bishop),
            6 => Some(PieceType::Rook),
            7 => Some(PieceType::Gold),
            8 => Some(PieceType::King),
            9 => Some(PieceType::ProPawn),
            10 => Some(PieceType::ProLance),
            11 => Some(PieceType::ProKnight),
            12 => Some(PieceType::ProSilver),
            13 => Some(PieceType::Horse),
            14 => Some(PieceType::Dragon),
            _ => None,
        }
    }
}
