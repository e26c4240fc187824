//! 指し手（Move）

use std::fmt;

use super::{Piece, PieceType, Square};
use crate::error::MoveDecodeError;

/// 盤上の指し手以外の特殊な手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpecialMove {
    /// 投了
    Resign = 1,
    /// パス
    Pass = 2,
    /// 入玉宣言勝ち
    WinDeclaration = 3,
    /// 千日手の申告
    RepetitionClaim = 4,
    /// 連続王手の千日手の申告
    PerpetualCheckClaim = 5,
}

impl SpecialMove {
    const fn from_u8(n: u8) -> Option<SpecialMove> {
        match n {
            1 => Some(SpecialMove::Resign),
            2 => Some(SpecialMove::Pass),
            3 => Some(SpecialMove::WinDeclaration),
            4 => Some(SpecialMove::RepetitionClaim),
            5 => Some(SpecialMove::PerpetualCheckClaim),
            _ => None,
        }
    }
}

/// 指し手（32bit、4バイト固定長）
///
/// - byte0: 移動元の升 / 駒打ちの場合は駒種（1..=7、玉より小さい）
/// - byte1: 移動先の升（0 は特殊な手）
/// - byte2: 成りフラグ（0 または 1）
/// - byte3: 取った駒（0 は駒を取らない）
///
/// 特殊な手は移動先 0 と byte0 の `SpecialMove` で表す。全ビット 0 は `Move::NONE`。
/// 取った駒は生成時点の盤面の内容であり、盤面が変わった後の手を適用するのは契約違反。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Move(u32);

impl Move {
    /// 無効な指し手
    pub const NONE: Move = Move(0);
    /// 投了
    pub const RESIGN: Move = Move::special(SpecialMove::Resign);
    /// パス
    pub const PASS: Move = Move::special(SpecialMove::Pass);
    /// 入玉宣言
    pub const WIN_DECLARATION: Move = Move::special(SpecialMove::WinDeclaration);
    /// 千日手の申告
    pub const REPETITION_CLAIM: Move = Move::special(SpecialMove::RepetitionClaim);
    /// 連続王手の千日手の申告
    pub const PERPETUAL_CHECK_CLAIM: Move = Move::special(SpecialMove::PerpetualCheckClaim);

    /// 成りフラグの値
    pub const PROMOTE_FLAG: u8 = 1;

    /// 移動の指し手を生成
    #[inline]
    pub const fn new_move(from: Square, to: Square, promote: bool, captured: Piece) -> Move {
        Move::pack(from.raw(), to.raw(), promote as u8, captured.raw())
    }

    /// 駒打ちの指し手を生成
    #[inline]
    pub const fn new_drop(piece_type: PieceType, to: Square) -> Move {
        debug_assert!(piece_type.is_hand_piece());
        Move::pack(piece_type as u8, to.raw(), 0, 0)
    }

    /// 特殊な手を生成
    #[inline]
    pub const fn special(kind: SpecialMove) -> Move {
        Move::pack(kind as u8, 0, 0, 0)
    }

    #[inline]
    const fn pack(origin: u8, to: u8, promote: u8, captured: u8) -> Move {
        Move(
            origin as u32 | (to as u32) << 8 | (promote as u32) << 16 | (captured as u32) << 24,
        )
    }

    #[inline]
    const fn origin_byte(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    const fn to_byte(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// 無効な指し手か
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 特殊な手か
    #[inline]
    pub const fn is_special(self) -> bool {
        self.to_byte() == 0 && self.0 != 0
    }

    /// 特殊な手の種類
    #[inline]
    pub const fn special_kind(self) -> Option<SpecialMove> {
        if self.to_byte() == 0 { SpecialMove::from_u8(self.origin_byte()) } else { None }
    }

    /// 盤上の手（移動または駒打ち）か
    #[inline]
    pub const fn is_board_move(self) -> bool {
        self.to_byte() != 0
    }

    /// 駒打ちか
    #[inline]
    pub const fn is_drop(self) -> bool {
        self.to_byte() != 0 && self.origin_byte() < PieceType::King as u8
    }

    /// 成りか
    #[inline]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> 16) as u8 == Self::PROMOTE_FLAG
    }

    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        debug_assert!(self.is_board_move());
        Square::from_index_unchecked(self.to_byte() as usize)
    }

    /// 移動元（駒打ちでは無効）
    #[inline]
    pub const fn from(self) -> Square {
        debug_assert!(self.is_board_move() && !self.is_drop());
        Square::from_index_unchecked(self.origin_byte() as usize)
    }

    /// 打つ駒種（駒打ちでない場合は無効）
    #[inline]
    pub const fn drop_piece_type(self) -> PieceType {
        debug_assert!(self.is_drop());
        match PieceType::from_u8(self.origin_byte()) {
            Some(pt) => pt,
            None => PieceType::Pawn,
        }
    }

    /// 取った駒（取らない場合は `Piece::EMPTY`）
    #[inline]
    pub const fn captured(self) -> Piece {
        match Piece::from_code((self.0 >> 24) as u8) {
            Some(pc) => pc,
            None => Piece::EMPTY,
        }
    }

    /// 駒を取る手か
    #[inline]
    pub const fn is_capture(self) -> bool {
        (self.0 >> 24) != 0
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// 4バイト表現（byte0 が先頭）
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// 4バイト表現から復元（形式の検査あり、盤面との整合は見ない）
    pub fn from_bytes(bytes: [u8; 4]) -> Result<Move, MoveDecodeError> {
        let [origin, to, promote, captured] = bytes;

        if to == 0 {
            if bytes == [0; 4] {
                return Ok(Move::NONE);
            }
            let kind = SpecialMove::from_u8(origin).ok_or(MoveDecodeError::UnknownSpecial(origin))?;
            if promote != 0 || captured != 0 {
                return Err(MoveDecodeError::SpecialWithPayload(kind));
            }
            return Ok(Move::special(kind));
        }

        if Square::from_u8(to).is_none() {
            return Err(MoveDecodeError::InvalidDestination(to));
        }
        if promote > Self::PROMOTE_FLAG {
            return Err(MoveDecodeError::InvalidPromotionFlag(promote));
        }
        match Piece::from_code(captured) {
            Some(pc) if pc.is_empty() => {}
            Some(pc) if pc.piece_type() != PieceType::King => {}
            _ => return Err(MoveDecodeError::InvalidCapturedPiece(captured)),
        }

        if origin < PieceType::King as u8 {
            if origin == 0 {
                return Err(MoveDecodeError::InvalidOrigin(origin));
            }
            if promote != 0 {
                return Err(MoveDecodeError::PromotedDrop);
            }
            if captured != 0 {
                return Err(MoveDecodeError::CapturingDrop);
            }
        } else if Square::from_u8(origin).is_none() {
            return Err(MoveDecodeError::InvalidOrigin(origin));
        }

        Ok(Move::pack(origin, to, promote, captured))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "none");
        }
        if let Some(kind) = self.special_kind() {
            return write!(f, "{kind:?}");
        }
        if self.is_drop() {
            write!(f, "{:?}*{}", self.drop_piece_type(), self.to())
        } else {
            write!(f, "{}-{}{}", self.from(), self.to(), if self.is_promotion() { "+" } else { "" })
        }
    }
}
