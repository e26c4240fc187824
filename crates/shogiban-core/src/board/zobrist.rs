//! Zobristハッシュ
//!
//! 局面のキーは盤面側のキー（駒×升、手番）と手駒側のキーの XOR。
//! 手駒側は駒種ごとの乱数を枚数だけ加算する（加算型）ので、1 枚の増減が 1 回の加減算で済み、
//! 盤面だけが同じ局面の比較（優等・劣等局面）にも盤面側のキーをそのまま使える。

use crate::types::{Color, Hand, Piece, PieceType, Square};

/// Zobristハッシュ用乱数テーブル
pub struct Zobrist {
    /// 手番用（後手番のときに XOR）
    pub side: u64,
    /// 駒×升 [Piece.index()][Square.index()]
    pub psq: [[u64; Square::NUM]; 32],
    /// 手駒（加算型）[Color][PieceType::hand_index()]
    pub hand: [[u64; PieceType::HAND_NUM]; Color::NUM],
}

impl Zobrist {
    /// テーブル初期化
    pub const fn init() -> Self {
        let mut zobrist = Zobrist {
            side: 0,
            psq: [[0; Square::NUM]; 32],
            hand: [[0; PieceType::HAND_NUM]; Color::NUM],
        };

        let mut seed = 0x5EED_0B0A_2D5E_F00Du64;

        seed = xorshift64(seed);
        zobrist.side = seed;

        // pc == 0 (Piece::EMPTY) は常に0
        let mut pc = 1;
        while pc < 32 {
            let mut sq = 0;
            while sq < Square::NUM {
                seed = xorshift64(seed);
                zobrist.psq[pc][sq] = seed;
                sq += 1;
            }
            pc += 1;
        }

        let mut c = 0;
        while c < Color::NUM {
            let mut pt = 0;
            while pt < PieceType::HAND_NUM {
                seed = xorshift64(seed);
                zobrist.hand[c][pt] = seed;
                pt += 1;
            }
            c += 1;
        }

        zobrist
    }
}

/// XorShift64疑似乱数生成（const fn対応）
const fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// グローバルZobristテーブル
pub static ZOBRIST: Zobrist = Zobrist::init();

/// 駒と升のハッシュを取得
#[inline]
pub fn zobrist_psq(pc: Piece, sq: Square) -> u64 {
    ZOBRIST.psq[pc.index()][sq.index()]
}

/// 手駒 1 枚分のハッシュを取得
#[inline]
pub fn zobrist_hand(color: Color, pt: PieceType) -> u64 {
    debug_assert!(pt.is_hand_piece());
    ZOBRIST.hand[color.index()][pt.hand_index()]
}

/// 手番のハッシュを取得
#[inline]
pub fn zobrist_side() -> u64 {
    ZOBRIST.side
}

/// 両者の手駒から手駒側のキーを計算
pub fn hand_key(hands: &[Hand; Color::NUM]) -> u64 {
    let mut key = 0u64;
    for color in Color::ALL {
        for pt in PieceType::HAND_PIECES {
            let count = hands[color.index()].count(pt) as u64;
            key = key.wrapping_add(zobrist_hand(color, pt).wrapping_mul(count));
        }
    }
    key
}
