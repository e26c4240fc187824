//! エラー型
//!
//! 盤面への問い合わせは失敗しない（`bool` / `Result<(), IllegalMove>` / 状態列挙を返す）。
//! 失敗しうるのは局面の構築、スナップショットの復元、指し手のバイト列の復元、
//! および差分更新の整合性検査だけ。

use crate::types::{Color, Move, Piece, PieceType, SpecialMove, Square};

/// 指し手の 4 バイト表現の復元エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveDecodeError {
    #[error("invalid origin byte {0}")]
    InvalidOrigin(u8),

    #[error("invalid destination byte {0}")]
    InvalidDestination(u8),

    #[error("invalid promotion flag {0}")]
    InvalidPromotionFlag(u8),

    #[error("invalid captured piece code {0}")]
    InvalidCapturedPiece(u8),

    #[error("unknown special move {0}")]
    UnknownSpecial(u8),

    #[error("special move {0:?} carries promotion or capture bytes")]
    SpecialWithPayload(SpecialMove),

    #[error("drop cannot promote")]
    PromotedDrop,

    #[error("drop cannot capture")]
    CapturingDrop,
}

/// 局面の構築エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("square index {0} is not on the board")]
    InvalidSquare(u8),

    #[error("square {0} is given twice")]
    DuplicateSquare(Square),

    #[error("{color:?} has {count} kings")]
    KingCount { color: Color, count: usize },

    #[error("too many {piece_type:?}: {count}")]
    TooManyPieces { piece_type: PieceType, count: u32 },

    #[error("{color:?} has two pawns on file {file}")]
    DoublePawn { color: Color, file: u8 },

    #[error("{piece:?} on {square} can never move")]
    DeadPiece { piece: Piece, square: Square },

    #[error("side not to move ({0:?}) is in check")]
    OpponentInCheck(Color),

    #[error("move {index} ({mv}) is illegal")]
    IllegalMove { index: usize, mv: Move },

    #[error("ply {requested} is outside the recorded range {earliest}..={current}")]
    PlyOutOfRange { requested: u16, earliest: u16, current: u16 },
}

/// スナップショットの復元エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("{0} trailing bytes after snapshot")]
    TrailingBytes(usize),

    #[error("invalid piece code {code} at board index {index}")]
    InvalidPiece { index: usize, code: u8 },

    #[error("invalid hand value {0:#010x}")]
    InvalidHand(u32),

    #[error("invalid side-to-move byte {0}")]
    InvalidColor(u8),

    #[error("history length {history} exceeds ply {ply}")]
    HistoryTooLong { history: u16, ply: u16 },

    #[error("invalid position: {0}")]
    Position(#[from] PositionError),

    #[error("history entry {index}: {source}")]
    MoveDecode {
        index: usize,
        #[source]
        source: MoveDecodeError,
    },

    #[error("history entry {index}: move {mv} cannot be retracted")]
    UnretractableMove { index: usize, mv: Move },

    #[error("history entry {index}: move {mv} is illegal")]
    IllegalHistoryMove { index: usize, mv: Move },

    #[error("history entry {index}: recorded key {recorded:#018x} does not match {computed:#018x}")]
    KeyMismatch { index: usize, recorded: u64, computed: u64 },

    #[error("history entry {index}: recorded hand {recorded:#010x} does not match {computed:#010x}")]
    HandMismatch { index: usize, recorded: u32, computed: u32 },
}

/// 差分更新と全再計算の不一致
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("attack mask of {color:?} at {square}: incremental {incremental:#x}, scanned {scanned:#x}")]
    AttackMask { color: Color, square: Square, incremental: u32, scanned: u32 },

    #[error("wall square {0} carries attack bits")]
    WallAttack(Square),

    #[error("position key: incremental {incremental:#018x}, recomputed {recomputed:#018x}")]
    Key { incremental: u64, recomputed: u64 },

    #[error("king square cache of {0:?} is stale")]
    KingSquare(Color),

    #[error("pawn file cache of {color:?}: incremental {incremental:#011b}, scanned {scanned:#011b}")]
    PawnFiles { color: Color, incremental: u16, scanned: u16 },
}
