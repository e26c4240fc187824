//! # shogiban-core
//!
//! 将棋のルールと局面更新のコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Piece, Move, Hand, 方向と利きの定義）
//! - `board`: 盤面表現、利きテーブルの差分更新、do_move/undo_move、履歴とスナップショット
//! - `movegen`: 合法手生成（王手回避、駒打ち、総当たりの検証用生成）
//! - `rules`: 合法性・王手・詰み・打ち歩詰め・千日手・入玉宣言の判定
//! - `config`: 対局ルールの設定
//! - `error`: エラー型
//!
//! ## 使い方
//!
//! ```
//! use shogiban_core::{Board, GenType};
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves(GenType::All);
//! assert_eq!(moves.len(), 30);
//!
//! let mv = moves[0];
//! board.do_move(mv);
//! board.undo_move(mv);
//! assert_eq!(board, Board::new());
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod movegen;
pub mod rules;
pub mod types;

pub use board::{Board, BoardObserver, HistoryEntry, PositionRecord};
pub use config::{EnteringKingRule, RuleConfig};
pub use error::{ConsistencyError, MoveDecodeError, PositionError, SnapshotError};
pub use movegen::{GenType, MoveList};
pub use rules::{GameStatus, IllegalMove};
pub use types::{Color, Hand, Move, Piece, PieceType, RepetitionState, SpecialMove, Square};
