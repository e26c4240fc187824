//! 基本型モジュール
//!
//! # 型の依存関係
//!
//! ```text
//! Color
//!   ↓
//! Square
//!   ↓
//! PieceType → Direction（利きの定義）
//!   ↓
//! Piece ← Move
//!   ↓
//! Hand
//!
//! RepetitionState は独立
//! ```

mod color;
mod direction;
mod hand;
mod moves;
mod piece;
mod piece_type;
mod repetition;
mod square;

pub use color::Color;
pub use direction::{Direction, DirectionIter, OFFSETS, SLIDE_BITS, SLIDE_SHIFT, STEP_BITS};
pub use hand::Hand;
pub use moves::{Move, SpecialMove};
pub use piece::Piece;
pub use piece_type::PieceType;
pub use repetition::RepetitionState;
pub use square::Square;
