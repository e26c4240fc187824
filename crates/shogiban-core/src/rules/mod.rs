//! 合法性・王手・詰み・千日手・入玉宣言の判定
//!
//! どの判定も局面を書き換えない。自玉の安全や王手は利きテーブルで足りる場合はそれで判定し、
//! 足りない場合だけ盤面配列に仮の書き換えを重ねて走査する。

mod check;
mod declaration;
mod legality;
mod mate;
mod repetition;
mod status;

pub use legality::IllegalMove;
pub use status::GameStatus;
