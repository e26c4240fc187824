//! 盤面（Board）
//!
//! 駒の配置、手駒、手番、局面のキー、両者の利きテーブルをまとめて持ち、
//! `do_move` / `undo_move` でそれらを差分更新する。

mod effect;
mod history;
mod observer;
mod record;
mod snapshot;
mod verify;
pub mod zobrist;

use std::fmt;
use std::sync::Arc;

use crate::config::RuleConfig;
use crate::types::{Color, Direction, Hand, Move, Piece, PieceType, SLIDE_BITS, Square};

pub(crate) use effect::{Overlay, PieceAt, is_attacked_by};
pub use history::HistoryEntry;
pub use observer::BoardObserver;
pub use record::PositionRecord;
pub use snapshot::SNAPSHOT_HEADER_LEN;

use effect::AttackTable;
use zobrist::{zobrist_hand, zobrist_psq, zobrist_side};

/// 将棋の盤面
///
/// `Clone` は配置・利きテーブル・手駒・履歴を含む独立したコピーを作る。
/// 通知先（`BoardObserver`）だけは共有される。
#[derive(Clone)]
pub struct Board {
    squares: [Piece; Square::NUM],
    attacks: AttackTable,
    hands: [Hand; Color::NUM],
    side_to_move: Color,
    ply: u16,
    /// 駒×升と手番のキー
    board_key: u64,
    /// 手駒のキー（加算型）
    hand_key: u64,
    king_square: [Option<Square>; Color::NUM],
    /// 生の歩がある筋（bit = 筋番号）
    pawn_files: [u16; Color::NUM],
    history: Vec<HistoryEntry>,
    /// 履歴の先頭の局面
    initial: Arc<PositionRecord>,
    config: RuleConfig,
    observer: Option<Arc<dyn BoardObserver>>,
}

impl Board {
    /// 平手の初期局面
    pub fn new() -> Board {
        Board::from_record(&PositionRecord::default())
            .unwrap_or_else(|_| unreachable!("standard opening is a valid position"))
    }

    /// 駒のない盤面（局面の構築用）
    fn empty(config: RuleConfig) -> Board {
        let mut squares = [Piece::WALL; Square::NUM];
        for sq in Square::ALL {
            squares[sq.index()] = Piece::EMPTY;
        }
        Board {
            squares,
            attacks: AttackTable::new(),
            hands: [Hand::EMPTY; Color::NUM],
            side_to_move: Color::Black,
            ply: 0,
            board_key: 0,
            hand_key: 0,
            king_square: [None; Color::NUM],
            pawn_files: [0; Color::NUM],
            history: Vec::new(),
            initial: Arc::new(PositionRecord::default()),
            config,
            observer: None,
        }
    }

    /// ルール設定を差し替える
    pub fn with_config(mut self, config: RuleConfig) -> Board {
        self.config = config;
        self
    }

    /// 変更通知先を設定する
    pub fn with_observer(mut self, observer: Arc<dyn BoardObserver>) -> Board {
        self.observer = Some(observer);
        self
    }

    /// 変更通知先を外したコピー（試し指し用）
    pub(crate) fn detached(&self) -> Board {
        let mut board = self.clone();
        board.observer = None;
        board
    }

    // ------------------------------------------------------------------
    // 参照
    // ------------------------------------------------------------------

    /// 升の内容
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    /// 盤面配列（壁を含む）
    #[inline]
    pub(crate) fn squares(&self) -> &[Piece; Square::NUM] {
        &self.squares
    }

    /// 手駒
    #[inline]
    pub fn hand(&self, color: Color) -> Hand {
        self.hands[color.index()]
    }

    /// 両者の手駒
    #[inline]
    pub fn hands(&self) -> [Hand; Color::NUM] {
        self.hands
    }

    /// 手番
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 開始からの手数
    #[inline]
    pub fn ply(&self) -> u16 {
        self.ply
    }

    /// 局面のキー（盤面・手番・手駒）
    #[inline]
    pub fn key(&self) -> u64 {
        self.board_key ^ self.hand_key
    }

    /// 盤面と手番だけのキー
    #[inline]
    pub fn board_key(&self) -> u64 {
        self.board_key
    }

    /// 手駒だけのキー
    #[inline]
    pub fn hand_key(&self) -> u64 {
        self.hand_key
    }

    /// 升 `sq` に対する `color` の利きマスク
    #[inline]
    pub fn attack_mask(&self, color: Color, sq: Square) -> u32 {
        self.attacks.get(color, sq)
    }

    /// 升 `sq` に `color` の利きがあるか
    #[inline]
    pub fn is_attacked(&self, sq: Square, color: Color) -> bool {
        self.attacks.get(color, sq) != 0
    }

    /// 玉の位置
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_square[color.index()]
    }

    /// `color` が王手されているか
    #[inline]
    pub fn in_check_color(&self, color: Color) -> bool {
        match self.king_square[color.index()] {
            Some(ksq) => self.attacks.get(!color, ksq) != 0,
            None => false,
        }
    }

    /// 手番側が王手されているか
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check_color(self.side_to_move)
    }

    /// 筋 `file` に `color` の生の歩があるか
    #[inline]
    pub fn has_pawn_on_file(&self, color: Color, file: u8) -> bool {
        self.pawn_files[color.index()] & (1 << file) != 0
    }

    /// ルール設定
    #[inline]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// 現在の盤面で `from` から `to` へ動かす指し手（取る駒は盤面から埋める）
    #[inline]
    pub fn make_move(&self, from: Square, to: Square, promote: bool) -> Move {
        Move::new_move(from, to, promote, self.piece_on(to))
    }

    /// 手番側が `pt` を `to` に打つ指し手
    #[inline]
    pub fn make_drop(&self, pt: PieceType, to: Square) -> Move {
        Move::new_drop(pt, to)
    }

    /// 升 `to` に利いている `color` の駒の位置（利きテーブルから逆引き）
    pub fn attackers_of(&self, to: Square, color: Color) -> impl Iterator<Item = Square> + '_ {
        let mask = self.attacks.get(color, to);
        crate::types::DirectionIter::new(mask & crate::types::STEP_BITS)
            .map(move |d| to.offset(-d.offset(color)))
            .chain(
                crate::types::DirectionIter::new((mask & SLIDE_BITS) >> crate::types::SLIDE_SHIFT)
                    .map(move |d| self.ray_source(to, color, d)),
            )
    }

    /// `to` に届いている `color` の方向 `d` の飛び利きの出どころ
    pub(crate) fn ray_source(&self, to: Square, color: Color, d: Direction) -> Square {
        let back = -d.offset(color);
        let mut sq = to.offset(back);
        while self.squares[sq.index()].is_empty() {
            sq = sq.offset(back);
        }
        debug_assert!(self.squares[sq.index()].is_color(color));
        sq
    }

    // ------------------------------------------------------------------
    // 指し手の適用
    // ------------------------------------------------------------------

    /// 指し手を適用する
    ///
    /// `mv` は現局面で合法な盤上の手でなければならない（契約）。
    /// 手数はスナップショットの 16 ビット欄に収まる範囲に限られ、
    /// `u16::MAX` 手目の局面で呼んではならない。
    pub fn do_move(&mut self, mv: Move) {
        debug_assert!(mv.is_board_move(), "do_move called with {mv}");
        debug_assert!(self.ply < u16::MAX, "ply limit reached at {}", self.ply);
        if let Some(observer) = self.observer.clone() {
            observer.before_move(self, mv);
        }

        let us = self.side_to_move;
        self.history.push(HistoryEntry {
            key: self.key(),
            hands: self.hands,
            mv,
            in_check: self.in_check(),
        });

        let to = mv.to();
        if mv.is_drop() {
            let pt = mv.drop_piece_type();
            self.hands[us.index()] = self.hands[us.index()].sub(pt);
            self.hand_key = self.hand_key.wrapping_sub(zobrist_hand(us, pt));
            self.put_piece(to, Piece::new(us, pt));
        } else {
            let from = mv.from();
            let pc = self.take_piece(from);
            debug_assert!(pc.is_color(us), "no piece of {us:?} on {from}");
            let moved = if mv.is_promotion() { pc.promote().unwrap_or(pc) } else { pc };

            let captured = mv.captured();
            debug_assert_eq!(self.squares[to.index()], captured, "stale move {mv}");
            if captured.is_piece() {
                let pt = captured.piece_type().unpromote();
                self.hands[us.index()] = self.hands[us.index()].add(pt);
                self.hand_key = self.hand_key.wrapping_add(zobrist_hand(us, pt));
                self.swap_piece(to, moved);
            } else {
                self.put_piece(to, moved);
            }
        }

        self.side_to_move = !us;
        self.board_key ^= zobrist_side();
        self.ply += 1;

        self.debug_verify();
        if let Some(observer) = self.observer.clone() {
            observer.after_move(self, mv);
        }
    }

    /// 直前に適用した指し手を戻す
    ///
    /// `mv` は最後に `do_move` に渡した手と同じでなければならない（契約）。
    pub fn undo_move(&mut self, mv: Move) {
        debug_assert_eq!(self.history.last().map(|e| e.mv), Some(mv), "undo_move mismatch");
        if let Some(observer) = self.observer.clone() {
            observer.before_undo(self, mv);
        }

        self.retract(mv);
        self.history.pop();

        self.debug_verify();
        if let Some(observer) = self.observer.clone() {
            observer.after_undo(self, mv);
        }
    }

    /// 履歴を使わずに指し手を盤面から取り消す
    ///
    /// `mv` の取った駒・成りの情報だけで直前の局面に戻せる。
    pub(crate) fn retract(&mut self, mv: Move) {
        let us = !self.side_to_move;
        self.side_to_move = us;
        self.board_key ^= zobrist_side();
        self.ply -= 1;

        let to = mv.to();
        if mv.is_drop() {
            let pt = mv.drop_piece_type();
            self.take_piece(to);
            self.hands[us.index()] = self.hands[us.index()].add(pt);
            self.hand_key = self.hand_key.wrapping_add(zobrist_hand(us, pt));
        } else {
            let captured = mv.captured();
            let moved = if captured.is_piece() {
                let pt = captured.piece_type().unpromote();
                self.hands[us.index()] = self.hands[us.index()].sub(pt);
                self.hand_key = self.hand_key.wrapping_sub(zobrist_hand(us, pt));
                self.swap_piece(to, captured)
            } else {
                self.take_piece(to)
            };
            let pc = if mv.is_promotion() { moved.unpromote() } else { moved };
            self.put_piece(mv.from(), pc);
        }
    }

    // ------------------------------------------------------------------
    // 升単位の更新（配置・利き・キー・キャッシュをまとめて更新する）
    // ------------------------------------------------------------------

    /// 空き升 `sq` に駒を置く
    fn put_piece(&mut self, sq: Square, pc: Piece) {
        debug_assert!(self.squares[sq.index()].is_empty());
        self.squares[sq.index()] = pc;
        self.attacks.block_rays_at(&self.squares, sq);
        self.attacks.add_piece(&self.squares, sq, pc);
        self.board_key ^= zobrist_psq(pc, sq);
        self.note_placed(sq, pc);
    }

    /// 升 `sq` の駒を取り除く
    fn take_piece(&mut self, sq: Square) -> Piece {
        let pc = self.squares[sq.index()];
        debug_assert!(pc.is_piece());
        self.attacks.remove_piece(&self.squares, sq, pc);
        self.squares[sq.index()] = Piece::EMPTY;
        self.attacks.unblock_rays_at(&self.squares, sq);
        self.board_key ^= zobrist_psq(pc, sq);
        self.note_removed(sq, pc);
        pc
    }

    /// 升 `sq` の駒を別の駒に置き換える（駒を取る手）
    fn swap_piece(&mut self, sq: Square, pc: Piece) -> Piece {
        let old = self.squares[sq.index()];
        debug_assert!(old.is_piece());
        self.attacks.remove_piece(&self.squares, sq, old);
        self.note_removed(sq, old);
        self.squares[sq.index()] = pc;
        self.attacks.add_piece(&self.squares, sq, pc);
        self.board_key ^= zobrist_psq(old, sq) ^ zobrist_psq(pc, sq);
        self.note_placed(sq, pc);
        old
    }

    #[inline]
    fn note_placed(&mut self, sq: Square, pc: Piece) {
        match pc.piece_type() {
            PieceType::Pawn => self.pawn_files[pc.color().index()] |= 1 << sq.file(),
            PieceType::King => self.king_square[pc.color().index()] = Some(sq),
            _ => {}
        }
    }

    #[inline]
    fn note_removed(&mut self, sq: Square, pc: Piece) {
        match pc.piece_type() {
            PieceType::Pawn => self.pawn_files[pc.color().index()] &= !(1 << sq.file()),
            PieceType::King => self.king_square[pc.color().index()] = None,
            _ => {}
        }
    }

    #[inline]
    fn debug_verify(&self) {
        #[cfg(any(debug_assertions, feature = "consistency-checks"))]
        {
            if let Err(e) = self.verify() {
                panic!("board consistency violated after ply {}: {e}", self.ply);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl PartialEq for Board {
    /// 配置・手駒・手番・手数・履歴が同じなら等しい（利きとキーは配置から決まる）
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.hands == other.hands
            && self.side_to_move == other.side_to_move
            && self.ply == other.ply
            && self.history == other.history
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ side: {:?}, ply: {}, key: {:#018x}", self.side_to_move, self.ply, self.key())?;
        for rank in 1..=9u8 {
            write!(f, "  ")?;
            for file in (1..=9u8).rev() {
                let pc = self.piece_on(Square::new(file, rank));
                if pc.is_piece() {
                    let sign = if pc.color() == Color::Black { '+' } else { '-' };
                    write!(f, "{sign}{:02}", pc.piece_type() as u8)?;
                } else {
                    write!(f, " . ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  hands: black {:?}, white {:?} }}", self.hands[0], self.hands[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.ply(), 0);
        assert_eq!(board.piece_on(Square::new(5, 9)), Piece::B_KING);
        assert_eq!(board.piece_on(Square::new(5, 1)), Piece::W_KING);
        assert_eq!(board.piece_on(Square::new(2, 8)), Piece::B_ROOK);
        assert_eq!(board.piece_on(Square::new(8, 2)), Piece::W_ROOK);
        assert_eq!(board.king_square(Color::Black), Some(Square::new(5, 9)));
        assert!(!board.in_check());
        for file in 1..=9 {
            assert!(board.has_pawn_on_file(Color::Black, file));
            assert!(board.has_pawn_on_file(Color::White, file));
        }
        assert!(board.verify().is_ok());
    }

    #[test]
    fn test_do_undo_simple_move() {
        let mut board = Board::new();
        let before = board.clone();
        let mv = board.make_move(Square::new(7, 7), Square::new(7, 6), false);
        board.do_move(mv);

        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.piece_on(Square::new(7, 6)), Piece::B_PAWN);
        assert!(board.piece_on(Square::new(7, 7)).is_empty());
        // 角道が開く
        assert_ne!(board.attack_mask(Color::Black, Square::new(3, 3)), 0);
        assert_ne!(board.key(), before.key());

        board.undo_move(mv);
        assert_eq!(board, before);
        assert_eq!(board.key(), before.key());
    }

    #[test]
    fn test_ply_counts_up_to_u16_limit() {
        let record = crate::board::PositionRecord { ply: u16::MAX - 1, ..crate::board::PositionRecord::hirate() };
        let mut board = Board::from_record(&record).unwrap();
        let mv = board.make_move(Square::new(7, 7), Square::new(7, 6), false);
        board.do_move(mv);
        assert_eq!(board.ply(), u16::MAX);
        board.undo_move(mv);
        assert_eq!(board.ply(), u16::MAX - 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "ply limit")]
    fn test_do_move_past_u16_limit_panics() {
        let record = crate::board::PositionRecord { ply: u16::MAX, ..crate::board::PositionRecord::hirate() };
        let mut board = Board::from_record(&record).unwrap();
        let mv = board.make_move(Square::new(7, 7), Square::new(7, 6), false);
        board.do_move(mv);
    }

    #[test]
    fn test_bishop_exchange_updates_hands() {
        let mut board = Board::new();
        let mv = board.make_move(Square::new(7, 7), Square::new(7, 6), false);
        board.do_move(mv);
        let mv = board.make_move(Square::new(3, 3), Square::new(3, 4), false);
        board.do_move(mv);

        let capture = board.make_move(Square::new(8, 8), Square::new(2, 2), true);
        assert_eq!(capture.captured(), Piece::W_BISHOP);
        let before = board.clone();
        board.do_move(capture);
        assert_eq!(board.hand(Color::Black).count(PieceType::Bishop), 1);
        assert_eq!(board.piece_on(Square::new(2, 2)), Piece::B_HORSE);

        board.undo_move(capture);
        assert_eq!(board, before);
        assert_eq!(board.hand_key(), before.hand_key());
    }

    #[test]
    fn test_attackers_of() {
        let board = Board::new();
        // 7六には先手の 7七の歩だけが利く
        let attackers: Vec<_> = board.attackers_of(Square::new(7, 6), Color::Black).collect();
        assert_eq!(attackers, vec![Square::new(7, 7)]);

        // 5八には 2八の飛、4九・6九の金、5九の玉が利く
        let mut attackers: Vec<_> = board.attackers_of(Square::new(5, 8), Color::Black).collect();
        attackers.sort();
        assert_eq!(
            attackers,
            vec![Square::new(2, 8), Square::new(4, 9), Square::new(5, 9), Square::new(6, 9)]
        );
    }
}
