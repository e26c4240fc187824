//! 利きテーブル（AttackTable）の差分更新
//!
//! 各手番・各升に 32bit のマスクを持つ。
//! - bit d (0..10): 升 `sq - offset[color][d]` にある `color` の駒が方向 d に 1 歩の利きを持つ
//! - bit 16+d: `color` の飛び駒の方向 d の利きがこの升に届いている。
//!   飛び駒から見て最初に駒（敵味方問わず）がある升まで、その升を含めて立つ。
//!
//! 盤外の升には常にビットが立たない。差分更新は 4 つの基本操作の組み合わせで行う。
//!
//! | 操作 | 前提 | 内容 |
//! |---|---|---|
//! | `add_piece` | 駒を置いた直後 | 駒自身の利きを立てる |
//! | `remove_piece` | 駒を取り除く直前 | 駒自身の利きを消す |
//! | `block_rays_at` | 空き升に駒を置いた直後、`add_piece` の前 | その升を通る飛び利きを升の先で切る |
//! | `unblock_rays_at` | 升を空けた直後 | その升で止まっていた飛び利きを次の駒まで延ばす |
//!
//! 利きはビットであって本数ではないので、`block_rays_at` は必ず `add_piece` より先に呼ぶ。
//! 逆にすると、置いた駒と同じ方向の飛び利きを後ろの味方の飛び駒が持っていた場合に
//! 置いた駒のビットまで消えてしまう。

use crate::types::{Color, Direction, DirectionIter, Piece, SLIDE_BITS, SLIDE_SHIFT, Square};

/// 盤面配列の読み出し
///
/// 局面を書き換えずに「この手を指したら」を調べるため、`Overlay` でも同じ走査を使う。
pub(crate) trait PieceAt {
    fn piece_at(&self, sq: Square) -> Piece;
}

impl PieceAt for [Piece; Square::NUM] {
    #[inline]
    fn piece_at(&self, sq: Square) -> Piece {
        self[sq.index()]
    }
}

/// 盤面配列に最大 3 升の仮の書き換えを重ねたビュー
pub(crate) struct Overlay<'a> {
    base: &'a [Piece; Square::NUM],
    overrides: [(Square, Piece); 3],
    len: usize,
}

impl<'a> Overlay<'a> {
    #[inline]
    pub(crate) fn new(base: &'a [Piece; Square::NUM]) -> Self {
        Overlay { base, overrides: [(Square::SQ_11, Piece::EMPTY); 3], len: 0 }
    }

    /// 升の内容を仮に書き換える（同じ升への再設定は後勝ち）
    #[inline]
    pub(crate) fn with(mut self, sq: Square, pc: Piece) -> Self {
        debug_assert!(self.len < self.overrides.len());
        self.overrides[self.len] = (sq, pc);
        self.len += 1;
        self
    }
}

impl PieceAt for Overlay<'_> {
    #[inline]
    fn piece_at(&self, sq: Square) -> Piece {
        let mut i = self.len;
        while i > 0 {
            i -= 1;
            if self.overrides[i].0 == sq {
                return self.overrides[i].1;
            }
        }
        self.base[sq.index()]
    }
}

/// 升 `sq` に対する `color` の利きマスクを盤面から直接求める
pub(crate) fn scan_square<P: PieceAt + ?Sized>(view: &P, sq: Square, color: Color) -> u32 {
    let mut mask = 0;
    for d in Direction::ALL {
        let offset = d.offset(color);
        let src = sq.offset(-offset);
        let pc = view.piece_at(src);
        if pc.is_color(color) && pc.can_step(d) {
            mask |= d.step_bit();
        }
    }
    for d in Direction::KING {
        let offset = d.offset(color);
        let mut src = sq.offset(-offset);
        loop {
            let pc = view.piece_at(src);
            if pc.is_wall() {
                break;
            }
            if pc.is_piece() {
                if pc.is_color(color) && pc.can_slide(d) {
                    mask |= d.slide_bit();
                }
                break;
            }
            src = src.offset(-offset);
        }
    }
    mask
}

/// 升 `sq` が `color` の駒に利かされているか（盤面の直接走査）
pub(crate) fn is_attacked_by<P: PieceAt + ?Sized>(view: &P, sq: Square, color: Color) -> bool {
    scan_square(view, sq, color) != 0
}

/// 手番・升ごとの利きマスク
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct AttackTable {
    masks: [[u32; Square::NUM]; Color::NUM],
}

impl AttackTable {
    pub(crate) fn new() -> Self {
        AttackTable { masks: [[0; Square::NUM]; Color::NUM] }
    }

    /// 盤面から全升の利きを求める
    pub(crate) fn scan(squares: &[Piece; Square::NUM]) -> Self {
        let mut table = AttackTable::new();
        for color in Color::ALL {
            for sq in Square::ALL {
                table.masks[color.index()][sq.index()] = scan_square(squares, sq, color);
            }
        }
        table
    }

    #[inline]
    pub(crate) fn get(&self, color: Color, sq: Square) -> u32 {
        self.masks[color.index()][sq.index()]
    }

    /// `sq` に置かれた駒 `pc` の利きを立てる
    pub(crate) fn add_piece(&mut self, squares: &[Piece; Square::NUM], sq: Square, pc: Piece) {
        self.apply_piece(squares, sq, pc, true);
    }

    /// `sq` にある駒 `pc` の利きを消す
    pub(crate) fn remove_piece(&mut self, squares: &[Piece; Square::NUM], sq: Square, pc: Piece) {
        self.apply_piece(squares, sq, pc, false);
    }

    fn apply_piece(&mut self, squares: &[Piece; Square::NUM], sq: Square, pc: Piece, set: bool) {
        let color = pc.color();
        let pt = pc.piece_type();
        let masks = &mut self.masks[color.index()];

        for d in DirectionIter::new(pt.step_mask() as u32) {
            let to = sq.offset(d.offset(color));
            if squares[to.index()].is_wall() {
                continue;
            }
            if set {
                masks[to.index()] |= d.step_bit();
            } else {
                masks[to.index()] &= !d.step_bit();
            }
        }

        for d in DirectionIter::new(pt.slide_mask() as u32) {
            let bit = d.slide_bit();
            let offset = d.offset(color);
            let mut to = sq.offset(offset);
            loop {
                let target = squares[to.index()];
                if target.is_wall() {
                    break;
                }
                if set {
                    masks[to.index()] |= bit;
                } else {
                    masks[to.index()] &= !bit;
                }
                if target.is_piece() {
                    break;
                }
                to = to.offset(offset);
            }
        }
    }

    /// 空き升だった `sq` に駒が置かれたので、`sq` を通過していた飛び利きを `sq` で止める
    pub(crate) fn block_rays_at(&mut self, squares: &[Piece; Square::NUM], sq: Square) {
        self.walk_rays_beyond(squares, sq, false);
    }

    /// `sq` が空いたので、`sq` で止まっていた飛び利きを次の駒まで延ばす
    pub(crate) fn unblock_rays_at(&mut self, squares: &[Piece; Square::NUM], sq: Square) {
        self.walk_rays_beyond(squares, sq, true);
    }

    fn walk_rays_beyond(&mut self, squares: &[Piece; Square::NUM], sq: Square, set: bool) {
        for color in Color::ALL {
            let masks = &mut self.masks[color.index()];
            let rays = (masks[sq.index()] & SLIDE_BITS) >> SLIDE_SHIFT;
            for d in DirectionIter::new(rays) {
                let bit = d.slide_bit();
                let offset = d.offset(color);
                let mut to = sq.offset(offset);
                loop {
                    let target = squares[to.index()];
                    if target.is_wall() {
                        break;
                    }
                    if set {
                        masks[to.index()] |= bit;
                    } else {
                        masks[to.index()] &= !bit;
                    }
                    if target.is_piece() {
                        break;
                    }
                    to = to.offset(offset);
                }
            }
        }
    }

    /// 盤外の升にビットが立っていないか
    pub(crate) fn first_wall_with_bits(&self) -> Option<Square> {
        (0..Square::NUM)
            .map(Square::from_index_unchecked)
            .filter(|sq| !sq.is_on_board())
            .find(|sq| Color::ALL.iter().any(|&c| self.get(c, *sq) != 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceType, STEP_BITS};

    fn empty_board() -> [Piece; Square::NUM] {
        let mut squares = [Piece::WALL; Square::NUM];
        for sq in Square::ALL {
            squares[sq.index()] = Piece::EMPTY;
        }
        squares
    }

    fn place(table: &mut AttackTable, squares: &mut [Piece; Square::NUM], sq: Square, pc: Piece) {
        squares[sq.index()] = pc;
        table.block_rays_at(squares, sq);
        table.add_piece(squares, sq, pc);
    }

    fn lift(table: &mut AttackTable, squares: &mut [Piece; Square::NUM], sq: Square) {
        let pc = squares[sq.index()];
        table.remove_piece(squares, sq, pc);
        squares[sq.index()] = Piece::EMPTY;
        table.unblock_rays_at(squares, sq);
    }

    #[test]
    fn test_rook_rays_on_empty_board() {
        let mut squares = empty_board();
        let mut table = AttackTable::new();
        place(&mut table, &mut squares, Square::SQ_55, Piece::B_ROOK);

        assert_eq!(
            table.get(Color::Black, Square::new(5, 1)),
            Direction::Up.slide_bit()
        );
        assert_eq!(
            table.get(Color::Black, Square::new(9, 5)),
            Direction::Left.slide_bit()
        );
        assert_eq!(table.get(Color::Black, Square::new(4, 4)), 0);
        assert_eq!(table.get(Color::White, Square::new(5, 1)), 0);
        assert!(table == AttackTable::scan(&squares));
    }

    #[test]
    fn test_blocker_truncates_and_reopens_ray() {
        let mut squares = empty_board();
        let mut table = AttackTable::new();
        place(&mut table, &mut squares, Square::new(5, 9), Piece::B_LANCE);
        place(&mut table, &mut squares, Square::new(5, 5), Piece::W_GOLD);

        // 駒がある升までは利き、その先には届かない
        assert_ne!(table.get(Color::Black, Square::new(5, 5)) & SLIDE_BITS, 0);
        assert_eq!(table.get(Color::Black, Square::new(5, 4)) & SLIDE_BITS, 0);
        assert!(table == AttackTable::scan(&squares));

        lift(&mut table, &mut squares, Square::new(5, 5));
        assert_ne!(table.get(Color::Black, Square::new(5, 1)) & SLIDE_BITS, 0);
        assert!(table == AttackTable::scan(&squares));
    }

    #[test]
    fn test_same_direction_slider_in_front_of_another() {
        // 香の前に同じ方向の飛び利きを持つ飛車を置く
        let mut squares = empty_board();
        let mut table = AttackTable::new();
        place(&mut table, &mut squares, Square::new(1, 9), Piece::B_LANCE);
        place(&mut table, &mut squares, Square::new(1, 6), Piece::B_ROOK);
        assert!(table == AttackTable::scan(&squares));
        assert_ne!(table.get(Color::Black, Square::new(1, 1)) & Direction::Up.slide_bit(), 0);

        lift(&mut table, &mut squares, Square::new(1, 6));
        assert!(table == AttackTable::scan(&squares));
        assert_ne!(table.get(Color::Black, Square::new(1, 1)) & Direction::Up.slide_bit(), 0);
    }

    #[test]
    fn test_step_bits_knight_and_white_orientation() {
        let mut squares = empty_board();
        let mut table = AttackTable::new();
        place(&mut table, &mut squares, Square::SQ_55, Piece::W_KNIGHT);
        assert_eq!(
            table.get(Color::White, Square::new(4, 7)),
            Direction::KnightLeft.step_bit()
        );
        assert_eq!(
            table.get(Color::White, Square::new(6, 7)),
            Direction::KnightRight.step_bit()
        );
        assert_eq!(table.get(Color::White, Square::new(5, 6)) & STEP_BITS, 0);
        assert!(table.first_wall_with_bits().is_none());
    }

    #[test]
    fn test_knight_near_edge_never_marks_walls() {
        let mut squares = empty_board();
        let mut table = AttackTable::new();
        place(&mut table, &mut squares, Square::SQ_11, Piece::new(Color::Black, PieceType::Knight));
        place(&mut table, &mut squares, Square::SQ_99, Piece::W_DRAGON);
        assert!(table.first_wall_with_bits().is_none());
        assert!(table == AttackTable::scan(&squares));
    }

    #[test]
    fn test_overlay_scan() {
        let mut squares = empty_board();
        squares[Square::new(5, 9).index()] = Piece::B_ROOK;
        let target = Square::new(5, 1);
        assert!(is_attacked_by(&squares, target, Color::Black));

        let blocked = Overlay::new(&squares).with(Square::new(5, 5), Piece::W_PAWN);
        assert!(!is_attacked_by(&blocked, target, Color::Black));

        let moved = Overlay::new(&squares)
            .with(Square::new(5, 9), Piece::EMPTY)
            .with(Square::new(4, 9), Piece::B_ROOK);
        assert!(!is_attacked_by(&moved, target, Color::Black));
        assert!(is_attacked_by(&moved, Square::new(4, 1), Color::Black));
    }
}
