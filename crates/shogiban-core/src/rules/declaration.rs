//! 入玉宣言

use crate::board::Board;
use crate::config::EnteringKingRule;
use crate::types::{Color, Direction, PieceType, Square};

/// 宣言に必要な敵陣の駒数（玉を除く）
const MIN_PIECES_IN_ZONE: u32 = 10;

impl Board {
    /// 手番側が入玉宣言で勝てるか（設定のルールに従う）
    pub fn can_declare_win(&self) -> bool {
        match self.config().entering_king {
            EnteringKingRule::None => false,
            EnteringKingRule::Csa24 => self.declaration_points_reached(31, 31),
            EnteringKingRule::Csa27 => self.declaration_points_reached(28, 27),
            EnteringKingRule::TryRule => self.can_reach_try_square(),
        }
    }

    /// 点数法の宣言条件
    ///
    /// 玉が敵陣にいて王手されておらず、玉以外の駒が敵陣に 10 枚以上あり、
    /// 敵陣の駒と手駒の点数（大駒 5 点、小駒 1 点）が先手 `black`、後手 `white` 以上。
    fn declaration_points_reached(&self, black: u32, white: u32) -> bool {
        let us = self.side_to_move();
        let Some(ksq) = self.king_square(us) else {
            return false;
        };
        if !ksq.in_promotion_zone(us) || self.in_check() {
            return false;
        }

        let mut pieces = 0;
        let mut points = 0;
        for sq in Square::ALL {
            let pc = self.piece_on(sq);
            if sq == ksq || !pc.is_color(us) || !sq.in_promotion_zone(us) {
                continue;
            }
            pieces += 1;
            points += pc.piece_type().declaration_points();
        }
        if pieces < MIN_PIECES_IN_ZONE {
            return false;
        }

        let hand = self.hand(us);
        points += PieceType::HAND_PIECES
            .iter()
            .map(|&pt| hand.count(pt) * pt.declaration_points())
            .sum::<u32>();

        let required = match us {
            Color::Black => black,
            Color::White => white,
        };
        points >= required
    }

    /// トライルール: 相手玉の初期位置へ玉が合法に移動できるか
    fn can_reach_try_square(&self) -> bool {
        let us = self.side_to_move();
        let Some(ksq) = self.king_square(us) else {
            return false;
        };
        let target = match us {
            Color::Black => Square::new(5, 1),
            Color::White => Square::new(5, 9),
        };
        Direction::KING.iter().any(|d| ksq.offset(d.offset(us)) == target)
            && !self.piece_on(target).is_color(us)
            && self.is_legal_move(self.make_move(ksq, target, false))
    }
}
