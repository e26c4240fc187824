//! 局面の記録（PositionRecord）と盤面の構築

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::effect::AttackTable;
use super::zobrist::{hand_key, zobrist_psq, zobrist_side};
use super::Board;
use crate::config::RuleConfig;
use crate::error::PositionError;
use crate::types::{Color, Hand, Piece, PieceType, Square};

/// 局面の記録
///
/// 盤上の駒・手駒・手番・手数だけを持つ。`pieces` が空のときは平手の初期配置を表す。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub pieces: Vec<(Square, Piece)>,
    pub hands: [Hand; Color::NUM],
    pub side_to_move: Color,
    pub ply: u16,
}

/// 平手の初期配置（先手側、後手は 180 度回転）
const HIRATE_BLACK: [(u8, u8, PieceType); 20] = [
    (1, 9, PieceType::Lance),
    (2, 9, PieceType::Knight),
    (3, 9, PieceType::Silver),
    (4, 9, PieceType::Gold),
    (5, 9, PieceType::King),
    (6, 9, PieceType::Gold),
    (7, 9, PieceType::Silver),
    (8, 9, PieceType::Knight),
    (9, 9, PieceType::Lance),
    (2, 8, PieceType::Rook),
    (8, 8, PieceType::Bishop),
    (1, 7, PieceType::Pawn),
    (2, 7, PieceType::Pawn),
    (3, 7, PieceType::Pawn),
    (4, 7, PieceType::Pawn),
    (5, 7, PieceType::Pawn),
    (6, 7, PieceType::Pawn),
    (7, 7, PieceType::Pawn),
    (8, 7, PieceType::Pawn),
    (9, 7, PieceType::Pawn),
];

impl PositionRecord {
    /// 平手の初期局面（駒を明示した形）
    pub fn hirate() -> PositionRecord {
        PositionRecord { pieces: hirate_pieces(), ..PositionRecord::default() }
    }

    /// 駒の配置だけを指定した局面（手駒なし、先手番、0 手目）
    pub fn from_pieces(pieces: impl IntoIterator<Item = (Square, Piece)>) -> PositionRecord {
        PositionRecord { pieces: pieces.into_iter().collect(), ..PositionRecord::default() }
    }

    /// 手駒を設定する
    pub fn with_hand(mut self, color: Color, hand: Hand) -> PositionRecord {
        self.hands[color.index()] = hand;
        self
    }

    /// 手番を設定する
    pub fn with_side_to_move(mut self, color: Color) -> PositionRecord {
        self.side_to_move = color;
        self
    }
}

fn hirate_pieces() -> Vec<(Square, Piece)> {
    let mut pieces = Vec::with_capacity(40);
    for (file, rank, pt) in HIRATE_BLACK {
        let sq = Square::new(file, rank);
        pieces.push((sq, Piece::new(Color::Black, pt)));
        pieces.push((sq.inverse(), Piece::new(Color::White, pt)));
    }
    pieces
}

impl Board {
    /// 局面の記録から盤面を構築する
    pub fn from_record(record: &PositionRecord) -> Result<Board, PositionError> {
        Board::from_record_with_config(record, RuleConfig::default())
    }

    /// ルール設定を指定して局面の記録から盤面を構築する
    pub fn from_record_with_config(
        record: &PositionRecord,
        config: RuleConfig,
    ) -> Result<Board, PositionError> {
        let hirate;
        let pieces = if record.pieces.is_empty() {
            hirate = hirate_pieces();
            &hirate[..]
        } else {
            &record.pieces[..]
        };

        let mut board = Board::empty(config);
        let mut kings = [0usize; Color::NUM];
        let mut counts = [0u32; PieceType::HAND_NUM + 1];

        for &(sq, pc) in pieces {
            if !sq.is_on_board() {
                return Err(PositionError::InvalidSquare(sq.raw()));
            }
            if !pc.is_piece() {
                continue;
            }
            if board.squares[sq.index()].is_piece() {
                return Err(PositionError::DuplicateSquare(sq));
            }
            let color = pc.color();
            let pt = pc.piece_type();
            let rank = sq.relative_rank(color);
            if (pt.is_pawn_lance_knight() && rank == 1) || (pt == PieceType::Knight && rank == 2) {
                return Err(PositionError::DeadPiece { piece: pc, square: sq });
            }
            if pt == PieceType::Pawn && board.pawn_files[color.index()] & (1 << sq.file()) != 0 {
                return Err(PositionError::DoublePawn { color, file: sq.file() });
            }
            if pt == PieceType::King {
                kings[color.index()] += 1;
            } else {
                counts[pt.hand_index()] += 1;
            }
            board.squares[sq.index()] = pc;
            board.board_key ^= zobrist_psq(pc, sq);
            board.note_placed(sq, pc);
        }

        for color in Color::ALL {
            if kings[color.index()] > 1 {
                return Err(PositionError::KingCount { color, count: kings[color.index()] });
            }
            for pt in PieceType::HAND_PIECES {
                counts[pt.hand_index()] += record.hands[color.index()].count(pt);
            }
        }
        for pt in PieceType::HAND_PIECES {
            let count = counts[pt.hand_index()];
            if count > pt.total_count() {
                return Err(PositionError::TooManyPieces { piece_type: pt, count });
            }
        }

        board.attacks = AttackTable::scan(&board.squares);
        board.hands = record.hands;
        board.hand_key = hand_key(&board.hands);
        board.side_to_move = record.side_to_move;
        if record.side_to_move == Color::White {
            board.board_key ^= zobrist_side();
        }
        board.ply = record.ply;

        if board.in_check_color(!board.side_to_move) {
            return Err(PositionError::OpponentInCheck(!board.side_to_move));
        }

        board.initial = Arc::new(board.to_record());
        log::debug!(
            "board built: {} pieces, side {:?}, ply {}, key {:#018x}",
            pieces.len(),
            board.side_to_move,
            board.ply,
            board.key()
        );
        Ok(board)
    }

    /// 現在の局面の記録（駒は筋優先の升順）
    pub fn to_record(&self) -> PositionRecord {
        PositionRecord {
            pieces: Square::ALL
                .iter()
                .filter_map(|&sq| {
                    let pc = self.piece_on(sq);
                    pc.is_piece().then_some((sq, pc))
                })
                .collect(),
            hands: self.hands,
            side_to_move: self.side_to_move,
            ply: self.ply,
        }
    }
}
