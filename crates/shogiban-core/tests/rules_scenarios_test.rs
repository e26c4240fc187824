//! 反則と千日手の局面ごとのテスト

use shogiban_core::movegen::reference;
use shogiban_core::{
    Board, Color, GameStatus, GenType, Hand, IllegalMove, Move, Piece, PieceType, PositionRecord,
    RepetitionState, Square,
};

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank)
}

#[test]
fn test_double_pawn_drop_is_illegal() {
    // 先手の歩が 5七、と金が 3三。手に歩
    let record = PositionRecord::from_pieces([
        (sq(5, 9), Piece::B_KING),
        (sq(5, 1), Piece::W_KING),
        (sq(5, 7), Piece::B_PAWN),
        (sq(3, 3), Piece::B_PRO_PAWN),
    ])
    .with_hand(Color::Black, Hand::EMPTY.add(PieceType::Pawn));
    let board = Board::from_record(&record).unwrap();

    let on_pawn_file = board.make_drop(PieceType::Pawn, sq(5, 5));
    assert_eq!(board.legality(on_pawn_file), Err(IllegalMove::DoublePawn(5)));
    // と金は二歩の対象外
    assert!(board.is_legal_move(board.make_drop(PieceType::Pawn, sq(3, 5))));

    let moves = board.legal_moves(GenType::All);
    assert!(moves.iter().filter(|m| m.is_drop()).all(|m| m.to().file() != 5));
    // 5筋以外の 8 筋 × 2..9段 から 3三 を除く
    assert_eq!(moves.iter().filter(|m| m.is_drop()).count(), 8 * 8 - 1);
}

#[test]
fn test_bishop_exchange_fills_hands() {
    let mut board = Board::new();
    for (from, to) in [((7, 7), (7, 6)), ((3, 3), (3, 4)), ((8, 8), (2, 2))] {
        let mv = board.make_move(sq(from.0, from.1), sq(to.0, to.1), to == (2, 2));
        assert!(board.is_legal_move(mv), "{mv}");
        board.do_move(mv);
    }
    let mv = board.make_move(sq(3, 1), sq(2, 2), false);
    board.do_move(mv);
    assert_eq!(board.hand(Color::White).count(PieceType::Bishop), 1);
    assert_eq!(board.hand(Color::Black).count(PieceType::Bishop), 1);
    let drop = board.make_drop(PieceType::Bishop, sq(5, 5));
    assert!(board.is_legal_move(drop));
    assert_eq!(board.legality(board.make_drop(PieceType::Pawn, sq(5, 5))), Err(IllegalMove::NotInHand(PieceType::Pawn)));
}

#[test]
fn test_drop_pawn_mate_rejected_other_drop_accepted() {
    // 9一玉の逃げ道は後手自身の 8一桂・8二歩が塞ぐ。9二の歩には 8三の金が紐
    let record = PositionRecord::from_pieces([
        (sq(1, 9), Piece::B_KING),
        (sq(9, 1), Piece::W_KING),
        (sq(8, 1), Piece::W_KNIGHT),
        (sq(8, 2), Piece::W_PAWN),
        (sq(8, 3), Piece::B_GOLD),
    ])
    .with_hand(Color::Black, Hand::EMPTY.add(PieceType::Pawn).add(PieceType::Silver));
    let board = Board::from_record(&record).unwrap();

    let pawn = board.make_drop(PieceType::Pawn, sq(9, 2));
    let silver = board.make_drop(PieceType::Silver, sq(9, 2));
    assert!(board.is_check_move(pawn));
    assert_eq!(board.legality(pawn), Err(IllegalMove::PawnDropMate(sq(9, 2))));
    assert!(board.is_legal_move(silver));

    let moves = board.legal_moves(GenType::All);
    assert!(!moves.contains(pawn));
    assert!(moves.contains(silver));
    let reference = reference::legal_moves(&board);
    assert!(!reference.contains(&pawn));
    assert!(reference.contains(&silver));

    // 銀を打つと詰み
    let mut board = board;
    board.do_move(silver);
    assert!(board.is_checkmate());
    assert_eq!(board.game_status(), GameStatus::Checkmate { winner: Color::Black });
}

#[test]
fn test_pawn_drop_check_that_can_be_captured_is_legal() {
    // 8三の金がないので玉で歩を取れる
    let record = PositionRecord::from_pieces([
        (sq(1, 9), Piece::B_KING),
        (sq(9, 1), Piece::W_KING),
        (sq(8, 1), Piece::W_KNIGHT),
        (sq(8, 2), Piece::W_PAWN),
    ])
    .with_hand(Color::Black, Hand::EMPTY.add(PieceType::Pawn));
    let board = Board::from_record(&record).unwrap();
    let pawn = board.make_drop(PieceType::Pawn, sq(9, 2));
    assert!(board.is_check_move(pawn));
    assert!(board.is_legal_move(pawn));
}

#[test]
fn test_repetition_detected_on_fourth_occurrence() {
    let mut board = Board::new();
    let cycle = [
        board.make_move(sq(5, 9), sq(5, 8), false),
        board.make_move(sq(5, 1), sq(5, 2), false),
        Move::new_move(sq(5, 8), sq(5, 9), false, Piece::EMPTY),
        Move::new_move(sq(5, 2), sq(5, 1), false, Piece::EMPTY),
    ];
    for ply in 0..12 {
        assert_eq!(board.repetition_state(), RepetitionState::None, "ply {ply}");
        assert_eq!(board.game_status(), GameStatus::InProgress);
        let mv = cycle[ply % 4];
        assert!(board.is_legal_move(mv));
        board.do_move(mv);
    }
    assert_eq!(board.ply(), 12);
    assert_eq!(board.repetition_state(), RepetitionState::Draw);
    assert_eq!(board.game_status(), GameStatus::Sennichite);
    assert!(board.is_legal_move(Move::REPETITION_CLAIM));
    assert!(!board.is_legal_move(Move::PERPETUAL_CHECK_CLAIM));
}

#[test]
fn test_perpetual_check() {
    // 先手の飛車が 9二 と 9一 を往復して王手をかけ続け、後手玉は 5一 と 5二 を往復する
    let record = PositionRecord::from_pieces([
        (sq(1, 9), Piece::B_KING),
        (sq(5, 1), Piece::W_KING),
        (sq(9, 2), Piece::B_ROOK),
    ]);
    let mut board = Board::from_record(&record).unwrap();
    let cycle = [
        Move::new_move(sq(9, 2), sq(9, 1), false, Piece::EMPTY),
        Move::new_move(sq(5, 1), sq(5, 2), false, Piece::EMPTY),
        Move::new_move(sq(9, 1), sq(9, 2), false, Piece::EMPTY),
        Move::new_move(sq(5, 2), sq(5, 1), false, Piece::EMPTY),
    ];
    for ply in 0..12 {
        let mv = cycle[ply % 4];
        assert!(board.is_legal_move(mv), "ply {ply}: {mv}");
        if ply % 2 == 0 {
            assert!(board.is_check_move(mv));
        }
        board.do_move(mv);
    }
    // 先手番: 王手をかけ続けた側
    assert_eq!(board.repetition_state(), RepetitionState::Lose);
    assert_eq!(board.game_status(), GameStatus::PerpetualCheck { winner: Color::White });

    // 後手番: 王手をかけられ続けた側
    board.do_move(cycle[0]);
    assert!(board.in_check());
    assert_eq!(board.repetition_state(), RepetitionState::Win);
    assert!(board.is_legal_move(Move::PERPETUAL_CHECK_CLAIM));
    assert_eq!(board.game_status(), GameStatus::PerpetualCheck { winner: Color::White });
}

#[test]
fn test_superior_position() {
    // 先手が歩を取り、後手が同じ升に歩を打ち直すと、盤面は元に戻り先手の手駒だけ歩 1 枚多い
    let record = PositionRecord::from_pieces([
        (sq(1, 9), Piece::B_KING),
        (sq(9, 1), Piece::W_KING),
        (sq(5, 5), Piece::B_ROOK),
        (sq(5, 3), Piece::W_PAWN),
        (sq(4, 1), Piece::W_GOLD),
    ])
    .with_hand(Color::White, Hand::EMPTY.add(PieceType::Pawn));
    let mut board = Board::from_record(&record).unwrap();
    let moves = [
        board.make_move(sq(5, 5), sq(5, 3), false),
        Move::new_move(sq(4, 1), sq(4, 2), false, Piece::EMPTY),
        Move::new_move(sq(5, 3), sq(5, 4), false, Piece::EMPTY),
        Move::new_drop(PieceType::Pawn, sq(5, 3)),
        Move::new_move(sq(5, 4), sq(5, 5), false, Piece::EMPTY),
        Move::new_move(sq(4, 2), sq(4, 1), false, Piece::EMPTY),
    ];
    for mv in moves {
        assert!(board.is_legal_move(mv), "{mv}");
        assert_ne!(board.repetition_state(), RepetitionState::Superior);
        board.do_move(mv);
    }
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.hand(Color::Black).count(PieceType::Pawn), 1);
    assert_eq!(board.repetition_state(), RepetitionState::Superior);
    assert_eq!(board.game_status(), GameStatus::InProgress);
}
