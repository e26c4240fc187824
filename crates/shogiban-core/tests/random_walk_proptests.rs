//! ランダムな対局を進めながら、差分更新と指し手生成を総当たりの結果と突き合わせる

use proptest::prelude::*;
use rand::RngCore;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use shogiban_core::movegen::reference;
use shogiban_core::{Board, GenType, Move, PositionRecord};

const WALK_PLIES: usize = 48;

fn sorted(mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|m| m.raw());
    moves
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 12, .. ProptestConfig::default() })]

    #[test]
    fn prop_generation_matches_reference(seed in any::<u64>()) {
        let mut board = Board::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        for _ in 0..WALK_PLIES {
            let generated = board.legal_moves(GenType::AllWithUnpromotions);
            let expected = sorted(reference::legal_moves(&board));
            prop_assert_eq!(sorted(generated.iter().copied().collect()), expected);

            for &mv in &generated {
                prop_assert!(board.is_legal_move(mv), "generated move {} rejected", mv);
            }
            if generated.is_empty() {
                prop_assert_eq!(board.is_checkmate(), board.in_check());
                break;
            }

            let mv = generated[(rng.next_u32() as usize) % generated.len()];
            prop_assert_eq!(board.is_check_move(mv), {
                let mut next = board.clone();
                next.do_move(mv);
                next.in_check()
            });
            board.do_move(mv);
            prop_assert!(board.verify().is_ok(), "{:?}", board.verify());
        }
    }

    #[test]
    fn prop_do_undo_round_trip(seed in any::<u64>()) {
        let mut board = Board::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut played = Vec::new();

        for _ in 0..WALK_PLIES {
            let moves = board.legal_moves(GenType::All);
            if moves.is_empty() {
                break;
            }
            let mv = moves[(rng.next_u32() as usize) % moves.len()];
            let before = board.clone();
            board.do_move(mv);
            board.undo_move(mv);
            prop_assert_eq!(&board, &before);
            prop_assert_eq!(board.key(), before.key());
            board.do_move(mv);
            played.push(mv);
        }

        // 履歴の再生・スナップショット・局面記録のいずれからも同じ盤面に戻る
        let replayed = Board::replay(&PositionRecord::hirate(), &played).unwrap();
        prop_assert_eq!(&replayed, &board);

        let restored = Board::from_snapshot(&board.to_snapshot()).unwrap();
        prop_assert_eq!(&restored, &board);
        prop_assert_eq!(restored.key(), board.key());

        let from_record = Board::from_record(&board.to_record()).unwrap();
        prop_assert_eq!(from_record.key(), board.key());

        for &mv in played.iter().rev() {
            board.undo_move(mv);
        }
        prop_assert_eq!(&board, &Board::new());
    }

    #[test]
    fn prop_category_filters_partition_all(seed in any::<u64>()) {
        let mut board = Board::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        for _ in 0..WALK_PLIES {
            let all = board.legal_moves(GenType::All);
            if all.is_empty() {
                break;
            }
            let captures = board.legal_moves(GenType::Captures);
            let non_captures = board.legal_moves(GenType::NonCaptures);
            prop_assert_eq!(captures.len() + non_captures.len(), all.len());
            prop_assert!(captures.iter().all(|m| m.is_capture() && all.contains(*m)));
            prop_assert!(non_captures.iter().all(|m| !m.is_capture() && all.contains(*m)));

            let moves_only = board.legal_moves(GenType::MovesOnly);
            prop_assert_eq!(moves_only.len(), all.iter().filter(|m| !m.is_drop()).count());

            let pro_plus = board.legal_moves(GenType::CapturesProPlus);
            prop_assert!(pro_plus.iter().all(|m| m.is_capture() || m.is_promotion()));

            let tactical = board.legal_moves(GenType::Tactical);
            for &mv in &all {
                let mut next = board.clone();
                next.do_move(mv);
                let gives_check = next.in_check();
                prop_assert_eq!(board.is_check_move(mv), gives_check, "{}", mv);
                let expected = mv.is_capture() || mv.is_promotion() || gives_check;
                prop_assert_eq!(tactical.contains(mv), expected, "{}", mv);
            }

            let mv = all[(rng.next_u32() as usize) % all.len()];
            board.do_move(mv);
        }
    }
}
