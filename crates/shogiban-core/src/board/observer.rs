//! 盤面の変更通知（BoardObserver）

use super::Board;
use crate::types::Move;

/// `do_move` / `undo_move` の前後に同期的に呼ばれる通知先
///
/// 通知には `&Board` しか渡らないため、通知の中から盤面を書き換えることはできない。
/// 盤面は `Send + Sync` なので、通知先も同じ制約を持つ。
pub trait BoardObserver: Send + Sync {
    /// 指し手を適用する直前
    fn before_move(&self, _board: &Board, _mv: Move) {}

    /// 指し手を適用した直後
    fn after_move(&self, _board: &Board, _mv: Move) {}

    /// 指し手を戻す直前
    fn before_undo(&self, _board: &Board, _mv: Move) {}

    /// 指し手を戻した直後
    fn after_undo(&self, _board: &Board, _mv: Move) {}
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::types::Square;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(&'static str, Move, u16)>>,
    }

    impl BoardObserver for Recorder {
        fn before_move(&self, board: &Board, mv: Move) {
            self.events.lock().unwrap().push(("before_move", mv, board.ply()));
        }
        fn after_move(&self, board: &Board, mv: Move) {
            self.events.lock().unwrap().push(("after_move", mv, board.ply()));
        }
        fn before_undo(&self, board: &Board, mv: Move) {
            self.events.lock().unwrap().push(("before_undo", mv, board.ply()));
        }
        fn after_undo(&self, board: &Board, mv: Move) {
            self.events.lock().unwrap().push(("after_undo", mv, board.ply()));
        }
    }

    #[test]
    fn test_observer_sees_each_phase_in_order() {
        let recorder = Arc::new(Recorder::default());
        let mut board = Board::new().with_observer(recorder.clone());
        let mv = board.make_move(Square::new(7, 7), Square::new(7, 6), false);

        board.do_move(mv);
        board.undo_move(mv);

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                ("before_move", mv, 0),
                ("after_move", mv, 1),
                ("before_undo", mv, 1),
                ("after_undo", mv, 0),
            ]
        );
    }

    #[test]
    fn test_cloned_board_shares_observer() {
        let recorder = Arc::new(Recorder::default());
        let board = Board::new().with_observer(recorder.clone());
        let mut clone = board.clone();
        let mv = clone.make_move(Square::new(2, 7), Square::new(2, 6), false);
        clone.do_move(mv);
        assert_eq!(recorder.events.lock().unwrap().len(), 2);
    }
}
