//! End-to-end tests driving a session through its public API

use zonetris::board::{BOARD_HEIGHT, BOARD_WIDTH};
use zonetris::{
    Action, Board, Cell, GameState, PieceColor, SequenceRandomizer, Session, Shape, TickEvent,
    Zone,
};

fn scripted(shapes: Vec<Shape>, colors: Vec<PieceColor>) -> Session<SequenceRandomizer> {
    Session::with_randomizer(SequenceRandomizer::new(shapes, colors))
}

/// Run the driver until something other than gravity happens
fn run_until_lock(session: &mut Session<SequenceRandomizer>) -> TickEvent {
    for _ in 0..10_000 {
        match session.advance() {
            TickEvent::Idle | TickEvent::Fell => continue,
            event => return event,
        }
    }
    panic!("piece never locked");
}

fn slide_left(session: &mut Session<SequenceRandomizer>) {
    while session.try_move_left() {}
}

#[test]
fn red_straight_piece_clears_left_zone() {
    let mut session = scripted(vec![Shape::I, Shape::O], vec![PieceColor::Red]);
    slide_left(&mut session);
    assert_eq!(session.active().unwrap().col, 0);

    let event = run_until_lock(&mut session);

    assert_eq!(event, TickEvent::Locked { lines_cleared: 1, points: 100 });
    assert_eq!(session.lines(), 1);
    assert_eq!(session.snapshot().score, 100);
    assert!(session.board().is_empty());
    assert_eq!(session.efficiency(), 100);
}

#[test]
fn red_segment_completes_before_clearing() {
    let mut board = Board::new();
    board.lock_piece(&[(0, 19), (1, 19), (2, 19), (3, 19)], PieceColor::Red);
    for col in 0..4 {
        assert_eq!(board.get(col, 19), Some(Cell::Red));
    }
    assert!(board.is_zone_segment_complete(19, Zone::Left));
    assert_eq!(board.clear_zone_segments(19, 1), 1);
    assert!(board.is_empty());
}

#[test]
fn blue_straight_piece_in_red_zone_turns_gray() {
    let mut session = scripted(vec![Shape::I, Shape::O], vec![PieceColor::Blue]);
    slide_left(&mut session);

    let event = run_until_lock(&mut session);

    // Anchored on row 19: round(19 / 4) = 5, the ideal landing bonus
    assert_eq!(event, TickEvent::Locked { lines_cleared: 0, points: 5 });
    for col in 0..4 {
        assert_eq!(session.board().get(col, 19), Some(Cell::Gray));
    }
    assert!(!session.board().is_zone_segment_complete(19, Zone::Left));
    assert_eq!(session.lines(), 0);
    assert_eq!(session.score().bad_pieces, 0.0);
    assert_eq!(session.score().good_pieces, 1.0);
}

#[test]
fn shallow_wrong_zone_landing_costs_efficiency() {
    let mut board = Board::new();
    for row in 10..BOARD_HEIGHT as i32 {
        board.set(0, row, Cell::Gray);
    }
    let mut session = Session::with_board(
        board,
        SequenceRandomizer::new(vec![Shape::I], vec![PieceColor::Blue]),
    );
    slide_left(&mut session);

    let event = run_until_lock(&mut session);

    // Anchored on row 9: round(9 / 4) = 2, penalty (5 - 2)^2
    assert_eq!(event, TickEvent::Locked { lines_cleared: 0, points: 2 });
    assert_eq!(session.score().bad_pieces, 9.0);
    assert_eq!(session.efficiency(), 0);
}

#[test]
fn commands_are_ignored_when_illegal() {
    let mut session = scripted(vec![Shape::I], vec![PieceColor::Green]);
    slide_left(&mut session);
    let before = session.snapshot();
    assert!(!session.try_move_left());
    assert!(!session.apply(Action::MoveLeft));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn rotation_cycles_back_to_start() {
    let mut session = scripted(vec![Shape::T], vec![PieceColor::Green]);
    for _ in 0..3 {
        session.try_move_down();
    }
    let start = session.snapshot().active.unwrap().cells;
    for _ in 0..Shape::T.rotation_count() {
        assert!(session.try_rotate());
    }
    assert_eq!(session.active().unwrap().rotation, 0);
    assert_eq!(session.snapshot().active.unwrap().cells, start);
}

#[test]
fn stacking_to_the_top_ends_the_game() {
    let mut session = scripted(vec![Shape::I], vec![PieceColor::Red]);
    let mut locks = 0;
    loop {
        session.try_rotate();
        match run_until_lock(&mut session) {
            TickEvent::Locked { .. } => locks += 1,
            TickEvent::ToppedOut => break,
            other => panic!("unexpected {:?}", other),
        }
        assert!(locks < 10, "board never filled");
    }

    assert_eq!(session.state(), GameState::GameOver);
    let snapshot = session.snapshot();
    assert!(snapshot.active.is_none());
    assert!(
        snapshot
            .board
            .iter()
            .flatten()
            .all(|&cell| cell == Cell::Empty || cell == Cell::Gray)
    );
    assert_eq!(session.advance(), TickEvent::Halted);
}

#[test]
fn reset_restores_a_fresh_game() {
    let mut session = scripted(vec![Shape::O, Shape::S, Shape::J], vec![PieceColor::Red]);
    for _ in 0..3 {
        run_until_lock(&mut session);
    }
    assert!(!session.board().is_empty());

    session.reset();

    let snapshot = session.snapshot();
    assert!(snapshot.board.iter().flatten().all(|cell| cell.is_empty()));
    assert_eq!(snapshot.board.len(), BOARD_HEIGHT);
    assert_eq!(snapshot.board[0].len(), BOARD_WIDTH);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.lines, 0);
    assert_eq!(snapshot.efficiency, 100);
    assert_eq!(snapshot.tick_cycle, 30);
    assert_eq!(snapshot.state, GameState::Falling);
    assert_eq!(snapshot.active.unwrap().cells.iter().filter(|c| c.1 < 0).count(), 4);
}

#[test]
fn seeded_sessions_are_reproducible() {
    let mut a = Session::with_seed(1234);
    let mut b = Session::with_seed(1234);
    for _ in 0..2_000 {
        assert_eq!(a.advance(), b.advance());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
