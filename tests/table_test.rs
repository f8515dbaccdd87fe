//! Tests for the async table driver.

use std::time::Duration;
use tictactoe_arena::{
    Difficulty, GameMode, Mark, Outcome, Position, Session, SessionError, Table, TableEvent, Turn,
};
use tokio::sync::mpsc;

fn drain(rx: &mut mpsc::UnboundedReceiver<TableEvent>) -> Vec<TableEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_opponent_reply_events_in_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = Session::new(GameMode::Opponent, Difficulty::Hard);
    let mut table = Table::new(session, 5, Duration::from_millis(1), tx);

    let turn = table.cell_selected(4).await.unwrap();
    assert_eq!(turn, Turn::Continue { next: Mark::X });
    assert_eq!(
        drain(&mut rx),
        vec![
            TableEvent::MoveMade {
                mark: Mark::X,
                position: Position::Center
            },
            TableEvent::OpponentThinking,
            TableEvent::MoveMade {
                mark: Mark::O,
                position: Position::TopLeft
            },
        ]
    );
    assert!(!table.session().is_thinking());
}

#[tokio::test]
async fn test_friend_mode_game_over_event() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = Session::new(GameMode::Friend, Difficulty::Easy);
    let mut table = Table::new(session, 0, Duration::ZERO, tx);

    for cell in [0, 3, 1, 4] {
        table.cell_selected(cell).await.unwrap();
    }
    drain(&mut rx);

    let turn = table.cell_selected(2).await.unwrap();
    assert_eq!(turn, Turn::Finished(Outcome::Winner(Mark::X)));
    assert_eq!(
        drain(&mut rx).last(),
        Some(&TableEvent::GameOver {
            outcome: Outcome::Winner(Mark::X),
            text: "Player X wins!".to_string()
        })
    );

    assert_eq!(table.cell_selected(5).await, Err(SessionError::GameOver));
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_resets_emit_reset_event() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut table = Table::new(Session::default(), 3, Duration::ZERO, tx);

    table.cell_selected(0).await.unwrap();
    drain(&mut rx);

    table.request_new_game();
    table.set_difficulty(Difficulty::Hard);
    table.request_score_reset();
    table.set_mode(GameMode::Friend);

    assert_eq!(drain(&mut rx), vec![TableEvent::Reset; 4]);
    assert_eq!(table.session().mode(), GameMode::Friend);
    assert_eq!(table.session().difficulty(), Difficulty::Hard);
    assert_eq!(table.session().board().empty_positions().len(), 9);
}

#[tokio::test]
async fn test_dropped_receiver_does_not_stop_play() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let mut table = Table::new(Session::default(), 9, Duration::ZERO, tx);

    assert!(table.cell_selected(4).await.is_ok());
    assert_eq!(table.session().round().history().len(), 2);
    assert_eq!(table.seed(), 9);
}

#[tokio::test]
async fn test_dropped_wait_leaves_reply_resumable() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let session = Session::new(GameMode::Opponent, Difficulty::Hard);
    let mut table = Table::new(session, 5, Duration::from_millis(200), tx);

    let waited = tokio::time::timeout(Duration::from_millis(10), table.cell_selected(4)).await;
    assert!(waited.is_err());
    assert!(table.is_pending());
    assert!(table.session().is_thinking());
    assert_eq!(table.select(0), Err(SessionError::OpponentThinking));

    let reply = table.resolve_pending().await.unwrap().unwrap();
    assert_eq!(reply.position, Position::TopLeft);
    assert_eq!(reply.turn, Turn::Continue { next: Mark::X });
    assert!(!table.is_pending());
    assert!(table.select(8).is_ok());
}

#[tokio::test]
async fn test_reset_while_thinking_cancels_reply() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = Session::new(GameMode::Opponent, Difficulty::Hard);
    let mut table = Table::new(session, 5, Duration::from_secs(60), tx);

    assert!(matches!(table.select(4), Ok(Turn::OpponentPending(_))));
    table.set_mode(GameMode::Friend);

    assert!(!table.is_pending());
    assert_eq!(table.resolve_pending().await, Ok(None));
    assert_eq!(table.session().board().empty_positions().len(), 9);
    assert_eq!(table.session().to_move(), Mark::X);
    assert_eq!(
        drain(&mut rx),
        vec![
            TableEvent::MoveMade {
                mark: Mark::X,
                position: Position::Center
            },
            TableEvent::OpponentThinking,
            TableEvent::Reset,
        ]
    );

    // Friend mode: the next click is O's own move, not an opponent reply.
    assert_eq!(table.select(0), Ok(Turn::Continue { next: Mark::O }));
    assert_eq!(table.select(1), Ok(Turn::Continue { next: Mark::X }));
}
