//! Tests for the board model and game rules.

use tictactoe_arena::games::tictactoe::rules::{self, WIN_LINES, check_winner, has_won, is_draw};
use tictactoe_arena::{Board, Mark, MoveError, Outcome, Position, Round, Square};

fn board_at(xs: &[usize], os: &[usize]) -> Board {
    let mut board = Board::new();
    for &i in xs {
        board = board.apply(Position::ALL[i], Mark::X).unwrap();
    }
    for &i in os {
        board = board.apply(Position::ALL[i], Mark::O).unwrap();
    }
    board
}

/// Visits every board reachable from the empty board by legal alternating play.
fn for_each_reachable(board: Board, to_move: Mark, visit: &mut impl FnMut(&Board)) {
    visit(&board);
    if rules::outcome(&board).is_some() {
        return;
    }
    for pos in board.empty_positions() {
        let child = board.apply(pos, to_move).unwrap();
        for_each_reachable(child, to_move.opponent(), visit);
    }
}

#[test]
fn test_apply_leaves_original_untouched() {
    let board = Board::new();
    let next = board.apply(Position::Center, Mark::X).unwrap();

    assert!(board.is_empty(Position::Center));
    assert_eq!(next.get(Position::Center), Square::Occupied(Mark::X));
    assert_eq!(next.empty_positions().len(), 8);
}

#[test]
fn test_apply_twice_at_same_index_fails() {
    let board = Board::new().apply(Position::TopRight, Mark::X).unwrap();
    assert_eq!(
        board.apply(Position::TopRight, Mark::O),
        Err(MoveError::SquareOccupied(Position::TopRight))
    );
}

#[test]
fn test_empty_positions_ascending() {
    let board = board_at(&[0, 8], &[4]);
    let empties: Vec<usize> = board.empty_positions().iter().map(|p| p.to_index()).collect();
    assert_eq!(empties, vec![1, 2, 3, 5, 6, 7]);
}

#[test]
fn test_every_win_line_wins() {
    for line in WIN_LINES {
        let xs: Vec<usize> = line.iter().map(|p| p.to_index()).collect();
        let board = board_at(&xs, &[]);
        assert!(has_won(&board, Mark::X), "line {:?}", line);
        assert!(!has_won(&board, Mark::O));
        assert_eq!(check_winner(&board), Some(Mark::X));
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = board_at(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
    assert!(is_draw(&board));
    assert_eq!(check_winner(&board), None);
    assert_eq!(rules::outcome(&board), Some(Outcome::Draw));
}

#[test]
fn test_win_on_last_square_is_not_draw() {
    // X completes the left column with the ninth mark.
    let board = board_at(&[0, 3, 6, 4, 8], &[1, 2, 5, 7]);
    assert!(is_draw(&board));
    assert_eq!(rules::outcome(&board), Some(Outcome::Winner(Mark::X)));
}

#[test]
fn test_no_reachable_board_has_two_winners() {
    let mut boards = 0usize;
    for_each_reachable(Board::new(), Mark::X, &mut |board: &Board| {
        boards += 1;
        assert!(!(has_won(board, Mark::X) && has_won(board, Mark::O)));
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        assert!(x == o || x == o + 1);
    });
    assert!(boards > 5478);
}

#[test]
fn test_round_replay_and_finish() {
    let mut round = Round::replay(&[
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::Center,
    ])
    .unwrap();
    assert_eq!(round.to_move(), Mark::X);
    assert_eq!(round.history().len(), 4);

    assert_eq!(
        round.place(Position::TopRight),
        Ok(Some(Outcome::Winner(Mark::X)))
    );
    assert_eq!(round.to_move(), Mark::X);
    assert_eq!(round.place(Position::BottomRight), Err(MoveError::GameOver));
}

#[test]
fn test_replay_rejects_repeated_square() {
    assert_eq!(
        Round::replay(&[Position::Center, Position::Center]).map(|_| ()),
        Err(MoveError::SquareOccupied(Position::Center))
    );
}

#[test]
fn test_position_labels_parse() {
    assert_eq!(Position::from_label_or_number("8"), Some(Position::BottomRight));
    assert_eq!(Position::from_label_or_number("Top-left"), Some(Position::TopLeft));
    assert_eq!(Position::from_index(9), None);
}
