//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the search can query them on hypothetical boards.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_LINES, check_winner, has_won};

use super::{Board, Outcome};

/// Terminal outcome of the board, if any.
///
/// Wins are checked before fullness, so a board completed by a winning
/// move is a win and not a draw.
pub fn outcome(board: &Board) -> Option<Outcome> {
    if let Some(winner) = check_winner(board) {
        return Some(Outcome::Winner(winner));
    }
    if is_draw(board) {
        return Some(Outcome::Draw);
    }
    None
}
