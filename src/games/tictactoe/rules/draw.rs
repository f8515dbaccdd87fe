//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Square};

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Checks if the board is drawn.
///
/// Only fullness is examined here. Callers check for a winner first, as
/// [`super::outcome`] does; a full board that also holds a line is a win.
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
}
