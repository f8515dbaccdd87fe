//! Monotonic board invariant: squares never change once set.

use super::super::{Board, Round};
use super::Invariant;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Replaying the move history from an empty board must reproduce the
/// current board, and no move may land on an occupied square.
pub struct MonotonicBoardInvariant;

impl Invariant<Round> for MonotonicBoardInvariant {
    fn holds(round: &Round) -> bool {
        let mut reconstructed = Board::new();

        for mov in round.history() {
            match reconstructed.apply(mov.position, mov.player) {
                Ok(next) => reconstructed = next,
                Err(_) => return false,
            }
        }

        reconstructed == *round.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
