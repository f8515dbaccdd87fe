//! History consistency invariant: history length matches occupied squares.

use super::super::{Round, Square};
use super::Invariant;

/// Invariant: History length equals number of occupied squares.
pub struct HistoryConsistentInvariant;

impl Invariant<Round> for HistoryConsistentInvariant {
    fn holds(round: &Round) -> bool {
        let occupied_count = round
            .board()
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();

        round.history().len() == occupied_count
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}
