//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{Player, Round};
use super::Invariant;

/// Invariant: Players alternate turns, X first.
///
/// This also bounds the mark counts: X never leads O by more than one
/// and O never leads X.
pub struct AlternatingTurnInvariant;

impl Invariant<Round> for AlternatingTurnInvariant {
    fn holds(round: &Round) -> bool {
        let history = round.history();

        let Some(first) = history.first() else {
            return round.to_move() == Player::X;
        };

        if first.player != Player::X {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].player == pair[1].player) {
            return false;
        }

        let x_count = round.board().count(Player::X);
        let o_count = round.board().count(Player::O);
        if x_count < o_count || x_count > o_count + 1 {
            return false;
        }

        // A finished round keeps the last mover as `to_move`.
        let expected = if round.outcome().is_some() {
            history[history.len() - 1].player
        } else if history.len() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };

        round.to_move() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
