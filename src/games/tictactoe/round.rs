//! A single round of tic-tac-toe: board, move history, and turn order.

use super::action::{Move, MoveError};
use super::invariants::assert_invariants;
use super::phases::Outcome;
use super::{Board, Player, Position, rules};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One round from an empty board to an outcome.
///
/// X always moves first and marks alternate strictly. Once the round has
/// an outcome it accepts no further moves; start a new round instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub(super) board: Board,
    pub(super) history: Vec<Move>,
    pub(super) to_move: Player,
    pub(super) outcome: Option<Outcome>,
}

impl Round {
    /// Creates a fresh round with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            to_move: Player::X,
            outcome: None,
        }
    }

    /// Places the current player's mark at `pos`.
    ///
    /// Returns the outcome if this move ended the round. The turn passes to
    /// the opponent only while the round continues.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the round already has an outcome.
    /// - [`MoveError::SquareOccupied`] if the square is taken.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn place(&mut self, pos: Position) -> Result<Option<Outcome>, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }

        let player = self.to_move;
        self.board = self.board.apply(pos, player)?;
        self.history.push(Move::new(player, pos));

        self.outcome = rules::outcome(&self.board);
        if self.outcome.is_none() {
            self.to_move = player.opponent();
        }

        assert_invariants(self);
        Ok(self.outcome)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the player to move (the last mover once the round is over).
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the outcome, if the round has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Replays moves from an empty board.
    ///
    /// # Errors
    ///
    /// Fails on the first move that is illegal at its point in the replay.
    pub fn replay(positions: &[Position]) -> Result<Self, MoveError> {
        let mut round = Self::new();
        for pos in positions {
            round.place(*pos)?;
        }
        Ok(round)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}
