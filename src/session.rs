//! Game session: turn sequencing, opponent hand-off, and the score tally.
//!
//! A [`Session`] is created once and mutated in place by a single owner.
//! Human moves go through [`Session::select_cell`]. In opponent mode a
//! human move that does not end the round leaves the session in
//! [`SessionStatus::OpponentThinking`] with an [`OpponentTicket`]; the
//! owner later calls [`Session::resolve_opponent`] with that ticket and a
//! random sample, after whatever delay it likes.

use crate::games::tictactoe::{
    Board, Difficulty, Mark, MoveError, Outcome, PolicyError, Position, Round, choose_move,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who plays the O side.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Human (X) against the automated opponent (O).
    #[default]
    #[serde(alias = "ai")]
    #[strum(to_string = "opponent", serialize = "ai")]
    Opponent,
    /// Two humans sharing the board.
    #[serde(alias = "human")]
    #[strum(to_string = "friend", serialize = "human")]
    Friend,
}

/// Identifies one pending opponent decision.
///
/// Every reset invalidates the outstanding ticket, so a decision that
/// arrives after a new game has started is rejected instead of landing on
/// the fresh board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("ticket #{}", _0)]
pub struct OpponentTicket(u64);

/// Where the session is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for a human move.
    InProgress,
    /// The opponent owes a move; human input is rejected.
    OpponentThinking(OpponentTicket),
    /// The round is decided; only resets are accepted.
    Terminal(Outcome),
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The round continues with `next` to move.
    Continue {
        /// Mark whose turn it is now.
        next: Mark,
    },
    /// The opponent must move before the human can play again.
    OpponentPending(OpponentTicket),
    /// The move ended the round.
    Finished(Outcome),
}

/// The opponent's move and what it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentReply {
    /// Square the opponent took.
    pub position: Position,
    /// State of the round afterwards.
    pub turn: Turn,
}

/// Running results since the last score reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    /// Rounds won by X (the human in opponent mode).
    pub x_wins: u32,
    /// Rounds won by O (the opponent in opponent mode).
    pub o_wins: u32,
    /// Drawn rounds.
    pub draws: u32,
}

impl ScoreTally {
    /// Counts one finished round.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Mark::X) => self.x_wins += 1,
            Outcome::Winner(Mark::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Total rounds counted.
    pub fn total(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Reason a session action was rejected. The session is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum SessionError {
    /// Index outside 0-8.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The square is taken.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(Position),

    /// The round is decided.
    #[display("Game is already over")]
    GameOver,

    /// The opponent has not moved yet.
    #[display("Waiting for the opponent to move")]
    OpponentThinking,

    /// No opponent decision is outstanding.
    #[display("No opponent move is pending")]
    NoOpponentPending,

    /// The ticket was cancelled by a reset or already used.
    #[display("Opponent {} is no longer valid", _0)]
    StaleTicket(OpponentTicket),

    /// The opponent policy refused to move.
    #[display("Opponent could not move: {}", _0)]
    Policy(PolicyError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Policy(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::SquareOccupied(pos) => SessionError::CellOccupied(pos),
            MoveError::GameOver => SessionError::GameOver,
        }
    }
}

impl From<PolicyError> for SessionError {
    fn from(err: PolicyError) -> Self {
        SessionError::Policy(err)
    }
}

/// One player's (or two players') ongoing series of rounds.
#[derive(Debug, Clone)]
pub struct Session {
    round: Round,
    mode: GameMode,
    difficulty: Difficulty,
    status: SessionStatus,
    scores: ScoreTally,
    tickets_issued: u64,
}

impl Session {
    /// The mark the automated opponent plays.
    pub const OPPONENT_MARK: Mark = Mark::O;

    /// Creates a session with an empty board and X to move.
    #[instrument]
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        info!("Creating new game session");
        Self {
            round: Round::new(),
            mode,
            difficulty,
            status: SessionStatus::InProgress,
            scores: ScoreTally::default(),
            tickets_issued: 0,
        }
    }

    /// Places the current human's mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Rejects the move, leaving the session untouched, if the index is out
    /// of range, the square is taken, the round is over, or the opponent
    /// still owes a move.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn select_cell(&mut self, index: usize) -> Result<Turn, SessionError> {
        let position = Position::from_index(index).ok_or(SessionError::OutOfBounds(index))?;

        match self.status {
            SessionStatus::InProgress => {}
            SessionStatus::OpponentThinking(_) => return Err(SessionError::OpponentThinking),
            SessionStatus::Terminal(_) => return Err(SessionError::GameOver),
        }

        let mark = self.round.to_move();
        if let Some(outcome) = self.round.place(position)? {
            return Ok(self.finish(outcome));
        }
        debug!(%mark, %position, "Human move applied");

        match self.mode {
            GameMode::Friend => Ok(Turn::Continue {
                next: self.round.to_move(),
            }),
            GameMode::Opponent => {
                self.tickets_issued += 1;
                let ticket = OpponentTicket(self.tickets_issued);
                self.status = SessionStatus::OpponentThinking(ticket);
                debug!(%ticket, "Opponent is thinking");
                Ok(Turn::OpponentPending(ticket))
            }
        }
    }

    /// Lets the opponent make the move it owes for `ticket`.
    ///
    /// The chosen square depends only on the board, the difficulty and
    /// `sample`, never on how long the caller waited.
    ///
    /// # Errors
    ///
    /// - [`SessionError::StaleTicket`] if a reset cancelled the ticket or it was already used.
    /// - [`SessionError::NoOpponentPending`] if no decision is outstanding.
    /// - [`SessionError::Policy`] if the sample is unusable; the decision stays pending.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn resolve_opponent(
        &mut self,
        ticket: OpponentTicket,
        sample: f64,
    ) -> Result<OpponentReply, SessionError> {
        match self.status {
            SessionStatus::OpponentThinking(pending) if pending == ticket => {}
            _ if ticket.0 >= 1 && ticket.0 <= self.tickets_issued => {
                debug!(%ticket, "Ignoring cancelled opponent decision");
                return Err(SessionError::StaleTicket(ticket));
            }
            _ => return Err(SessionError::NoOpponentPending),
        }

        let position = choose_move(
            self.round.board(),
            Self::OPPONENT_MARK,
            self.difficulty,
            sample,
        )?;
        let outcome = self.round.place(position)?;
        debug!(%position, "Opponent move applied");

        let turn = match outcome {
            Some(outcome) => self.finish(outcome),
            None => {
                self.status = SessionStatus::InProgress;
                Turn::Continue {
                    next: self.round.to_move(),
                }
            }
        };
        Ok(OpponentReply { position, turn })
    }

    /// Starts a new round; scores are kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.reset_round();
        info!("New game started");
    }

    /// Switches mode, clearing the board and the scores.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.scores = ScoreTally::default();
        self.reset_round();
        info!(%mode, "Game mode selected");
    }

    /// Changes opponent strength and starts a new round; scores are kept.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset_round();
        info!(%difficulty, "Difficulty selected");
    }

    /// Clears the scores and starts a new round.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores = ScoreTally::default();
        self.reset_round();
        info!("Scores reset");
    }

    fn reset_round(&mut self) {
        if let SessionStatus::OpponentThinking(ticket) = self.status {
            warn!(%ticket, "Cancelling pending opponent decision");
        }
        self.round = Round::new();
        self.status = SessionStatus::InProgress;
    }

    fn finish(&mut self, outcome: Outcome) -> Turn {
        self.status = SessionStatus::Terminal(outcome);
        self.scores.record(outcome);
        info!(%outcome, scores = ?self.scores, "Round finished");
        Turn::Finished(outcome)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.round.board()
    }

    /// Returns the current round, including its move history.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        self.round.to_move()
    }

    /// Current state-machine status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// True while the opponent owes a move.
    pub fn is_thinking(&self) -> bool {
        matches!(self.status, SessionStatus::OpponentThinking(_))
    }

    /// True once the round is decided.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, SessionStatus::Terminal(_))
    }

    /// Outcome of the round, if decided.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            SessionStatus::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Result line for a decided round, worded for the current mode.
    pub fn winner_text(&self) -> Option<String> {
        let text = match (self.outcome()?, self.mode) {
            (Outcome::Draw, _) => "Draw!".to_string(),
            (Outcome::Winner(Mark::X), GameMode::Opponent) => "You win!".to_string(),
            (Outcome::Winner(Mark::O), GameMode::Opponent) => "AI wins!".to_string(),
            (Outcome::Winner(mark), GameMode::Friend) => format!("Player {} wins!", mark),
        };
        Some(text)
    }

    /// Current score tally.
    pub fn scores(&self) -> ScoreTally {
        self.scores
    }

    /// Labels for the X and O score columns.
    pub fn score_labels(&self) -> (&'static str, &'static str) {
        match self.mode {
            GameMode::Opponent => ("You", "AI"),
            GameMode::Friend => ("Player X", "Player O"),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current opponent difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameMode::default(), Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_used_once() {
        let mut session = Session::new(GameMode::Opponent, Difficulty::Hard);
        let Ok(Turn::OpponentPending(ticket)) = session.select_cell(4) else {
            panic!("expected a pending opponent move");
        };
        session.resolve_opponent(ticket, 0.0).unwrap();
        assert_eq!(
            session.resolve_opponent(ticket, 0.0),
            Err(SessionError::StaleTicket(ticket))
        );
    }

    #[test]
    fn test_unknown_ticket_is_not_pending() {
        let mut session = Session::default();
        assert_eq!(
            session.resolve_opponent(OpponentTicket(7), 0.0),
            Err(SessionError::NoOpponentPending)
        );
    }

    #[test]
    fn test_bad_sample_keeps_decision_pending() {
        let mut session = Session::new(GameMode::Opponent, Difficulty::Easy);
        let Ok(Turn::OpponentPending(ticket)) = session.select_cell(0) else {
            panic!("expected a pending opponent move");
        };
        assert!(matches!(
            session.resolve_opponent(ticket, 1.5),
            Err(SessionError::Policy(PolicyError::SampleOutOfRange(_)))
        ));
        assert!(session.is_thinking());
        assert!(session.resolve_opponent(ticket, 0.0).is_ok());
    }

    #[test]
    fn test_mode_parses_aliases() {
        assert_eq!("AI".parse::<GameMode>(), Ok(GameMode::Opponent));
        assert_eq!("friend".parse::<GameMode>(), Ok(GameMode::Friend));
        assert_eq!(GameMode::Opponent.to_string(), "opponent");
    }

    #[test]
    fn test_tally_records_each_outcome() {
        let mut tally = ScoreTally::default();
        tally.record(Outcome::Winner(Mark::X));
        tally.record(Outcome::Winner(Mark::O));
        tally.record(Outcome::Draw);
        tally.record(Outcome::Draw);
        assert_eq!(
            tally,
            ScoreTally {
                x_wins: 1,
                o_wins: 1,
                draws: 2
            }
        );
        assert_eq!(tally.total(), 4);
    }
}
