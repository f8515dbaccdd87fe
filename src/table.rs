//! Async table: drives a session for a presentation layer.
//!
//! The table owns its [`Session`], holds the opponent back for a
//! configurable delay so its play is perceptible, draws the opponent's
//! random samples, and reports what happened on an event channel.
//!
//! A human move and the opponent's reply are separate steps. After
//! [`Table::select`] hands the turn to the opponent, the table keeps the
//! ticket and the time the reply is due; [`Table::resolve_pending`] waits
//! for that deadline and plays the reply. Dropping that future part-way
//! leaves the decision pending, and any reset cancels it.

use crate::config::ArenaConfig;
use crate::games::tictactoe::{Difficulty, Mark, Outcome, Position};
use crate::session::{GameMode, OpponentReply, OpponentTicket, Session, SessionError, Turn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// Messages sent from the table to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The opponent is deciding; input should be disabled.
    OpponentThinking,
    /// A mark was placed.
    MoveMade {
        /// Mark that moved.
        mark: Mark,
        /// Square it took.
        position: Position,
    },
    /// The round ended.
    GameOver {
        /// How it ended.
        outcome: Outcome,
        /// Result line for display.
        text: String,
    },
    /// The board was cleared by a new game, mode, difficulty or score reset.
    Reset,
}

/// An opponent decision the table still owes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReply {
    ticket: OpponentTicket,
    due: Instant,
}

/// A session plus the pacing and randomness of its opponent.
pub struct Table {
    session: Session,
    rng: StdRng,
    seed: u64,
    opponent_delay: Duration,
    pending: Option<PendingReply>,
    event_tx: mpsc::UnboundedSender<TableEvent>,
}

impl Table {
    /// Creates a table around `session`.
    pub fn new(
        session: Session,
        seed: u64,
        opponent_delay: Duration,
        event_tx: mpsc::UnboundedSender<TableEvent>,
    ) -> Self {
        Self {
            session,
            rng: StdRng::seed_from_u64(seed),
            seed,
            opponent_delay,
            pending: None,
            event_tx,
        }
    }

    /// Creates a table from configuration, picking a random seed if none is set.
    #[instrument(skip(event_tx))]
    pub fn from_config(config: &ArenaConfig, event_tx: mpsc::UnboundedSender<TableEvent>) -> Self {
        let seed = (*config.seed()).unwrap_or_else(|| rand::rng().random());
        info!(seed, "Opening table");
        Self::new(
            Session::new(*config.mode(), *config.difficulty()),
            seed,
            config.opponent_delay(),
            event_tx,
        )
    }

    /// The session, for reading state to draw.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Seed of the opponent's sample stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// True while an opponent reply is owed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies a click on cell `index` without waiting for the opponent.
    ///
    /// If the move hands the turn to the opponent, the reply is scheduled
    /// one opponent delay from now and [`Turn::OpponentPending`] is returned.
    ///
    /// # Errors
    ///
    /// Returns the rejection if the click was not accepted; the session is
    /// unchanged in that case. While the opponent is deciding every click
    /// is rejected with [`SessionError::OpponentThinking`].
    #[instrument(skip(self))]
    pub fn select(&mut self, index: usize) -> Result<Turn, SessionError> {
        let mark = self.session.to_move();
        let turn = self.session.select_cell(index).inspect_err(|e| {
            debug!(error = %e, "Cell selection rejected");
        })?;

        if let Some(position) = Position::from_index(index) {
            self.notify(TableEvent::MoveMade { mark, position });
        }

        match turn {
            Turn::OpponentPending(ticket) => {
                self.pending = Some(PendingReply {
                    ticket,
                    due: Instant::now() + self.opponent_delay,
                });
                self.notify(TableEvent::OpponentThinking);
            }
            turn => self.notify_if_over(turn),
        }
        Ok(turn)
    }

    /// Waits until the owed reply is due, then plays it.
    ///
    /// Returns `Ok(None)` when nothing is pending. The only await point is
    /// the wait itself, so dropping the future keeps the decision pending
    /// with its original deadline.
    ///
    /// # Errors
    ///
    /// Propagates a session rejection of the reply.
    #[instrument(skip(self))]
    pub async fn resolve_pending(&mut self) -> Result<Option<OpponentReply>, SessionError> {
        let Some(pending) = self.pending else {
            return Ok(None);
        };
        tokio::time::sleep_until(pending.due).await;

        let sample: f64 = self.rng.random();
        let reply = match self.session.resolve_opponent(pending.ticket, sample) {
            Ok(reply) => reply,
            Err(e @ SessionError::Policy(_)) => return Err(e),
            Err(e) => {
                self.pending = None;
                return Err(e);
            }
        };
        self.pending = None;

        self.notify(TableEvent::MoveMade {
            mark: Session::OPPONENT_MARK,
            position: reply.position,
        });
        self.notify_if_over(reply.turn);
        Ok(Some(reply))
    }

    /// Handles a click on cell `index` and, in opponent mode, waits for the reply.
    ///
    /// # Errors
    ///
    /// Same as [`Table::select`] and [`Table::resolve_pending`].
    pub async fn cell_selected(&mut self, index: usize) -> Result<Turn, SessionError> {
        let turn = self.select(index)?;
        match self.resolve_pending().await? {
            Some(reply) => Ok(reply.turn),
            None => Ok(turn),
        }
    }

    /// Switches mode (clears scores).
    pub fn set_mode(&mut self, mode: GameMode) {
        self.session.set_mode(mode);
        self.after_reset();
    }

    /// Changes difficulty (keeps scores).
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.session.set_difficulty(difficulty);
        self.after_reset();
    }

    /// Starts a new round (keeps scores).
    pub fn request_new_game(&mut self) {
        self.session.new_game();
        self.after_reset();
    }

    /// Clears scores and starts a new round.
    pub fn request_score_reset(&mut self) {
        self.session.reset_scores();
        self.after_reset();
    }

    fn after_reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(ticket = %pending.ticket, "Dropped owed opponent reply");
        }
        self.notify(TableEvent::Reset);
    }

    fn notify_if_over(&self, turn: Turn) {
        if let Turn::Finished(outcome) = turn {
            let text = self.session.winner_text().unwrap_or_else(|| outcome.to_string());
            self.notify(TableEvent::GameOver { outcome, text });
        }
    }

    fn notify(&self, event: TableEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
