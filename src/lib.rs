//! Tic-tac-toe arena - a 3x3 game against a minimax opponent or a friend
//!
//! # Architecture
//!
//! - **Games**: board model, rules, exhaustive minimax and the difficulty-tiered opponent
//! - **Session**: turn sequencing, opponent tickets, scores and modes
//! - **Table**: async driver that paces the opponent and emits events
//! - **Terminal**: line-based front-end over a table
//! - **Simulate**: batch play for checking opponent strength
//!
//! # Example
//!
//! ```
//! use tictactoe_arena::{Difficulty, GameMode, Session, Turn};
//!
//! let mut session = Session::new(GameMode::Opponent, Difficulty::Hard);
//! if let Ok(Turn::OpponentPending(ticket)) = session.select_cell(4) {
//!     let reply = session.resolve_opponent(ticket, 0.5).unwrap();
//!     assert_eq!(reply.position.to_index(), 0);
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod session;
mod simulate;
mod table;
mod terminal;

pub mod games;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ArenaConfig, ConfigError, DEFAULT_CONFIG_PATH};

// Crate-level exports - Session management
pub use session::{
    GameMode, OpponentReply, OpponentTicket, ScoreTally, Session, SessionError, SessionStatus, Turn,
};

// Crate-level exports - Drivers
pub use simulate::simulate;
pub use table::{Table, TableEvent};
pub use terminal::{ReplCommand, render, run as run_terminal};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Difficulty, Mark, Minimax, Move, MoveError, Outcome, Ply, PolicyError, Position, Round,
    Square, choose_move,
};
