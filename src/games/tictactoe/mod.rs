//! Tic-tac-toe: board model, rules, minimax search and the automated opponent.

mod action;
pub mod invariants;
pub mod opponent;
mod phases;
mod position;
mod round;
pub mod rules;
pub mod search;
mod types;

pub use action::{Move, MoveError};
pub use opponent::{Difficulty, PolicyError, choose_move};
pub use phases::Outcome;
pub use position::Position;
pub use round::Round;
pub use search::{Minimax, Ply};
pub use types::{Board, Player, Square};

/// Alias for clarity in session management.
pub type Mark = Player;
