//! Batch play: a random human against the automated opponent.

use crate::games::tictactoe::Difficulty;
use crate::session::{GameMode, ScoreTally, Session, SessionError, Turn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

/// Plays `games` rounds in opponent mode with no delay.
///
/// The human picks uniformly among empty squares; the opponent's samples
/// come from the same seeded generator, so a seed reproduces the run.
///
/// # Errors
///
/// Propagates a session rejection, which would mean a bug in the session.
#[instrument]
pub fn simulate(games: u32, difficulty: Difficulty, seed: u64) -> Result<ScoreTally, SessionError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = Session::new(GameMode::Opponent, difficulty);

    for _ in 0..games {
        session.new_game();
        play_round(&mut session, &mut rng)?;
    }

    let scores = session.scores();
    info!(?scores, "Simulation finished");
    Ok(scores)
}

fn play_round(session: &mut Session, rng: &mut StdRng) -> Result<(), SessionError> {
    loop {
        let empty = session.board().empty_positions();
        let pick = empty[rng.random_range(0..empty.len())];

        let mut turn = session.select_cell(pick.to_index())?;
        if let Turn::OpponentPending(ticket) = turn {
            turn = session.resolve_opponent(ticket, rng.random())?.turn;
        }
        if let Turn::Finished(_) = turn {
            return Ok(());
        }
    }
}
