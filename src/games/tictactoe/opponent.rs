//! Automated opponent: minimax play diluted by difficulty.
//!
//! The random sample is supplied by the caller so a decision can be
//! reproduced exactly from the board, the difficulty and the sample.

use super::search::Minimax;
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Samples below this value make a medium opponent play randomly.
pub const MEDIUM_RANDOM_THRESHOLD: f64 = 0.5;

/// Opponent strength.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random among empty squares.
    Easy,
    /// Random on low samples, optimal otherwise.
    #[default]
    Medium,
    /// Always optimal.
    Hard,
}

/// Error returned when the opponent cannot pick a move.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum PolicyError {
    /// No empty square is left.
    #[display("No empty square left for the opponent")]
    BoardFull,

    /// The sample cannot index the empty squares.
    #[display("Random sample {} is outside [0, 1)", _0)]
    SampleOutOfRange(f64),
}

impl std::error::Error for PolicyError {}

/// Picks the opponent's square for `mark`.
///
/// - `Easy` takes `empty[floor(sample * empty.len())]`.
/// - `Medium` behaves as `Easy` when `sample < 0.5`, reusing that same
///   sample for the index, and as `Hard` otherwise.
/// - `Hard` plays [`Minimax::best_move`] and ignores the sample.
///
/// # Errors
///
/// - [`PolicyError::BoardFull`] if there is no empty square.
/// - [`PolicyError::SampleOutOfRange`] if `sample` is not in `[0, 1)`.
#[instrument(skip(board))]
pub fn choose_move(
    board: &Board,
    mark: Player,
    difficulty: Difficulty,
    sample: f64,
) -> Result<Position, PolicyError> {
    let empty = board.empty_positions();
    if empty.is_empty() {
        return Err(PolicyError::BoardFull);
    }
    if !(0.0..1.0).contains(&sample) {
        return Err(PolicyError::SampleOutOfRange(sample));
    }

    let position = match difficulty {
        Difficulty::Easy => random_move(&empty, sample),
        Difficulty::Medium if sample < MEDIUM_RANDOM_THRESHOLD => random_move(&empty, sample),
        Difficulty::Medium | Difficulty::Hard => Minimax::new(mark)
            .best_move(board)
            .ok_or(PolicyError::BoardFull)?,
    };

    debug!(%position, "Opponent chose move");
    Ok(position)
}

fn random_move(empty: &[Position], sample: f64) -> Position {
    let index = (sample * empty.len() as f64).floor() as usize;
    empty[index.min(empty.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Board whose empty squares are exactly 3, 5 and 7.
    fn board_with_three_left() -> Board {
        let mut board = Board::new();
        for (i, player) in [
            (0, Player::X),
            (1, Player::O),
            (2, Player::X),
            (4, Player::O),
            (6, Player::X),
            (8, Player::O),
        ] {
            board = board.apply(Position::ALL[i], player).unwrap();
        }
        board
    }

    #[test]
    fn test_easy_zero_sample_takes_first_empty() {
        let board = board_with_three_left();
        assert_eq!(
            choose_move(&board, Player::O, Difficulty::Easy, 0.0),
            Ok(Position::MiddleLeft)
        );
    }

    #[test]
    fn test_easy_sample_scales_over_empty_squares() {
        let board = board_with_three_left();
        assert_eq!(
            choose_move(&board, Player::O, Difficulty::Easy, 0.34),
            Ok(Position::MiddleRight)
        );
        assert_eq!(
            choose_move(&board, Player::O, Difficulty::Easy, 0.99),
            Ok(Position::BottomCenter)
        );
    }

    #[test]
    fn test_medium_low_sample_reuses_sample_for_index() {
        // 0.4 gates into the random branch and also picks index floor(0.4 * 9) = 3.
        let board = Board::new();
        assert_eq!(
            choose_move(&board, Player::O, Difficulty::Medium, 0.4),
            Ok(Position::MiddleLeft)
        );
    }

    #[test]
    fn test_medium_high_sample_plays_optimally() {
        let board = Board::new()
            .apply(Position::TopLeft, Player::X)
            .unwrap()
            .apply(Position::TopCenter, Player::X)
            .unwrap()
            .apply(Position::Center, Player::O)
            .unwrap();
        assert_eq!(
            choose_move(&board, Player::O, Difficulty::Medium, 0.5),
            Ok(Position::TopRight)
        );
    }

    #[test]
    fn test_hard_ignores_sample() {
        let board = Board::new().apply(Position::Center, Player::X).unwrap();
        for sample in [0.0, 0.25, 0.75, 0.999] {
            assert_eq!(
                choose_move(&board, Player::O, Difficulty::Hard, sample),
                Ok(Position::TopLeft)
            );
        }
    }

    #[test]
    fn test_full_board_is_invalid_state() {
        let mut board = board_with_three_left();
        for (i, player) in [(3, Player::O), (5, Player::X), (7, Player::X)] {
            board = board.apply(Position::ALL[i], player).unwrap();
        }
        assert_eq!(
            choose_move(&board, Player::O, Difficulty::Hard, 0.0),
            Err(PolicyError::BoardFull)
        );
    }

    #[test]
    fn test_sample_out_of_range() {
        let board = Board::new();
        for sample in [1.0, -0.1, f64::NAN] {
            assert!(matches!(
                choose_move(&board, Player::O, Difficulty::Easy, sample),
                Err(PolicyError::SampleOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
