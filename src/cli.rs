//! Command-line interface for tictactoe_arena.

use crate::config::DEFAULT_CONFIG_PATH;
use crate::games::tictactoe::Difficulty;
use crate::session::GameMode;
use clap::{Parser, Subcommand};

/// Tic-tac-toe against a minimax opponent or a friend
#[derive(Parser, Debug)]
#[command(name = "tictactoe_arena")]
#[command(about = "Tic-tac-toe against a minimax opponent or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Path to the TOML config file (optional)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: std::path::PathBuf,

        /// Game mode: opponent (alias: ai) or friend
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// Opponent difficulty: easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Pause before the opponent moves, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for the opponent's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play random moves against the opponent and report the tally
    Simulate {
        /// Number of rounds to play
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Opponent difficulty
        #[arg(short, long, default_value = "hard")]
        difficulty: Difficulty,

        /// Seed for both sides' random choices (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_overrides() {
        let cli = Cli::parse_from([
            "tictactoe_arena",
            "play",
            "--mode",
            "friend",
            "-d",
            "Hard",
            "--delay-ms",
            "0",
        ]);
        match cli.command {
            Command::Play {
                mode,
                difficulty,
                delay_ms,
                seed,
                ..
            } => {
                assert_eq!(mode, Some(GameMode::Friend));
                assert_eq!(difficulty, Some(Difficulty::Hard));
                assert_eq!(delay_ms, Some(0));
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::parse_from(["tictactoe_arena", "simulate"]);
        match cli.command {
            Command::Simulate {
                games,
                difficulty,
                json,
                ..
            } => {
                assert_eq!(games, 1000);
                assert_eq!(difficulty, Difficulty::Hard);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
