//! Tic-tac-toe arena - terminal play and batch simulation.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use tictactoe_arena::{ArenaConfig, Cli, Command, Difficulty, GameMode};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            mode,
            difficulty,
            delay_ms,
            seed,
        } => run_play(config, mode, difficulty, delay_ms, seed).await,
        Command::Simulate {
            games,
            difficulty,
            seed,
            json,
        } => run_simulate(games, difficulty, seed, json),
    }
}

/// Run the interactive terminal game
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: std::path::PathBuf,
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    delay_ms: Option<u64>,
    seed: Option<u64>,
) -> Result<()> {
    let config =
        ArenaConfig::load_or_default(&config_path)?.with_overrides(mode, difficulty, delay_ms, seed);
    info!(?config, "Starting terminal game");
    tictactoe_arena::run_terminal(config).await
}

/// Run a batch of random-human games against the opponent
#[instrument]
fn run_simulate(games: u32, difficulty: Difficulty, seed: Option<u64>, json: bool) -> Result<()> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, "Starting simulation");

    let scores = tictactoe_arena::simulate(games, difficulty, seed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else {
        println!("Opponent difficulty: {}", difficulty);
        println!("Seed: {}", seed);
        println!(
            "Human (X) wins: {}  Opponent (O) wins: {}  Draws: {}",
            scores.x_wins, scores.o_wins, scores.draws
        );
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tictactoe_arena=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
