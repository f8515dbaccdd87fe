//! Line-oriented terminal front-end.
//!
//! Reads one command per line from stdin, forwards it to a [`Table`], and
//! redraws the board. Table events are printed by a background task as they
//! arrive, so the "thinking" notice shows up before the opponent moves.

use crate::config::ArenaConfig;
use crate::games::tictactoe::{Difficulty, Position};
use crate::session::{GameMode, Session};
use crate::table::{Table, TableEvent};
use anyhow::Result;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  0-8 or a label (e.g. center, top-left)  place a mark
  new                                     start a new game
  reset                                   reset scores (and start a new game)
  mode <opponent|friend>                  switch mode (clears scores)
  difficulty <easy|medium|hard>           change opponent strength
  board                                   redraw the board
  help                                    show this help
  quit                                    leave";

/// A parsed REPL line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    /// Place a mark.
    Select(Position),
    /// Start a new game.
    NewGame,
    /// Reset the scores.
    ResetScores,
    /// Switch mode.
    Mode(GameMode),
    /// Change difficulty.
    Difficulty(Difficulty),
    /// Redraw.
    Board,
    /// Show help.
    Help,
    /// Leave.
    Quit,
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "new" => Ok(ReplCommand::NewGame),
            "reset" => Ok(ReplCommand::ResetScores),
            "board" => Ok(ReplCommand::Board),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            "mode" => rest
                .parse()
                .map(ReplCommand::Mode)
                .map_err(|_| format!("Unknown mode '{}'", rest)),
            "difficulty" => rest
                .parse()
                .map(ReplCommand::Difficulty)
                .map_err(|_| format!("Unknown difficulty '{}'", rest)),
            _ => Position::from_label_or_number(line)
                .map(ReplCommand::Select)
                .ok_or_else(|| format!("Unknown command '{}' (try 'help')", line)),
        }
    }
}

/// Runs the interactive game until `quit` or end of input.
#[instrument(skip(config))]
pub async fn run(config: ArenaConfig) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut table = Table::from_config(&config, event_tx);

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                TableEvent::OpponentThinking => println!("AI is thinking..."),
                TableEvent::MoveMade { mark, position } => println!("{} -> {}", mark, position),
                TableEvent::GameOver { text, .. } => println!("{}", text),
                TableEvent::Reset => println!("Board cleared."),
            }
        }
    });

    println!("{}", HELP);
    println!();
    println!("{}", render(table.session()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let pending = table.is_pending();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match handle_line(&mut table, &line) {
                    LineResult::Quit => break,
                    LineResult::Redraw => {
                        tokio::task::yield_now().await;
                        println!("{}", render(table.session()));
                    }
                    LineResult::Quiet => {}
                }
            }
            reply = table.resolve_pending(), if pending => {
                if let Err(e) = reply {
                    println!("{}", e);
                }
                tokio::task::yield_now().await;
                println!("{}", render(table.session()));
            }
        }
    }

    drop(table);
    printer.await?;
    info!("Leaving table");
    Ok(())
}

enum LineResult {
    Redraw,
    Quiet,
    Quit,
}

/// Applies one input line. Never waits for the opponent, so input typed
/// while it is deciding is rejected rather than queued.
fn handle_line(table: &mut Table, line: &str) -> LineResult {
    if line.trim().is_empty() {
        return LineResult::Quiet;
    }
    let command = match line.parse::<ReplCommand>() {
        Ok(command) => command,
        Err(message) => {
            println!("{}", message);
            return LineResult::Quiet;
        }
    };
    debug!(?command, "REPL command");

    match command {
        ReplCommand::Select(position) => {
            if let Err(e) = table.select(position.to_index()) {
                println!("{}", e);
                return LineResult::Quiet;
            }
        }
        ReplCommand::NewGame => table.request_new_game(),
        ReplCommand::ResetScores => table.request_score_reset(),
        ReplCommand::Mode(mode) => table.set_mode(mode),
        ReplCommand::Difficulty(difficulty) => table.set_difficulty(difficulty),
        ReplCommand::Board => {}
        ReplCommand::Help => {
            println!("{}", HELP);
            return LineResult::Quiet;
        }
        ReplCommand::Quit => return LineResult::Quit,
    }
    LineResult::Redraw
}

/// Board, status line and scores as text.
pub fn render(session: &Session) -> String {
    let (x_label, o_label) = session.score_labels();
    let scores = session.scores();

    let status = if let Some(text) = session.winner_text() {
        text
    } else if session.is_thinking() {
        "AI is thinking...".to_string()
    } else {
        match session.mode() {
            GameMode::Opponent => format!(
                "You are X, AI is O ({} difficulty)",
                session.difficulty()
            ),
            GameMode::Friend => format!("Current: {}", session.to_move()),
        }
    };

    format!(
        "\n{}\n\n{}\n{}: {}  Draws: {}  {}: {}\n",
        session.board().display(),
        status,
        x_label,
        scores.x_wins,
        scores.draws,
        o_label,
        scores.o_wins,
    )
}
