//! Exhaustive minimax search for tic-tac-toe.
//!
//! Scores are from the maximizer's point of view: `1` for a forced win,
//! `0` for a draw with best play, `-1` for a forced loss. The tree is
//! searched to the end; a 3x3 board bounds it to at most 9! lines.

use super::rules::{has_won, is_draw};
use super::{Board, Player, Position};
use tracing::{debug, instrument};

/// Score of a position the maximizer has won.
pub const WIN: i8 = 1;
/// Score of a drawn position.
pub const DRAW: i8 = 0;
/// Score of a position the minimizer has won.
pub const LOSS: i8 = -1;

/// Whose role the current ply plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ply {
    /// The maximizer places its mark.
    Maximizing,
    /// The minimizer places its mark.
    Minimizing,
}

impl Ply {
    /// Returns the other role.
    pub fn flip(self) -> Self {
        match self {
            Ply::Maximizing => Ply::Minimizing,
            Ply::Minimizing => Ply::Maximizing,
        }
    }
}

/// Minimax evaluator searching on behalf of one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    maximizer: Player,
}

impl Minimax {
    /// Creates a search that maximizes for `maximizer`.
    pub fn new(maximizer: Player) -> Self {
        Self { maximizer }
    }

    /// The opposing mark.
    pub fn minimizer(&self) -> Player {
        self.maximizer.opponent()
    }

    /// Game-theoretic value of `board` with `ply` to move.
    pub fn evaluate(&self, board: &Board, ply: Ply) -> i8 {
        let mut nodes = 0;
        self.search(board, ply, &mut nodes)
    }

    /// The optimal move for the maximizer, or `None` on a full board.
    ///
    /// Every empty square is tried in ascending index order and scored with
    /// the minimizer to reply. The first square with the strictly greatest
    /// score wins, so ties always go to the smallest index.
    #[instrument(skip(self, board), fields(maximizer = %self.maximizer))]
    pub fn best_move(&self, board: &Board) -> Option<Position> {
        let mut nodes = 0u64;
        let mut best: Option<(Position, i8)> = None;

        for pos in board.empty_positions() {
            let Ok(child) = board.apply(pos, self.maximizer) else {
                continue;
            };
            let score = self.search(&child, Ply::Minimizing, &mut nodes);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
            // Nothing later can be strictly greater than a win.
            if score == WIN {
                break;
            }
        }

        debug!(nodes, best = ?best, "Minimax search finished");
        best.map(|(pos, _)| pos)
    }

    fn search(&self, board: &Board, ply: Ply, nodes: &mut u64) -> i8 {
        *nodes += 1;

        if has_won(board, self.maximizer) {
            return WIN;
        }
        if has_won(board, self.minimizer()) {
            return LOSS;
        }
        if is_draw(board) {
            return DRAW;
        }

        let (mark, mut best, bound) = match ply {
            Ply::Maximizing => (self.maximizer, i8::MIN, WIN),
            Ply::Minimizing => (self.minimizer(), i8::MAX, LOSS),
        };

        for pos in board.empty_positions() {
            let Ok(child) = board.apply(pos, mark) else {
                continue;
            };
            let score = self.search(&child, ply.flip(), nodes);
            best = match ply {
                Ply::Maximizing => best.max(score),
                Ply::Minimizing => best.min(score),
            };
            // Scores never leave [LOSS, WIN]; reaching the bound settles the ply.
            if best == bound {
                break;
            }
        }

        best
    }
}
