//! Exhaustive minimax search over tic-tac-toe positions.
//!
//! Scores are always from O's point of view: a win for O is worth
//! `10 - depth`, a win for X `depth - 10`, a draw `0`. Depth counts the
//! moves made since the searched position, so quicker wins and slower
//! losses score better for the side concerned.

use log::debug;

use crate::error::{GameError, Result};
use crate::tic_tac_toe::{Board, GameState, Player};

pub type Score = i32;

const WIN: Score = 10;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub index: usize,
    pub score: Score,
    /// Positions evaluated below the root.
    pub positions: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Minimax;

impl Minimax {
    pub fn new() -> Self {
        Self
    }

    /// Picks the move for whoever is to play in `game`.
    pub fn select_move(&self, game: &GameState) -> Result<usize> {
        if game.done() {
            return Err(GameError::EngineMisuse);
        }
        self.best_move(game.board(), game.current_player())
    }

    pub fn best_move(&self, board: &Board, player: Player) -> Result<usize> {
        self.decide(board, player).map(|decision| decision.index)
    }

    /// Tries every empty cell for `player` and keeps the best score: the
    /// highest when O moves, the lowest when X moves. Ties go to the lowest
    /// index.
    pub fn decide(&self, board: &Board, player: Player) -> Result<Decision> {
        if board.winner().is_some() {
            return Err(GameError::EngineMisuse);
        }

        let maximizing = player == Player::O;
        let mut positions = 0;
        let mut best: Option<(usize, Score)> = None;
        for index in board.empty_cells() {
            let score = self.search(board.with(index, player), 1, !maximizing, &mut positions);
            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((index, score));
            }
        }

        let (index, score) = best.ok_or(GameError::EngineMisuse)?;
        debug!(
            "{} plays {} (score {}, {} positions)",
            player, index, score, positions
        );
        Ok(Decision {
            index,
            score,
            positions,
        })
    }

    /// Minimax value of `board` reached `depth` moves after the root, with O
    /// to move when `maximizing`.
    pub fn evaluate(&self, board: &Board, depth: usize, maximizing: bool) -> Score {
        let mut positions = 0;
        self.search(*board, depth, maximizing, &mut positions)
    }

    fn search(
        &self,
        board: Board,
        depth: usize,
        maximizing: bool,
        positions: &mut usize,
    ) -> Score {
        *positions += 1;

        if board.check_win(Player::O) {
            return WIN - depth as Score;
        }
        if board.check_win(Player::X) {
            return depth as Score - WIN;
        }
        if board.is_full() {
            return 0;
        }

        let (mover, mut best) = if maximizing {
            (Player::O, Score::MIN)
        } else {
            (Player::X, Score::MAX)
        };
        for index in board.empty_cells() {
            let score = self.search(board.with(index, mover), depth + 1, !maximizing, positions);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}
