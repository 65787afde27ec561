use thiserror::Error;

use crate::tic_tac_toe::Player;

/// Why a move was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("cell index {0} is outside 0-8")]
    OutOfRange(usize),

    #[error("cell {0} is already taken")]
    Occupied(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("it is not {0:?}'s turn")]
    OutOfTurn(Player),
}

/// Errors raised by the game core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error("search requested on a finished board")]
    EngineMisuse,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("unexpected character {0:?} in board")]
    BadCell(char),

    #[error("expected 9 cells, found {0}")]
    WrongLength(usize),

    #[error("{x} X marks against {o} O marks cannot arise in play")]
    MarkCount { x: usize, o: usize },

    #[error("both sides have three in a row")]
    TwoWinners,
}

pub type Result<T> = std::result::Result<T, GameError>;
