pub mod cli;
pub mod error;
pub mod minimax;
pub mod session;
pub mod tic_tac_toe;

pub use error::{GameError, MoveError, ParseBoardError};
pub use minimax::{Decision, Minimax, Score};
pub use session::{Mode, Session, Turn};
pub use tic_tac_toe::{Board, Cell, GameState, Player, Status, WIN_LINES};
