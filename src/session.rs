//! Turn-based game loop around a single [`GameState`].
//!
//! In vs-computer mode a human move that hands the turn to the computer
//! does not run the search straight away. It leaves a pending computer turn
//! that the caller drains with [`Session::run_pending`] whenever it is ready,
//! e.g. after a short pause so the human move shows first.

use clap::ValueEnum;
use log::{debug, info, warn};

use crate::error::{MoveError, Result};
use crate::minimax::Minimax;
use crate::tic_tac_toe::{GameState, Player, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Two humans share the board.
    TwoPlayer,
    /// A human plays against the minimax engine.
    VsComputer,
}

/// What happened after a human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub status: Status,
    pub computer_pending: bool,
}

#[derive(Debug)]
pub struct Session {
    game: GameState,
    mode: Mode,
    computer: Player,
    engine: Minimax,
    computer_pending: bool,
}

impl Session {
    pub fn new(mode: Mode, computer: Player) -> Self {
        let mut session = Self {
            game: GameState::new(),
            mode,
            computer,
            engine: Minimax::new(),
            computer_pending: false,
        };
        session.reset();
        session
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn computer(&self) -> Player {
        self.computer
    }

    pub fn computer_pending(&self) -> bool {
        self.computer_pending
    }

    /// Starts a fresh game. When the computer plays X its opening move is
    /// left pending.
    pub fn reset(&mut self) {
        self.game.reset();
        self.computer_pending = self.mode == Mode::VsComputer && self.computer == Player::X;
        info!("new game ({:?})", self.mode);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Plays `index` for the human whose turn it is.
    pub fn play(&mut self, index: usize) -> Result<Turn> {
        let player = self.game.current_player();
        let computers_turn = self.mode == Mode::VsComputer && player == self.computer;
        if self.computer_pending || (computers_turn && !self.game.done()) {
            warn!("ignoring {} at {} while the computer is to move", player, index);
            return Err(MoveError::OutOfTurn(player).into());
        }

        let status = self.game.apply_move(index, player).map_err(|err| {
            warn!("rejected {} at {}: {}", player, index, err);
            err
        })?;

        self.computer_pending = self.mode == Mode::VsComputer
            && !status.is_terminal()
            && self.game.current_player() == self.computer;
        Ok(Turn {
            status,
            computer_pending: self.computer_pending,
        })
    }

    /// Runs the pending computer move, if any, and returns the cell it took.
    pub fn run_pending(&mut self) -> Result<Option<usize>> {
        if !self.computer_pending {
            return Ok(None);
        }
        self.computer_pending = false;

        let index = self.engine.select_move(&self.game)?;
        self.game.apply_move(index, self.computer)?;
        debug!("computer took {}", index);
        Ok(Some(index))
    }

    pub fn status_text(&self) -> String {
        let vs_computer = self.mode == Mode::VsComputer;
        match self.game.status() {
            Status::Win(player) if vs_computer && player == self.computer => {
                "🎉 Computer wins!".to_string()
            }
            Status::Win(player) => format!("🎉 Player {} wins!", player),
            Status::Draw => "It's a draw!".to_string(),
            Status::InProgress if vs_computer => {
                let player = self.game.current_player();
                if player == self.computer {
                    "Computer is thinking...".to_string()
                } else {
                    format!("Your turn ({})", player)
                }
            }
            Status::InProgress => format!("Player {}'s turn", self.game.current_player()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn test_two_player_alternates() {
        let mut session = Session::new(Mode::TwoPlayer, Player::O);
        assert_eq!(session.status_text(), "Player X's turn");

        let turn = session.play(4).unwrap();
        assert_eq!(turn.status, Status::InProgress);
        assert!(!turn.computer_pending);
        assert_eq!(session.status_text(), "Player O's turn");

        session.play(0).unwrap();
        assert_eq!(session.game().current_player(), Player::X);
        assert_eq!(session.run_pending(), Ok(None));
    }

    #[test]
    fn test_two_player_win_text() {
        let mut session = Session::new(Mode::TwoPlayer, Player::O);
        for index in [0, 3, 1, 4, 2] {
            session.play(index).unwrap();
        }
        assert_eq!(session.game().status(), Status::Win(Player::X));
        assert_eq!(session.status_text(), "🎉 Player X wins!");
        assert_eq!(
            session.play(5),
            Err(GameError::InvalidMove(MoveError::GameOver))
        );
    }

    #[test]
    fn test_computer_reply_is_deferred() {
        let mut session = Session::new(Mode::VsComputer, Player::O);
        assert_eq!(session.status_text(), "Your turn (X)");

        let turn = session.play(4).unwrap();
        assert!(turn.computer_pending);
        assert_eq!(session.game().board().count(Player::O), 0);
        assert_eq!(session.status_text(), "Computer is thinking...");

        assert_eq!(
            session.play(0),
            Err(GameError::InvalidMove(MoveError::OutOfTurn(Player::O)))
        );

        let reply = session.run_pending().unwrap().unwrap();
        assert!([0, 2, 6, 8].contains(&reply));
        assert!(!session.computer_pending());
        assert_eq!(session.game().current_player(), Player::X);
        assert_eq!(session.run_pending(), Ok(None));
    }

    #[test]
    fn test_rejected_click_keeps_turn() {
        let mut session = Session::new(Mode::VsComputer, Player::O);
        assert_eq!(
            session.play(12),
            Err(GameError::InvalidMove(MoveError::OutOfRange(12)))
        );
        assert!(!session.computer_pending());
        assert_eq!(session.game(), &GameState::new());
    }

    #[test]
    fn test_computer_as_x_opens() {
        let mut session = Session::new(Mode::VsComputer, Player::X);
        assert!(session.computer_pending());
        assert_eq!(session.run_pending(), Ok(Some(0)));
        assert_eq!(session.status_text(), "Your turn (O)");
    }

    #[test]
    fn test_set_mode_restarts() {
        let mut session = Session::new(Mode::TwoPlayer, Player::O);
        session.play(4).unwrap();
        session.set_mode(Mode::VsComputer);
        assert_eq!(session.mode(), Mode::VsComputer);
        assert_eq!(session.game(), &GameState::new());
        assert!(!session.computer_pending());
    }

    #[test]
    fn test_computer_never_loses_to_a_naive_human() {
        let mut session = Session::new(Mode::VsComputer, Player::O);
        while !session.game().done() {
            let index = session.game().available_moves()[0];
            session.play(index).unwrap();
            session.run_pending().unwrap();
        }
        assert_eq!(session.status_text(), "🎉 Computer wins!");
    }
}
