use std::fmt;
use std::str::FromStr;

use log::info;

use crate::error::{MoveError, ParseBoardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Player),
}

/// The eight winning alignments: rows, columns, then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Nine cells in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.get(index) == Some(Cell::Empty)
    }

    /// Indices of the empty cells, ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cells.len()).filter(move |&i| self.cells[i] == Cell::Empty)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Filled(player))
            .count()
    }

    pub fn check_win(&self, player: Player) -> bool {
        let mark = Cell::Filled(player);
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == mark))
    }

    /// O is checked before X so that an impossible double win resolves the
    /// same way the search scores it.
    pub fn winner(&self) -> Option<Player> {
        [Player::O, Player::X]
            .into_iter()
            .find(|&player| self.check_win(player))
    }

    /// Copy of the board with `player` placed on `index`. The caller
    /// guarantees the index is in range.
    pub(crate) fn with(mut self, index: usize, player: Player) -> Self {
        self.cells[index] = Cell::Filled(player);
        self
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match c {
                'X' | 'x' => Cell::Filled(Player::X),
                'O' | 'o' => Cell::Filled(Player::O),
                '.' | '-' | '_' => Cell::Empty,
                other => return Err(ParseBoardError::BadCell(other)),
            };
            cells.push(cell);
        }
        let cells: [Cell; 9] = cells
            .try_into()
            .map_err(|cells: Vec<Cell>| ParseBoardError::WrongLength(cells.len()))?;
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (r, row) in self.cells.chunks(3).enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Empty => write!(f, "{} ", r * 3 + c)?,
                    Cell::Filled(player) => write!(f, "{} ", player)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Win(Player),
    Draw,
}

impl Status {
    fn of(board: &Board) -> Self {
        if let Some(player) = board.winner() {
            Status::Win(player)
        } else if board.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self != Status::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    // Cached; recomputed after every accepted move.
    status: Status,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: Status::InProgress,
        }
    }

    /// Picks up a game from a position reachable by alternating play. X is
    /// to move when both sides have placed the same number of marks, O when
    /// X is one ahead.
    pub fn from_board(board: Board) -> std::result::Result<Self, ParseBoardError> {
        let (x, o) = (board.count(Player::X), board.count(Player::O));
        let current_player = if x == o {
            Player::X
        } else if x == o + 1 {
            Player::O
        } else {
            return Err(ParseBoardError::MarkCount { x, o });
        };
        if board.check_win(Player::X) && board.check_win(Player::O) {
            return Err(ParseBoardError::TwoWinners);
        }
        Ok(Self {
            board,
            current_player,
            status: Status::of(&board),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn done(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn available_moves(&self) -> Vec<usize> {
        if self.done() {
            return Vec::new();
        }
        self.board.empty_cells().collect()
    }

    pub fn check_win(&self, player: Player) -> bool {
        self.board.check_win(player)
    }

    pub fn is_draw(&self) -> bool {
        self.board.is_full() && self.board.winner().is_none()
    }

    /// Places `player` on `index`. A rejected move leaves the state as it was.
    pub fn apply_move(&mut self, index: usize, player: Player) -> Result<Status> {
        if self.done() {
            return Err(MoveError::GameOver.into());
        }
        match self.board.get(index) {
            None => return Err(MoveError::OutOfRange(index).into()),
            Some(Cell::Filled(_)) => return Err(MoveError::Occupied(index).into()),
            Some(Cell::Empty) => {}
        }
        if player != self.current_player {
            return Err(MoveError::OutOfTurn(player).into());
        }

        self.board = self.board.with(index, player);
        self.current_player = player.opponent();
        self.status = Status::of(&self.board);
        if self.done() {
            info!("game over after {} at {}: {:?}", player, index, self.status);
        }
        Ok(self.status)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
