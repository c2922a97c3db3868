//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::identifiers::StateKey;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A player in the game.
///
/// `One` is always the engine; `Two` is always the human. Which of them
/// moves first is a session setting, and which symbol each is drawn with is
/// a rendering setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    fn to_digit(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Player::One => "player one",
            Player::Two => "player two",
        };
        f.write_str(label)
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    /// Accepts `one`/`1`/`computer` and `two`/`2`/`human`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one" | "1" | "computer" => Ok(Player::One),
            "two" | "2" | "human" => Ok(Player::Two),
            _ => Err(crate::Error::ParsePlayer {
                input: s.to_string(),
                expected: "computer, human".to_string(),
            }),
        }
    }
}

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' | 'x' | '1' => Some(Cell::PlayerOne),
            'O' | 'o' | '2' => Some(Cell::PlayerTwo),
            _ => None,
        }
    }

    /// The player occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    /// Base-3 digit used by [`StateKey`] packing
    pub(crate) fn digit(self) -> u32 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }
}

/// A (row, column) coordinate on the board.
///
/// Positions outside the grid are representable so that callers can hand
/// raw user input to the session and get a proper rejection back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Position for a row-major cell index (0-8)
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: index / BOARD_SIZE,
            column: index % BOARD_SIZE,
        }
    }

    /// Row-major cell index. Only meaningful when [`Position::in_bounds`] holds.
    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.column
    }

    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.column < BOARD_SIZE
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The 3x3 grid, row-major.
///
/// Value type: every transformation returns a new board and leaves the
/// original untouched. The player to move is not part of the board; it is
/// carried alongside it and combined with the grid in [`BoardState::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; CELL_COUNT],
}

impl BoardState {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from an existing grid
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Create a board from a string of nine cell characters.
    ///
    /// Whitespace is ignored, so `"XO. .X. ..O"` style strings work as
    /// well as `"XO..X...O"`. `X`/`1` mark player one,
    /// `O`/`2` mark player two and `.` marks an empty cell.
    ///
    /// # Errors
    ///
    /// Returns error unless exactly 9 cell characters are present, or if any
    /// character is not a valid cell. Labels from [`BoardState::encode`]
    /// carry a turn suffix and are rejected.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Self { cells })
    }

    /// Cell at `position`, or `None` when the position is off the board
    pub fn get(&self, position: Position) -> Option<Cell> {
        position
            .in_bounds()
            .then(|| self.cells[position.index()])
    }

    /// Whether `position` is on the board and unoccupied
    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position) == Some(Cell::Empty)
    }

    /// Place `player`'s mark at `position` and return the new board.
    ///
    /// The position must be on the board and empty; checking that is the
    /// caller's job.
    #[must_use = "apply returns a new board state; the original is unchanged"]
    pub fn apply(&self, position: Position, player: Player) -> BoardState {
        debug_assert!(position.in_bounds(), "move {position} is off the board");
        debug_assert!(self.is_empty(position), "move {position} is occupied");

        let mut next = *self;
        next.cells[position.index()] = player.to_cell();
        next
    }

    /// Check if a player has three in a row
    pub fn check_win(&self, player: Player) -> bool {
        super::lines::LineAnalyzer::has_won(&self.cells, player)
    }

    /// Empty positions in row-major order.
    ///
    /// The order matters: the move menu shown to the human indexes into it.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.check_win(Player::One) || self.check_win(Player::Two) || self.is_full()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.check_win(Player::One) {
            Some(Player::One)
        } else if self.check_win(Player::Two) {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Memo key for this grid with `turn` to move
    pub fn key(&self, turn: Player) -> StateKey {
        StateKey::new(self, turn)
    }

    /// Human-readable label, e.g. `"XO......._2"`
    pub fn encode(&self, turn: Player) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            turn.to_digit()
        )
    }

    /// Find the position where two boards differ (for inferring moves)
    ///
    /// Returns the first position where the cells differ, or None if identical.
    pub fn find_changed_position(&self, other: &BoardState) -> Option<Position> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .position(|(a, b)| a != b)
            .map(Position::from_index)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(BOARD_SIZE) && i < CELL_COUNT - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
