//! Identifier types for positions in the state graph.
//!
//! [`StateKey`] is the memo key the graph builder uses to detect
//! transpositions; [`NodeId`] is the arena index a key resolves to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BoardState, Cell, Player, board::CELL_COUNT};

/// Canonical encoding of a grid together with the player to move.
///
/// The nine cells are packed as base-3 digits (cell 0 least significant) and
/// the turn occupies the lowest bit, so two states share a key exactly when
/// both the grid and the turn match. Move order never enters the key.
///
/// # Examples
///
/// ```
/// use oxo::tictactoe::{BoardState, Player, Position};
///
/// let board = BoardState::new().apply(Position::new(1, 1), Player::One);
/// let key = board.key(Player::Two);
/// assert_eq!(key.board(), board);
/// assert_eq!(key.turn(), Player::Two);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateKey(u32);

impl StateKey {
    pub fn new(board: &BoardState, turn: Player) -> Self {
        let grid = board
            .cells
            .iter()
            .rev()
            .fold(0u32, |acc, cell| acc * 3 + cell.digit());
        let turn_bit = match turn {
            Player::One => 0,
            Player::Two => 1,
        };
        Self((grid << 1) | turn_bit)
    }

    /// Raw packed value
    pub fn value(self) -> u32 {
        self.0
    }

    /// Recover the grid this key was built from
    pub fn board(self) -> BoardState {
        let mut grid = self.0 >> 1;
        let mut cells = [Cell::Empty; CELL_COUNT];
        for cell in &mut cells {
            *cell = match grid % 3 {
                1 => Cell::PlayerOne,
                2 => Cell::PlayerTwo,
                _ => Cell::Empty,
            };
            grid /= 3;
        }
        BoardState::from_cells(cells)
    }

    /// Recover the player to move
    pub fn turn(self) -> Player {
        if self.0 & 1 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board().encode(self.turn()))
    }
}

/// Index of a node in the state graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
