//! Box-drawing rendering of the board for terminal play

use serde::{Deserialize, Serialize};

use super::{BoardState, Cell, Player, board::BOARD_SIZE};

/// Characters used to draw each player's marks.
///
/// The engine is always [`Player::One`], but the human chooses whether they
/// are X or O, so the mapping from player to glyph is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbols {
    pub player_one: char,
    pub player_two: char,
}

impl Symbols {
    pub fn new(player_one: char, player_two: char) -> Self {
        Self {
            player_one,
            player_two,
        }
    }

    pub fn for_player(&self, player: Player) -> char {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    fn for_cell(&self, cell: Cell) -> char {
        cell.player().map_or(' ', |player| self.for_player(player))
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::new('X', 'O')
    }
}

/// Render the board as a framed 3x3 grid.
///
/// ```text
/// ┌───┬───┬───┐
/// │ X │   │ O │
/// ├───┼───┼───┤
/// ...
/// ```
pub fn render(board: &BoardState, symbols: Symbols) -> String {
    let mut out = String::new();
    out.push_str("┌───┬───┬───┐\n");
    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push_str("├───┼───┼───┤\n");
        }
        for cell in &board.cells[row * BOARD_SIZE..(row + 1) * BOARD_SIZE] {
            let glyph = symbols.for_cell(*cell);
            out.push_str("│ ");
            out.push(glyph);
            out.push(' ');
        }
        out.push_str("│\n");
    }
    out.push_str("└───┴───┴───┘\n");
    out
}
