//! Tic-Tac-Toe board implementation

pub mod board;
pub mod lines;
pub mod render;
mod validation;

pub use board::{BoardState, Cell, Player, Position};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use render::{Symbols, render};
