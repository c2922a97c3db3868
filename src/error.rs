//! Error types for the oxo crate

use thiserror::Error;

use crate::tictactoe::Position;

/// Main error type for the oxo crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position {position} is out of bounds (row and column must be 0-2)")]
    OutOfBounds { position: Position },

    #[error("invalid move: position {position} is already occupied")]
    OccupiedCell { position: Position },

    #[error("game already over")]
    GameOver,

    #[error("it is not the human player's turn")]
    NotYourTurn,

    #[error("it is not the computer's turn")]
    NotComputerTurn,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("internal consistency error: state '{label}' is missing from the state graph")]
    MissingState { label: String },

    #[error("board string must hold exactly {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("impossible position '{label}': {reason}")]
    InvalidPosition { label: String, reason: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid algorithm '{input}'. Expected one of: {expected}")]
    ParseAlgorithm { input: String, expected: String },

    #[error("invalid player '{input}'. Expected one of: {expected}")]
    ParsePlayer { input: String, expected: String },

    #[error("invalid tie-break policy '{input}'. Expected one of: {expected}")]
    ParseTieBreak { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
