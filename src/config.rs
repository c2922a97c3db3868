//! Configuration types for session creation.

use serde::{Deserialize, Serialize};

use crate::{strategy::TieBreak, tictactoe::Player};

/// Configuration for starting a game session.
///
/// # Examples
///
/// ```
/// use oxo::{SessionConfig, TieBreak, tictactoe::Player};
///
/// let config = SessionConfig::new(Player::Two)
///     .with_seed(42)
///     .with_tie_break(TieBreak::Uniform);
/// assert_eq!(config.starting_player, Player::Two);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Who moves first. `Player::One` is the computer.
    pub starting_player: Player,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// How ranked strategies resolve equal-best moves
    pub tie_break: TieBreak,
}

impl SessionConfig {
    /// Create a configuration with the given starting player.
    ///
    /// Uses default values for other parameters:
    /// - Seed: None (non-deterministic)
    /// - Tie-break: `TieBreak::First`
    pub fn new(starting_player: Player) -> Self {
        Self {
            starting_player,
            seed: None,
            tie_break: TieBreak::default(),
        }
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Player::One)
    }
}
