//! Move selection strategies over a node's children
//!
//! Every strategy looks only at the children of the current node, in the
//! row-major order the graph builder generated them, and returns the index
//! of the chosen child. Ranked strategies collect every equal-best child and
//! hand the candidates to a [`TieBreak`] policy, so all of them resolve ties
//! the same way.

use std::{fmt, str::FromStr};

use rand::{Rng, prelude::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::graph::Node;

/// How the computer picks its move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Uniform choice over all legal moves
    Random,
    /// Highest minimax score
    #[default]
    Minimax,
    /// Most winning games beneath the move
    MostWins,
    /// Fewest losing games beneath the move
    LeastLosses,
    /// Most drawn games beneath the move
    MostDraws,
}

impl Algorithm {
    /// All algorithms, in menu order
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Random,
        Algorithm::Minimax,
        Algorithm::MostWins,
        Algorithm::LeastLosses,
        Algorithm::MostDraws,
    ];

    /// Human-facing menu label
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Random => "Random",
            Algorithm::Minimax => "Minimax",
            Algorithm::MostWins => "Most win paths",
            Algorithm::LeastLosses => "Least loss paths",
            Algorithm::MostDraws => "Most draw paths",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Algorithm::Random => "random",
            Algorithm::Minimax => "minimax",
            Algorithm::MostWins => "most-wins",
            Algorithm::LeastLosses => "least-losses",
            Algorithm::MostDraws => "most-draws",
        };
        f.write_str(label)
    }
}

impl FromStr for Algorithm {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalised.as_str() {
            "random" => Ok(Algorithm::Random),
            "minimax" => Ok(Algorithm::Minimax),
            "most-wins" | "wins" => Ok(Algorithm::MostWins),
            "least-losses" | "losses" => Ok(Algorithm::LeastLosses),
            "most-draws" | "draws" => Ok(Algorithm::MostDraws),
            _ => Err(crate::Error::ParseAlgorithm {
                input: s.to_string(),
                expected: "random, minimax, most-wins, least-losses, most-draws".to_string(),
            }),
        }
    }
}

/// Strategy for breaking ties when several children rank equally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// First equal-best child in row-major order
    #[default]
    First,
    /// Uniform choice among equal-best children
    Uniform,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TieBreak::First => "first",
            TieBreak::Uniform => "uniform",
        };
        f.write_str(label)
    }
}

impl FromStr for TieBreak {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(TieBreak::First),
            "uniform" | "random" => Ok(TieBreak::Uniform),
            _ => Err(crate::Error::ParseTieBreak {
                input: s.to_string(),
                expected: "first, uniform".to_string(),
            }),
        }
    }
}

/// Higher is better for every ranked algorithm.
fn rank(algorithm: Algorithm, node: &Node) -> i64 {
    let tally = node.tally();
    match algorithm {
        Algorithm::Random => 0,
        Algorithm::Minimax => i64::from(node.score()),
        Algorithm::MostWins => tally.win as i64,
        Algorithm::LeastLosses => -(tally.loss as i64),
        Algorithm::MostDraws => tally.draw as i64,
    }
}

/// Indices of the children that rank best under `algorithm`, in input order.
pub fn best_children(algorithm: Algorithm, children: &[&Node]) -> Vec<usize> {
    let Some(best) = children.iter().map(|node| rank(algorithm, node)).max() else {
        return Vec::new();
    };
    children
        .iter()
        .enumerate()
        .filter(|(_, node)| rank(algorithm, node) == best)
        .map(|(index, _)| index)
        .collect()
}

/// Pick one child index with `algorithm`.
///
/// Returns `None` only when `children` is empty.
pub fn select_child<R: Rng + ?Sized>(
    algorithm: Algorithm,
    children: &[&Node],
    tie_break: TieBreak,
    rng: &mut R,
) -> Option<usize> {
    if children.is_empty() {
        return None;
    }

    if algorithm == Algorithm::Random {
        return Some(rng.random_range(0..children.len()));
    }

    let candidates = best_children(algorithm, children);
    match tie_break {
        TieBreak::First => candidates.first().copied(),
        TieBreak::Uniform => candidates.choose(rng).copied(),
    }
}
