//! Per-state records of the state graph

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

use crate::{
    identifiers::{NodeId, StateKey},
    tictactoe::{BoardState, Player},
};

/// Minimax value from player one's perspective: +1 win, 0 draw, -1 loss.
pub type Score = i8;

/// Counts of terminal outcomes reachable beneath a position, from player
/// one's perspective.
///
/// A terminal state reachable along several paths is counted once per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tally {
    pub win: u64,
    pub loss: u64,
    pub draw: u64,
}

impl Tally {
    pub const WIN: Tally = Tally::new(1, 0, 0);
    pub const LOSS: Tally = Tally::new(0, 1, 0);
    pub const DRAW: Tally = Tally::new(0, 0, 1);

    pub const fn new(win: u64, loss: u64, draw: u64) -> Self {
        Self { win, loss, draw }
    }

    pub fn total(&self) -> u64 {
        self.win + self.loss + self.draw
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally::new(self.win + rhs.win, self.loss + rhs.loss, self.draw + rhs.draw)
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        *self = *self + rhs;
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), Add::add)
    }
}

/// One (board, turn) state in the graph.
///
/// `score` and `tally` only carry meaning once `explored` is set. Children
/// are arena indices, so a node reached by several move orders is shared by
/// all of its parents without any of them owning it.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) board: BoardState,
    pub(crate) turn: Player,
    pub(crate) explored: bool,
    pub(crate) score: Score,
    pub(crate) tally: Tally,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(board: BoardState, turn: Player) -> Self {
        Self {
            board,
            turn,
            explored: false,
            score: 0,
            tally: Tally::default(),
            children: Vec::new(),
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Player to move in this state
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn key(&self) -> StateKey {
        self.board.key(self.turn)
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Children in row-major order of the move that produced them
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this is a completed game.
    ///
    /// # Panics
    ///
    /// Panics if the node has not been explored yet; leaf status is unknown
    /// until the builder has expanded or classified it.
    pub fn is_leaf(&self) -> bool {
        assert!(
            self.explored,
            "is_leaf called on unexplored node {}",
            self.key()
        );
        self.children.is_empty()
    }
}
