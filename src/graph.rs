//! Memoized state graph of every position reachable from a starting state
//!
//! The graph is a flat arena of [`Node`]s plus an index from [`StateKey`] to
//! arena slot. It is built once by [`StateGraph::build`] and is read-only
//! afterwards.

mod builder;
pub mod node;

use std::collections::HashMap;

pub use node::{Node, Score, Tally};

use crate::{
    identifiers::{NodeId, StateKey},
    tictactoe::{BoardState, Player},
};

/// Every state reachable from a root, annotated with outcome tallies and
/// minimax scores.
#[derive(Debug, Clone)]
pub struct StateGraph {
    nodes: Vec<Node>,
    index: HashMap<StateKey, NodeId>,
}

impl StateGraph {
    /// Exhaustively explore all games from `start` with `player` to move.
    ///
    /// The start is taken as given; [`BoardState::validate`] rejects
    /// positions no game can reach.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxo::{StateGraph, tictactoe::{BoardState, Player}};
    ///
    /// let graph = StateGraph::build(BoardState::new(), Player::One);
    /// assert_eq!(graph.len(), 5_478);
    /// assert_eq!(graph.root().score(), 0);
    /// ```
    pub fn build(start: BoardState, player: Player) -> Self {
        builder::GraphBuilder::new(start, player).run()
    }

    /// The starting state. The builder always allocates it first.
    pub fn root_id(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn root(&self) -> &Node {
        self.node(self.root_id())
    }

    /// Node at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn id_of(&self, key: StateKey) -> Option<NodeId> {
        self.index.get(&key).copied()
    }

    pub fn get(&self, key: StateKey) -> Option<&Node> {
        self.id_of(key).map(|id| self.node(id))
    }

    /// Resolve a live (board, turn) pair to its node id
    pub fn lookup(&self, board: &BoardState, turn: Player) -> Option<NodeId> {
        self.id_of(board.key(turn))
    }

    /// Children of `id` in row-major move order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.node(id).children().iter().map(|&child| self.node(child))
    }

    /// Number of distinct (board, turn) states
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    /// Number of distinct completed games (leaf states)
    pub fn terminal_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.children.is_empty())
            .count()
    }

    /// Number of parent-child links, counting shared children once per parent
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.children.len()).sum()
    }
}
