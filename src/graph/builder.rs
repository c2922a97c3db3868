//! Iterative construction of the state graph
//!
//! The builder walks the game with an explicit stack instead of recursion.
//! Each node on the stack is visited more than once:
//!
//! 1. a terminal board is classified directly (win, loss or draw);
//! 2. an unexpanded board has its children generated, fresh children are
//!    pushed above it, and it is marked explored *without* being popped;
//! 3. an explored node found on top again means all of its children have
//!    been resolved, so its tally and minimax score are aggregated, it is
//!    memoized under its key, and only then popped.
//!
//! Children whose key is already memoized are linked instead of rebuilt,
//! which turns the game tree into a DAG over distinct (board, turn) states.

use std::{collections::HashMap, time::Instant};

use tracing::{debug, info, instrument};

use super::{
    StateGraph,
    node::{Node, Score, Tally},
};
use crate::{
    identifiers::{NodeId, StateKey},
    tictactoe::{BoardState, Player},
};

pub(crate) struct GraphBuilder {
    nodes: Vec<Node>,
    memo: HashMap<StateKey, NodeId>,
    stack: Vec<NodeId>,
}

impl GraphBuilder {
    pub(crate) fn new(start: BoardState, player: Player) -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            memo: HashMap::new(),
            stack: Vec::new(),
        };
        let root = builder.alloc(start, player);
        builder.stack.push(root);
        builder
    }

    #[instrument(level = "debug", skip(self), fields(start = %self.nodes[0].key()))]
    pub(crate) fn run(mut self) -> StateGraph {
        let started = Instant::now();
        let mut peak_depth = 0;

        while let Some(&id) = self.stack.last() {
            peak_depth = peak_depth.max(self.stack.len());

            let node = &self.nodes[id.index()];
            if !node.explored && node.board.is_terminal() {
                self.classify(id);
            }

            if self.nodes[id.index()].explored {
                self.resolve(id);
            } else {
                self.expand(id);
            }
        }

        debug_assert_eq!(
            self.nodes.len(),
            self.memo.len(),
            "every allocated node is memoized exactly once"
        );

        let graph = StateGraph {
            nodes: self.nodes,
            index: self.memo,
        };
        info!(
            states = graph.len(),
            terminals = graph.terminal_count(),
            edges = graph.edge_count(),
            peak_depth,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "state graph built"
        );
        graph
    }

    fn alloc(&mut self, board: BoardState, turn: Player) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(board, turn));
        id
    }

    /// Score a finished game from player one's perspective.
    fn classify(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.index()];
        let (tally, score) = if node.board.check_win(Player::One) {
            (Tally::WIN, 1)
        } else if node.board.check_win(Player::Two) {
            (Tally::LOSS, -1)
        } else {
            (Tally::DRAW, 0)
        };
        node.tally = tally;
        node.score = score;
        node.explored = true;
    }

    /// Aggregate an explored node from its children, memoize it and pop it.
    fn resolve(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        if !node.children.is_empty() {
            let tally: Tally = node
                .children
                .iter()
                .map(|child| self.nodes[child.index()].tally)
                .sum();
            let scores = node
                .children
                .iter()
                .map(|child| self.nodes[child.index()].score);
            let score = match node.turn {
                Player::One => scores.fold(Score::MIN, Score::max),
                Player::Two => scores.fold(Score::MAX, Score::min),
            };

            let node = &mut self.nodes[id.index()];
            node.tally = tally;
            node.score = score;
        }

        let key = self.nodes[id.index()].key();
        let previous = self.memo.insert(key, id);
        debug_assert!(previous.is_none(), "state {key} memoized twice");
        self.stack.pop();
    }

    /// Generate children in row-major order, pushing the ones not seen yet.
    fn expand(&mut self, id: NodeId) {
        let board = self.nodes[id.index()].board;
        let turn = self.nodes[id.index()].turn;
        let next_turn = turn.opponent();

        let mut children = Vec::new();
        for position in board.empty_cells() {
            let next_board = board.apply(position, turn);
            let key = next_board.key(next_turn);
            let child = match self.memo.get(&key) {
                Some(&existing) => existing,
                None => {
                    let fresh = self.alloc(next_board, next_turn);
                    self.stack.push(fresh);
                    fresh
                }
            };
            children.push(child);
        }

        debug!(
            state = %board.encode(turn),
            children = children.len(),
            "expanded"
        );
        let node = &mut self.nodes[id.index()];
        node.children = children;
        node.explored = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(board: &str, player: Player) -> StateGraph {
        GraphBuilder::new(BoardState::from_string(board).unwrap(), player).run()
    }

    #[test]
    fn one_move_left_links_a_single_child() {
        // X O X / X O O / O X . with player one to move: the last cell draws.
        let graph = build("XOX XOO OX.", Player::One);
        assert_eq!(graph.len(), 2);
        let root = graph.root();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.score(), 0);
        assert_eq!(root.tally(), Tally::DRAW);
    }

    #[test]
    fn immediate_win_position_aggregates_children() {
        // X X . / O O . / O X . with player one to move.
        let graph = build("XX. OO. OX.", Player::One);
        let root = graph.root();
        let children: Vec<&Node> = graph.children(graph.root_id()).collect();

        assert_eq!(children.len(), 3);
        assert_eq!(children[0].score(), 1);
        assert_eq!(children[0].tally(), Tally::new(1, 0, 0));
        assert_eq!(children[1].score(), -1);
        assert_eq!(children[1].tally(), Tally::new(1, 1, 0));
        assert_eq!(children[2].score(), -1);
        assert_eq!(children[2].tally(), Tally::new(0, 2, 0));

        assert_eq!(root.score(), 1);
        assert_eq!(root.tally(), Tally::new(2, 3, 0));
    }

    #[test]
    fn minimizing_player_takes_lowest_child() {
        // Same grid but player two to move: O completes the middle row.
        let graph = build("XX. OO. OX.", Player::Two);
        assert_eq!(graph.root().score(), -1);
    }

    #[test]
    fn transpositions_share_one_node() {
        let graph = build(".........", Player::One);
        let root = graph.root_id();

        // X(0,0) O(1,1) X(2,2) and X(2,2) O(1,1) X(0,0) reach the same state.
        let via_corner = graph.children(root).next().unwrap();
        let via_center = graph.node(via_corner.children()[3]);
        let a = via_center.children()[6];

        let via_far_corner = graph.node(graph.root().children()[8]);
        let via_center = graph.node(via_far_corner.children()[4]);
        let b = via_center.children()[0];

        assert_eq!(a, b);
    }

    #[test]
    fn every_node_is_explored_after_build() {
        let graph = build("X.. .O. ...", Player::One);
        assert!(graph.nodes().all(|(_, node)| node.is_explored()));
    }
}
