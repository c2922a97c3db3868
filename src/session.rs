//! A single human-versus-computer game backed by a fully built state graph

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    Error, Result,
    config::SessionConfig,
    graph::{Node, StateGraph},
    identifiers::NodeId,
    strategy::{Algorithm, TieBreak, select_child},
    tictactoe::{BoardState, Player, Position},
};

/// The engine always plays as player one.
pub const COMPUTER: Player = Player::One;

/// The human always plays as player two.
pub const HUMAN: Player = Player::Two;

/// State of the game from the human's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Win,
    Loss,
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// Classify a node for the human.
    ///
    /// Scores are from the engine's side, so a positive leaf is a loss for
    /// the human and a negative one a win.
    fn of(node: &Node) -> Self {
        if !node.is_leaf() {
            return GameStatus::Ongoing;
        }
        match node.score() {
            1 => GameStatus::Loss,
            -1 => GameStatus::Win,
            _ => GameStatus::Draw,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Win => "win",
            GameStatus::Loss => "loss",
            GameStatus::Draw => "draw",
        };
        f.write_str(label)
    }
}

/// A live game.
///
/// The session owns the state graph it built at construction and never
/// modifies it; every move only swaps the live board and re-resolves the
/// current node by key.
#[derive(Debug, Clone)]
pub struct Session {
    graph: StateGraph,
    board: BoardState,
    turn: Player,
    status: GameStatus,
    current: NodeId,
    tie_break: TieBreak,
    rng: StdRng,
}

/// Start a session on the empty board with `starting_player` to move.
pub fn start_session(starting_player: Player) -> Session {
    Session::new(SessionConfig::new(starting_player))
}

fn seeded_rng(config: SessionConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

impl Session {
    /// Build the full graph from the empty board and start a game.
    pub fn new(config: SessionConfig) -> Self {
        Self::start(BoardState::new(), config, seeded_rng(config))
    }

    /// Like [`Session::new`] but with a caller-supplied random source.
    pub fn with_rng(config: SessionConfig, rng: StdRng) -> Self {
        Self::start(BoardState::new(), config, rng)
    }

    /// Start from an arbitrary position with `config.starting_player` to move.
    ///
    /// The graph is rooted at `board`, so the game may already be over if
    /// the position is terminal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if no game could reach `board` with
    /// that player to move.
    pub fn from_position(board: BoardState, config: SessionConfig) -> Result<Self> {
        board.validate(config.starting_player)?;
        Ok(Self::start(board, config, seeded_rng(config)))
    }

    #[instrument(level = "debug", skip(rng), fields(board = %board.encode(config.starting_player)))]
    fn start(board: BoardState, config: SessionConfig, rng: StdRng) -> Self {
        let graph = StateGraph::build(board, config.starting_player);
        let current = graph.root_id();
        let status = GameStatus::of(graph.root());
        info!(
            states = graph.len(),
            starting_player = %config.starting_player,
            %status,
            "session started"
        );

        Self {
            graph,
            board,
            turn: config.starting_player,
            status,
            current,
            tie_break: config.tie_break,
            rng,
        }
    }

    pub fn current_board(&self) -> &BoardState {
        &self.board
    }

    /// Player to move
    pub fn current_player(&self) -> Player {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.is_over() && self.turn == COMPUTER
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Graph node for the live board and turn
    pub fn current_node(&self) -> &Node {
        self.graph.node(self.current)
    }

    /// Empty cells in row-major order, or nothing once the game has ended.
    ///
    /// Menu indices shown to the human map one-to-one onto this list.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.empty_cells()
    }

    /// Play the human's mark at `position`.
    ///
    /// # Errors
    ///
    /// Returns error without changing any state if the game is over, it is
    /// the computer's turn, or `position` is off the board or occupied.
    #[instrument(level = "debug", skip(self), fields(board = %self.board.encode(self.turn)))]
    pub fn apply_human_move(&mut self, position: Position) -> Result<()> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if self.turn != HUMAN {
            return Err(Error::NotYourTurn);
        }
        if !position.in_bounds() {
            return Err(Error::OutOfBounds { position });
        }
        if !self.board.is_empty(position) {
            return Err(Error::OccupiedCell { position });
        }

        let next = self.board.apply(position, HUMAN);
        self.advance(next)?;
        debug!(%position, status = %self.status, "human moved");
        Ok(())
    }

    /// Let the engine move with `algorithm` and return the cell it played.
    ///
    /// # Errors
    ///
    /// Returns error without changing any state if the game is over or it is
    /// the human's turn.
    #[instrument(level = "debug", skip(self), fields(board = %self.board.encode(self.turn)))]
    pub fn apply_computer_move(&mut self, algorithm: Algorithm) -> Result<Position> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if self.turn != COMPUTER {
            return Err(Error::NotComputerTurn);
        }

        let node = self.graph.node(self.current);
        let children: Vec<&Node> = self.graph.children(self.current).collect();
        let choice = select_child(algorithm, &children, self.tie_break, &mut self.rng)
            .ok_or(Error::NoValidMoves)?;
        let next = *self.graph.node(node.children()[choice]).board();
        let position = self
            .board
            .find_changed_position(&next)
            .ok_or(Error::NoValidMoves)?;

        self.advance(next)?;
        debug!(%position, %algorithm, status = %self.status, "computer moved");
        Ok(position)
    }

    /// Adopt `board`, pass the turn and reclassify.
    ///
    /// The lookup happens before any field is written, so a failure leaves
    /// the session untouched.
    fn advance(&mut self, board: BoardState) -> Result<()> {
        let turn = self.turn.opponent();
        let current = self
            .graph
            .lookup(&board, turn)
            .ok_or_else(|| Error::MissingState {
                label: board.encode(turn),
            })?;

        self.board = board;
        self.turn = turn;
        self.current = current;
        self.status = GameStatus::of(self.graph.node(current));
        Ok(())
    }
}
