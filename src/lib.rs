//! Exhaustive Tic-Tac-Toe engine
//!
//! This crate provides:
//! - An immutable board type with win detection and canonical state keys
//! - A memoized state graph covering every position reachable from a start,
//!   annotated with win/loss/draw tallies and minimax scores
//! - Move selection strategies that read those annotations
//! - A game session tying the graph to a live human-versus-computer game
//! - A small CLI for playing and for inspecting the graph

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod identifiers;
pub mod session;
pub mod strategy;
pub mod tictactoe;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use graph::{Node, Score, StateGraph, Tally};
pub use identifiers::{NodeId, StateKey};
pub use session::{COMPUTER, GameStatus, HUMAN, Session, start_session};
pub use strategy::{Algorithm, TieBreak, select_child};
