//! CLI infrastructure for the oxo engine
//!
//! This module provides the command-line interface for playing against the
//! engine and for inspecting the state graph it searches.

pub mod commands;
pub mod output;
pub mod prompt;
