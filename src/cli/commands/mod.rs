//! Subcommands of the `oxo` binary

pub mod analyze;
pub mod play;
