//! Subcommands.

pub mod generate;
pub mod plugins;
