//! Subcommand implementations.

pub mod board;
pub mod config;
