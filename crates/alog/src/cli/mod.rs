//! CLI subcommands.

pub mod config;
pub mod emit;
pub mod levels;
pub mod setup;
pub mod sinks;
pub mod stress;
