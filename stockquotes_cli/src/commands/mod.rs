//! CLI subcommand implementations.

pub mod history;
