//! CLI subcommand implementations.

pub mod apps;
pub mod usage;
