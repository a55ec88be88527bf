//! Daily app usage CLI library.
//!
//! This crate provides the CLI interface and file-backed collaborators for
//! the usage core.

mod cli;
pub mod commands;
mod config;
pub mod sources;

pub use cli::{AppsAction, Cli, Commands, UsageArgs};
pub use config::Config;
