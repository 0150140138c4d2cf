//! Agenda CLI library.
//!
//! This crate provides the CLI interface for the agenda scheduler.

mod cli;
pub mod commands;
mod config;
mod seed;

pub use cli::{Cli, Commands, EventFields};
pub use config::Config;
pub use seed::load_seed;
