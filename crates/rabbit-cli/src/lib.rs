//! Activity statistics CLI library.
//!
//! This crate provides the CLI interface for the rabbit statistics engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, LogEvent};
pub use config::Config;
