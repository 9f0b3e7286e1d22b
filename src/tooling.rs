//! Tooling & Integration Layer
//!
//! Command-line surface over the library.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, SettingsCommands};
