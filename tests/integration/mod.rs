//! Integration tests for attachment classification and cleanup

mod cli_commands;
mod determinism;
mod parse_matrix;
mod scenarios;
mod support;
