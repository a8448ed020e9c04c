//! Assetlens CLI library.
//!
//! Argument parsing, commands and rendering for the `assetlens` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
