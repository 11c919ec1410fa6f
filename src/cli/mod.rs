//! CLI support for parmap-lang
//!
//! Provides programmatic access to parmap CLI functionality for embedding
//! in other tools.

mod check;
mod expand;

pub use check::{execute_check, CheckOptions, CheckResult};
pub use expand::execute_expand;

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parser error
    Parse(crate::ParseError),
    /// JSON serialization error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No expression provided and stdin is empty"),
        }
    }
}

impl std::error::Error for CliError {}
