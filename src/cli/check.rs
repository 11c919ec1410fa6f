//! Parse-and-render check command.

use crate::cli::CliError;
use crate::output::{to_json, to_text};
use crate::parser::parse;

/// Options for a check run.
pub struct CheckOptions {
    /// The expression to check
    pub expr: String,
    /// Print the parsed map as JSON instead of surface syntax
    pub json: bool,
    /// Pretty-print the JSON output
    pub pretty: bool,
    /// Only validate syntax, produce no rendering
    pub syntax_only: bool,
}

/// Outcome of a check run.
pub enum CheckResult {
    SyntaxValid,
    Rendered(String),
}

/// Parse the expression and render it canonically (or as JSON).
///
/// The canonical rendering has parameters in sorted name order and join
/// forms already expanded, so it doubles as a normalizer.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let map = parse(&options.expr).map_err(CliError::Parse)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let rendered = if options.json {
        let value = to_json(&map);
        if options.pretty {
            serde_json::to_string_pretty(&value).map_err(CliError::Json)?
        } else {
            serde_json::to_string(&value).map_err(CliError::Json)?
        }
    } else {
        to_text(&map)
    };
    Ok(CheckResult::Rendered(rendered))
}
