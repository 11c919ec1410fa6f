//! Join expansion command.

use crate::cli::CliError;
use crate::output::to_text;
use crate::parser::{parse, parse_list};

/// Parse a list form (join or bracketed list) and render each expanded
/// variant; a single expression renders as one line. When both readings
/// fail, the error that got further through the input wins.
pub fn execute_expand(expr: &str) -> Result<Vec<String>, CliError> {
    match parse_list(expr) {
        Ok(maps) => Ok(maps.iter().map(to_text).collect()),
        Err(list_err) => match parse(expr) {
            Ok(map) => Ok(vec![to_text(&map)]),
            Err(expr_err) => {
                let err = if list_err.offset() > expr_err.offset() {
                    list_err
                } else {
                    expr_err
                };
                Err(CliError::Parse(err))
            }
        },
    }
}
