use chumsky::error::{Simple, SimpleReason};
use itertools::Itertools;
use thiserror::Error;

/// A failure to parse table query SQL. Parsing never recovers partially, so there is at most one
/// of these per call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    /// Character offset into the input where parsing failed.
    pub position: usize,
    /// One-based line of `position`.
    pub line: usize,
    /// One-based column of `position`.
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn from_errors(input: &str, errors: Vec<Simple<char>>) -> ParseError {
        // Chumsky may report several alternatives. The one which got furthest into the input is
        // the most useful to a person reading the message.
        match errors.into_iter().max_by_key(|e| e.span().start) {
            Some(error) => ParseError::at(input, error.span().start, describe(&error)),
            None => ParseError::at(input, 0, "Invalid SQL".to_string()),
        }
    }

    fn at(input: &str, position: usize, message: String) -> ParseError {
        let (line, column) = line_and_column(input, position);
        ParseError {
            position,
            line,
            column,
            message,
        }
    }
}

fn describe(error: &Simple<char>) -> String {
    match error.reason() {
        SimpleReason::Custom(msg) => msg.clone(),
        SimpleReason::Unclosed { delimiter, .. } => format!("Unclosed delimiter '{delimiter}'"),
        SimpleReason::Unexpected => {
            let found = match error.found() {
                Some(c) => format!("Encountered '{c}'"),
                None => "Encountered end of input".to_string(),
            };
            let expected = error
                .expected()
                .filter_map(|c| c.as_ref())
                .sorted()
                .dedup()
                .map(|c| format!("'{c}'"))
                .join(", ");
            if expected.is_empty() {
                found
            } else {
                format!("{found}. Was expecting one of: {expected}")
            }
        }
    }
}

fn line_and_column(input: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for c in input.chars().take(position) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}
