#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based line/column pair. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Position of the first character of any source.
    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.line, self.column)
    }
}

/// Runs the lexer and the parser over `source`.
///
/// Lexical diagnostics come first, followed by syntactic ones, each group in
/// the order it was detected.
pub fn parse_source(source: &str) -> (Node, Vec<Error>) {
    let (tokens, mut errors) = tokenize(source);
    let (program, parse_errors) = parse(tokens);
    errors.extend(parse_errors);

    (program, errors)
}

/// Returns the text of the 1-based `line` of `source`, without its line break.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']))
        .nth(line as usize - 1)
}

/// Renders an error the way the driver prints it:
///
/// ```text
/// Error: UnrecognisedToken (unrecognised token: "#")
/// -> final.ppl
///    |
/// 20 | let a = #;
///    | --------^
/// ```
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    let position = error.get_position();
    let line_text = get_line_at_position(source, position.line).unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.message()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}\n", file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", format_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";

        assert_eq!(get_line_at_position(source, 1), Some("Hello, world!"));
        assert_eq!(get_line_at_position(source, 2), Some("second"));
        assert_eq!(get_line_at_position(source, 3), Some(""));
        assert_eq!(get_line_at_position(source, 4), Some("Testing { }"));
        assert_eq!(get_line_at_position(source, 0), None);
        assert_eq!(get_line_at_position(source, 9), None);
    }

    #[test]
    fn test_get_line_at_position_with_carriage_returns() {
        let source = "first\rsecond\r\nthird";

        assert_eq!(get_line_at_position(source, 2), Some("second"));
        assert_eq!(get_line_at_position(source, 3), Some("third"));
    }

    #[test]
    fn test_format_error_points_at_column() {
        let source = "i32 x = 1;\n  i32 y = #;\n";
        let (_, errors) = parse_source(source);
        let rendered = format_error(&errors[0], source, "final.ppl");

        assert!(rendered.starts_with("Error: UnrecognisedToken"));
        assert!(rendered.contains("-> final.ppl"));
        assert!(rendered.contains("2 | i32 y = #;"));
        assert!(rendered.ends_with("  | --------^\n"));
    }

    #[test]
    fn test_parse_source_collects_both_phases() {
        let (program, errors) = parse_source("i32 x = 1 & 2;");

        // `&` survives as an undefined token: missing `;` before it, then the
        // stray `& 2;` is skipped as one unexpected item.
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].get_error_name(), "IncompleteOperator");
        assert_eq!(errors[1].get_error_name(), "MissingToken");
        assert_eq!(errors[2].get_error_name(), "UnexpectedToken");
        assert_eq!(program.children.len(), 1);
    }
}
