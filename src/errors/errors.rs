use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Human readable description, without the position.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    /// Lexical errors are produced by the lexer, everything else by the parser.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::MalformedNumber { .. }
                | ErrorImpl::UnterminatedString { .. }
                | ErrorImpl::IncompleteOperator { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::IncompleteOperator { .. } => "IncompleteOperator",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingToken { .. } => "MissingToken",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::InvalidReturnType { .. } => "InvalidReturnType",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::MalformedNumber { token } => ErrorTip::Suggestion(format!(
                "Malformed number near `{}`, a `.` must be followed by digits",
                token
            )),
            ErrorImpl::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::IncompleteOperator { token, expected } => ErrorTip::Suggestion(format!(
                "Unknown operator `{}`, did you mean `{}`?",
                token, expected
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::MissingToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {} before {}, did you miss a {}?",
                expected, found, expected
            )),
            ErrorImpl::UnexpectedEndOfInput => {
                ErrorTip::Suggestion(String::from("Input ended inside a block, is a `}` missing?"))
            }
            ErrorImpl::InvalidReturnType { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot be returned, use `()` or a primitive type",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("malformed number: {token:?}")]
    MalformedNumber { token: String },
    #[error("unterminated string literal: {token:?}")]
    UnterminatedString { token: String },
    #[error("incomplete operator {token:?}, expected {expected:?}")]
    IncompleteOperator { token: String, expected: String },
    #[error("unexpected token {token}")]
    UnexpectedToken { token: TokenKind },
    #[error("missing {expected} before {found}")]
    MissingToken { expected: TokenKind, found: TokenKind },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid return type {token}")]
    InvalidReturnType { token: TokenKind },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
}
