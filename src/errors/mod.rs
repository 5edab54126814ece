//! Error types and error handling for the front end.
//!
//! This module defines the positioned error type shared by the lexer and the
//! parser. It includes:
//!
//! - Error structures with source position information
//! - Lexical and syntactic error variants
//! - Error names and tips used by the driver when printing diagnostics

pub mod errors;
