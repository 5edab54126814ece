//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a tree of [`Node`](crate::ast::ast::Node)s. It uses a Pratt parser
//! for expressions with operator precedence and associativity taken from
//! the token tables, and handles:
//!
//! - Declaration parsing (functions, variables, parameter lists)
//! - Statement parsing (blocks, branches, loops, returns)
//! - Expression parsing (prefix, postfix and infix operators, calls, literals)
//! - Type name parsing for declarations and casts
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing, plus a table of postfix handlers.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
