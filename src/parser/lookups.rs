use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{decl::*, expr::*, parser::Parser, stmt::*, types::parse_type_name};

pub type StmtHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Node, Error>;
/// Called on the operator token with the parsed left operand and the minimum
/// precedence for the right operand.
pub type LEDHandler = fn(&mut Parser, Node, i32) -> Result<Node, Error>;
pub type PostfixHandler = fn(&mut Parser, Node) -> Result<Node, Error>;

const PRIMITIVE_TYPES: [TokenKind; 4] =
    [TokenKind::I32, TokenKind::F32, TokenKind::Bool, TokenKind::Str];

pub fn create_token_lookups(parser: &mut Parser) {
    // Infix: comma, assignment, logical, equality, relational
    parser.led(TokenKind::Comma, parse_binary_expr);
    parser.led(TokenKind::Assignment, parse_binary_expr);
    parser.led(TokenKind::Or, parse_binary_expr);
    parser.led(TokenKind::And, parse_binary_expr);
    parser.led(TokenKind::Equals, parse_binary_expr);
    parser.led(TokenKind::NotEquals, parse_binary_expr);
    parser.led(TokenKind::Less, parse_binary_expr);
    parser.led(TokenKind::LessEquals, parse_binary_expr);
    parser.led(TokenKind::Greater, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, parse_binary_expr);
    parser.led(TokenKind::Dash, parse_binary_expr);
    parser.led(TokenKind::Star, parse_binary_expr);
    parser.led(TokenKind::Slash, parse_binary_expr);
    parser.led(TokenKind::Percent, parse_binary_expr);

    // Member, cast and scope
    parser.led(TokenKind::Dot, parse_binary_expr);
    parser.led(TokenKind::As, parse_binary_expr);
    parser.led(TokenKind::DoubleColon, parse_binary_expr);

    // Postfix
    parser.postfix(TokenKind::OpenParen, parse_call_expr);
    parser.postfix(TokenKind::Unit, parse_unit_call_expr);
    parser.postfix(TokenKind::OpenBracket, parse_index_expr);
    parser.postfix(TokenKind::PlusPlus, parse_postfix_expr);
    parser.postfix(TokenKind::MinusMinus, parse_postfix_expr);

    // Literals and symbols
    parser.nud(TokenKind::Integer, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Boolean, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_symbol_expr);
    parser.nud(TokenKind::Dump, parse_symbol_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::Unit, parse_type_name);
    for kind in PRIMITIVE_TYPES {
        parser.nud(kind, parse_type_name);
    }

    // Block items
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block);
    parser.stmt(TokenKind::OpenParen, parse_function_declaration);
    parser.stmt(TokenKind::Unit, parse_function_declaration);
    for kind in PRIMITIVE_TYPES {
        parser.stmt(kind, parse_variable_definition);
    }
    parser.stmt(TokenKind::Identifier, parse_expression_stmt);
    parser.stmt(TokenKind::Dump, parse_expression_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type PostfixLookup = HashMap<TokenKind, PostfixHandler>;
