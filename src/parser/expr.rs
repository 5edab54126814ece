use crate::{
    ast::ast::{IdentifierRole, Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Associativity, BindingPower, Token, TokenKind},
};

use super::parser::Parser;

/// Parses an expression whose operators all bind at least as tight as `min`.
pub fn parse_expr(parser: &mut Parser, min: i32) -> Result<Node, Error> {
    // First parse the prefix operator or the NUD
    let token_kind = parser.current_token_kind();
    let mut left = match token_kind.prefix_precedence() {
        Some(level) => parse_prefix_expr(parser, level)?,
        None => match parser.get_nud_lookup().get(&token_kind).copied() {
            Some(nud) => nud(parser)?,
            None => return Err(parser.unexpected()),
        },
    };

    loop {
        let token_kind = parser.current_token_kind();

        if let Some(level) = token_kind.postfix_precedence() {
            if level < min {
                break;
            }

            match parser.get_postfix_lookup().get(&token_kind).copied() {
                Some(postfix) => left = postfix(parser, left)?,
                None => break,
            }
            continue;
        }

        let level = match token_kind.infix_precedence() {
            Some(level) if level >= min => level,
            _ => break,
        };

        let next_min = match token_kind.infix_associativity() {
            Associativity::LeftToRight => level + 1,
            Associativity::RightToLeft => level,
        };

        match parser.get_led_lookup().get(&token_kind).copied() {
            Some(led) => left = led(parser, left, next_min)?,
            None => break,
        }
    }

    Ok(left)
}

fn operator_error(token: &Token) -> Error {
    Error::new(ErrorImpl::UnexpectedToken { token: token.kind }, token.position)
}

pub fn parse_prefix_expr(parser: &mut Parser, level: i32) -> Result<Node, Error> {
    let operator_token = parser.advance().clone();
    let kind = NodeKind::from_prefix(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    let operand = parse_expr(parser, level)?;

    Ok(Node::with_children(kind, operator_token.position, vec![operand]))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, next_min: i32) -> Result<Node, Error> {
    let operator_token = parser.advance().clone();
    let kind = NodeKind::from_infix(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    let right = parse_expr(parser, next_min)?;

    Ok(Node::with_children(kind, left.position, vec![left, right]))
}

pub fn parse_postfix_expr(parser: &mut Parser, operand: Node) -> Result<Node, Error> {
    let operator_token = parser.advance().clone();
    let kind = NodeKind::from_postfix(operator_token.kind)
        .ok_or_else(|| operator_error(&operator_token))?;

    Ok(Node::with_children(kind, operand.position, vec![operand]))
}

/// Appends the items of a left-nested comma chain in source order.
fn flatten_comma(node: Node, arguments: &mut Vec<Node>) {
    if node.kind != NodeKind::Compound {
        arguments.push(node);
        return;
    }

    let mut items = node.children.into_iter();
    if let Some(first) = items.next() {
        flatten_comma(first, arguments);
    }
    arguments.extend(items);
}

pub fn parse_call_expr(parser: &mut Parser, callee: Node) -> Result<Node, Error> {
    parser.advance();

    let mut call = Node::with_children(NodeKind::FunctionCall, callee.position, vec![callee]);

    if parser.current_token_kind() != TokenKind::CloseParen {
        let arguments = parse_expr(parser, BindingPower::Comma.level())?;
        flatten_comma(arguments, &mut call.children);
    }

    parser.expect_or_report(TokenKind::CloseParen);

    Ok(call)
}

pub fn parse_unit_call_expr(parser: &mut Parser, callee: Node) -> Result<Node, Error> {
    parser.advance();

    Ok(Node::with_children(NodeKind::FunctionCall, callee.position, vec![callee]))
}

pub fn parse_index_expr(parser: &mut Parser, array: Node) -> Result<Node, Error> {
    parser.advance();

    let index = parse_expr(parser, BindingPower::Comma.level())?;
    parser.expect_or_report(TokenKind::CloseBracket);

    Ok(Node::with_children(NodeKind::ArrayAccess, array.position, vec![array, index]))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance().clone();
    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.position,
        )
    };

    let kind = match token.kind {
        TokenKind::Integer => {
            NodeKind::IntLiteral(token.value.parse().map_err(|_| number_error())?)
        }
        TokenKind::Float => {
            let value: f32 = token.value.parse().map_err(|_| number_error())?;
            if !value.is_finite() {
                return Err(number_error());
            }
            NodeKind::FloatLiteral(value)
        }
        TokenKind::String => NodeKind::StringLiteral(token.value.clone()),
        TokenKind::Boolean => NodeKind::BoolLiteral(token.value == "true"),
        _ => return Err(operator_error(&token)),
    };

    Ok(Node::new(kind, token.position))
}

pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance();

    Ok(Node::identifier(&token.value, IdentifierRole::Undefined, token.position))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let expr = parse_expr(parser, BindingPower::Comma.level())?;
    parser.expect_or_report(TokenKind::CloseParen);

    Ok(expr)
}
