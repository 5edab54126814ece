//! Type syntax: primitive and array type names, parameter lists and
//! function types.

use log::debug;

use crate::{
    ast::ast::{IdentifierRole, Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{BindingPower, TokenKind},
};

use super::{expr::parse_expr, parser::Parser};

/// `()`, `i32`, `f32`, `bool` or `str`, optionally followed by array bounds.
pub fn parse_type_name(parser: &mut Parser) -> Result<Node, Error> {
    if !parser.current_token_kind().is_primitive_type() {
        return Err(parser.unexpected());
    }

    let token = parser.advance().clone();

    if token.kind != TokenKind::Unit && parser.current_token_kind() == TokenKind::OpenBracket {
        parser.unread();
        return parse_array_type_name(parser);
    }

    Ok(Node::new(NodeKind::TypeName(token.value), token.position))
}

fn parse_array_type_name(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance().clone();

    let mut array_type = Node::new(NodeKind::ArrayTypeName, token.position);
    array_type.push(Node::new(NodeKind::TypeName(token.value), token.position));

    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        array_type.push(parse_expr(parser, BindingPower::Comma.level())?);
        parser.expect_or_report(TokenKind::CloseBracket);
    }

    Ok(array_type)
}

/// One entry of a parameter list. The name may be left out, in which case a
/// temporary one is made up.
fn parse_parameter(parser: &mut Parser) -> Result<Node, Error> {
    let type_node = parse_type_name(parser)?;
    let position = type_node.position;

    let identifier = match parser.current_token_kind() {
        TokenKind::Identifier => {
            let token = parser.advance();
            Node::identifier(&token.value, IdentifierRole::Parameter, token.position)
        }
        TokenKind::Comma | TokenKind::CloseParen => {
            let limiter = parser.get_position();
            parser.context_mut().declare_temp(limiter, IdentifierRole::Parameter)
        }
        _ => return Err(parser.unexpected()),
    };

    Ok(Node::with_children(NodeKind::Declaration, position, vec![type_node, identifier]))
}

/// `( type name, ... )` with at least one parameter.
pub fn parse_parameter_declaration(parser: &mut Parser) -> Result<Node, Error> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let mut parameters = Node::new(NodeKind::Compound, open.position);

    loop {
        parameters.push(parse_parameter(parser)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => {
                parser.advance();
                break;
            }
            _ => return Err(parser.unexpected()),
        }
    }

    Ok(parameters)
}

/// `params -> return_type`, where `params` is a parameter list or `()`.
pub fn parse_function_type_name(parser: &mut Parser) -> Result<Node, Error> {
    let position = parser.get_position();
    debug!("Parser: function type at {}", position);

    let parameters = if parser.current_token_kind() == TokenKind::Unit {
        let token = parser.advance();
        Node::new(NodeKind::TypeName(token.value.clone()), token.position)
    } else {
        parse_parameter_declaration(parser)?
    };

    parser.expect(TokenKind::Arrow)?;

    let return_type = if parser.current_token_kind().is_primitive_type() {
        let token = parser.advance();
        Node::new(NodeKind::TypeName(token.value.clone()), token.position)
    } else {
        // keep the arity fixed
        let token = parser.advance().clone();
        parser.report(Error::new(
            ErrorImpl::InvalidReturnType { token: token.kind },
            token.position,
        ));
        Node::new(NodeKind::Nop, token.position)
    };

    Ok(Node::with_children(
        NodeKind::FunctionTypeName,
        position,
        vec![parameters, return_type],
    ))
}
