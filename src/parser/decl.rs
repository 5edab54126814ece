use log::debug;

use crate::{
    ast::ast::{IdentifierRole, Node, NodeKind},
    errors::errors::Error,
    lexer::tokens::{BindingPower, TokenKind},
};

use super::{
    expr::parse_expr,
    parser::Parser,
    stmt::parse_block,
    types::{parse_function_type_name, parse_type_name},
};

/// Whether `kind` can start a top-level item.
pub fn is_declaration_start(kind: TokenKind) -> bool {
    kind == TokenKind::OpenParen || kind.is_primitive_type()
}

/// A function declaration (starting with `(` or `()`) or a variable definition.
pub fn parse_declaration(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenParen | TokenKind::Unit => parse_function_declaration(parser),
        _ => parse_variable_definition(parser),
    }
}

/// `type name`, with the identifier role chosen by the caller.
pub fn parse_variable_declaration(
    parser: &mut Parser,
    role: IdentifierRole,
) -> Result<Node, Error> {
    let type_node = parse_type_name(parser)?;
    let name = parser.expect(TokenKind::Identifier)?;

    Ok(Node::with_children(
        NodeKind::Declaration,
        type_node.position,
        vec![type_node, Node::identifier(&name.value, role, name.position)],
    ))
}

/// `type name;` or `type name = value;`.
pub fn parse_variable_definition(parser: &mut Parser) -> Result<Node, Error> {
    let declaration = parse_variable_declaration(parser, IdentifierRole::Variable)?;

    match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            Ok(declaration)
        }
        TokenKind::Assignment => {
            parser.advance();
            let value = parse_expr(parser, BindingPower::Comma.level())?;
            parser.expect_or_report(TokenKind::Semicolon);

            Ok(Node::with_children(
                NodeKind::Assign,
                declaration.position,
                vec![declaration, value],
            ))
        }
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_function_declaration(parser: &mut Parser) -> Result<Node, Error> {
    let function_type = parse_function_type_name(parser)?;
    let name = parser.expect(TokenKind::Identifier)?;
    debug!("Parser: function `{}` at {}", name.value, name.position);

    let body = parse_block(parser)?;

    Ok(Node::with_children(
        NodeKind::Declaration,
        function_type.position,
        vec![
            function_type,
            Node::identifier(&name.value, IdentifierRole::Function, name.position),
            body,
        ],
    ))
}
