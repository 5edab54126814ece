use log::debug;

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::Error,
    lexer::tokens::{BindingPower, TokenKind},
    parser::expr::parse_expr,
};

use super::parser::Parser;

/// Dispatches one block item on its first token.
pub fn parse_block_item(parser: &mut Parser) -> Result<Node, Error> {
    match parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected()),
    }
}

/// `{ item* }`
///
/// Running out of input inside the block is reported, and the items parsed
/// so far are still returned.
pub fn parse_block(parser: &mut Parser) -> Result<Node, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;
    let mut block = Node::new(NodeKind::Compound, open.position);

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => {
                parser.advance();
                return Ok(block);
            }
            TokenKind::EOF => {
                parser.report_end_of_input();
                return Ok(block);
            }
            _ => {}
        }

        let checkpoint = parser.cursor();
        match parse_block_item(parser) {
            Ok(item) => block.push(item),
            Err(error) => parser.recover(error, checkpoint),
        }
    }
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let expr = parse_expr(parser, BindingPower::Comma.level())?;
    parser.expect_or_report(TokenKind::Semicolon);

    Ok(expr)
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().position;
    let mut ret = Node::new(NodeKind::Ret, start);

    if parser.current_token_kind() != TokenKind::Semicolon {
        ret.push(parse_expr(parser, BindingPower::Comma.level())?);
    }

    parser.expect_or_report(TokenKind::Semicolon);

    Ok(ret)
}

/// `if cond { ... } [else { ... } | else if ...]`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().position;
    debug!("Parser: if at {}", start);

    let condition = parse_expr(parser, BindingPower::Comma.level())?;
    let then_body = parse_block(parser)?;

    let mut branch = Node::with_children(NodeKind::Branch, start, vec![condition, then_body]);

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();

        let else_body = if parser.current_token_kind() == TokenKind::If {
            parse_if_stmt(parser)?
        } else {
            parse_block(parser)?
        };
        branch.push(else_body);
    }

    Ok(branch)
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().position;
    debug!("Parser: while at {}", start);

    let guard = parse_expr(parser, BindingPower::Comma.level())?;
    let body = parse_block(parser)?;

    Ok(Node::with_children(NodeKind::Loop, start, vec![guard, body]))
}
