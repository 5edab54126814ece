//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for declarations and
//! statements.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by the first token of a block item
//! - NUD (null denotation) handlers for atoms
//! - LED (left denotation) handlers for infix operators
//! - Postfix handlers for calls, indexing and increments
//!
//! Operator precedence itself lives in the token tables.
//!
//! Errors never stop the parser. Soft errors (a missing `;`, `)` or `]`) are
//! recorded where they happen. Hard errors abandon the current construct and
//! travel up as `Err` to the nearest block item or top-level item, where they
//! are recorded and the parser resynchronizes.

use std::collections::HashMap;

use log::{debug, info};

use crate::{
    ast::ast::{IdentifierRole, Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    decl::{is_declaration_start, parse_declaration},
    lookups::{
        create_token_lookups, LEDHandler, LEDLookup, NUDHandler, NUDLookup, PostfixHandler,
        PostfixLookup, StmtHandler, StmtLookup,
    },
};

/// State shared by every parsing function that is not about the token stream.
#[derive(Debug, Default)]
pub struct ParserContext {
    temp_counter: usize,
}

impl ParserContext {
    /// Creates an identifier with a fresh `$I<n>` name, for things the source
    /// leaves unnamed.
    pub fn declare_temp(&mut self, position: Position, role: IdentifierRole) -> Node {
        let name = format!("$I{}", self.temp_counter);
        self.temp_counter += 1;

        Node::identifier(&name, role, position)
    }
}

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for parsing
/// statements and expressions. It reads tokens through an index cursor and
/// collects every error it reports.
pub struct Parser {
    /// The list of tokens to parse, always ending with `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Errors reported so far, in order
    errors: Vec<Error>,
    end_of_input_reported: bool,
    context: ParserContext,
    /// Lookup table for block item handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for atom handlers
    nud_lookup: NUDLookup,
    /// Lookup table for infix operator handlers
    led_lookup: LEDLookup,
    /// Lookup table for postfix operator handlers
    postfix_lookup: PostfixLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// Comment tokens are dropped and an `EOF` token is appended when the
    /// stream does not already end with one.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect();

        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.position)
                .unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                position,
            });
        }

        Parser {
            tokens,
            pos: 0,
            errors: vec![],
            end_of_input_reported: false,
            context: ParserContext::default(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            postfix_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos += 1;
        }

        &self.tokens[index]
    }

    /// Steps back over the last token read.
    pub fn unread(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Index of the current token, used to detect progress.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Consumes a token of the expected kind or fails with `MissingToken`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.missing(expected_kind));
        }

        Ok(self.advance().clone())
    }

    /// Consumes a token of the expected kind, or records `MissingToken` and
    /// carries on as if it had been there.
    pub fn expect_or_report(&mut self, expected_kind: TokenKind) {
        if self.current_token_kind() == expected_kind {
            self.advance();
        } else {
            let error = self.missing(expected_kind);
            self.report(error);
        }
    }

    fn missing(&self, expected: TokenKind) -> Error {
        Error::new(
            ErrorImpl::MissingToken {
                expected,
                found: self.current_token_kind(),
            },
            self.get_position(),
        )
    }

    /// `UnexpectedToken` for the current token.
    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token_kind(),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn report(&mut self, error: Error) {
        debug!("Parser: {}", error);
        self.errors.push(error);
    }

    /// Records that the input ended too early. Nested blocks all notice the
    /// same end of input, so it is only recorded once.
    pub fn report_end_of_input(&mut self) {
        if !self.end_of_input_reported {
            self.end_of_input_reported = true;
            let error = Error::new(ErrorImpl::UnexpectedEndOfInput, self.get_position());
            self.report(error);
        }
    }

    /// Skips tokens up to the end of the broken construct.
    ///
    /// Stops after a `;` or after a skipped `{ ... }` group, and before a
    /// `}`, a statement keyword or `EOF`.
    pub fn synchronize(&mut self) {
        let mut depth = 0usize;

        loop {
            match self.current_token_kind() {
                TokenKind::EOF => return,
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly if depth == 0 => return,
                TokenKind::CloseCurly => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::If | TokenKind::While | TokenKind::Return if depth == 0 => return,
                _ => {}
            }

            self.advance();
        }
    }

    /// Records `error` and resynchronizes, consuming at least one token when
    /// nothing was consumed since `checkpoint`.
    pub fn recover(&mut self, error: Error, checkpoint: usize) {
        self.report(error);

        if self.pos == checkpoint {
            self.advance();
        }
        self.synchronize();
    }

    pub fn context_mut(&mut self) -> &mut ParserContext {
        &mut self.context
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_postfix_lookup(&self) -> &PostfixLookup {
        &self.postfix_lookup
    }

    /// Registers an infix handler for a token.
    pub fn led(&mut self, kind: TokenKind, led_fn: LEDHandler) {
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers an atom handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn postfix(&mut self, kind: TokenKind, postfix_fn: PostfixHandler) {
        self.postfix_lookup.insert(kind, postfix_fn);
    }

    /// Registers a block item handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().position
    }
}

/// Parses a stream of tokens into a syntax tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses top-level declarations until
/// `EOF`. The root is a `Compound` at the start of the source holding one
/// child per top-level item. It is returned together with every error
/// found, even when the input is badly broken.
pub fn parse(tokens: Vec<Token>) -> (Node, Vec<Error>) {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut program = Node::new(NodeKind::Compound, Position::start());

    while parser.has_tokens() {
        let checkpoint = parser.cursor();

        if !is_declaration_start(parser.current_token_kind()) {
            let error = parser.unexpected();
            parser.recover(error, checkpoint);
            continue;
        }

        match parse_declaration(&mut parser) {
            Ok(item) => program.push(item),
            Err(error) => parser.recover(error, checkpoint),
        }
    }

    info!(
        "Parser: {} top-level items, {} errors",
        program.children.len(),
        parser.errors.len()
    );

    (program, parser.errors)
}
