use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Called with the lexer positioned at the start of `matched`.
pub type RegexHandler = for<'s> fn(&mut Lexer<'s>, &'s str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            // every pattern is a literal in this file
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    /// Tried in order; the first pattern matching at the cursor wins, so
    /// two-character operators come before their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        RegexPattern::new("^[0-9]+(\\.[0-9]+)?", number_handler),
        RegexPattern::new("^\\.[0-9]+", number_handler),
        RegexPattern::new("^\\s+", skip_handler),
        RegexPattern::new("^\"[^\"]*\"?", string_handler),
        RegexPattern::new("^//[^\\r\\n]*", skip_handler),
        RegexPattern::new("^\\(\\)", MK_DEFAULT_HANDLER!(TokenKind::Unit)),
        RegexPattern::new("^\\+\\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus)),
        RegexPattern::new("^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus)),
        RegexPattern::new("^->", MK_DEFAULT_HANDLER!(TokenKind::Arrow)),
        RegexPattern::new("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        RegexPattern::new("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        RegexPattern::new("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        RegexPattern::new("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        RegexPattern::new("^&&", MK_DEFAULT_HANDLER!(TokenKind::And)),
        RegexPattern::new("^\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or)),
        RegexPattern::new("^::", MK_DEFAULT_HANDLER!(TokenKind::DoubleColon)),
        RegexPattern::new("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        RegexPattern::new("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        RegexPattern::new("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        RegexPattern::new("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        RegexPattern::new("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        RegexPattern::new("^!", MK_DEFAULT_HANDLER!(TokenKind::Not)),
        RegexPattern::new("^<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        RegexPattern::new("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        RegexPattern::new("^\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
        RegexPattern::new("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        RegexPattern::new("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        RegexPattern::new("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        RegexPattern::new("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        RegexPattern::new("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        RegexPattern::new("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        RegexPattern::new("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        RegexPattern::new("^%", MK_DEFAULT_HANDLER!(TokenKind::Percent)),
        RegexPattern::new("^[&|]", incomplete_operator_handler),
    ];
}

pub struct Lexer<'s> {
    tokens: Vec<Token>,
    errors: Vec<Error>,
    source: &'s str,
    pos: usize,
    line: u32,
    column: u32,
    after_carriage_return: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Lexer<'s> {
        Lexer {
            tokens: vec![],
            errors: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            after_carriage_return: false,
        }
    }

    /// Moves past `text`, which must be the source text at the cursor.
    ///
    /// `\n`, `\r` and `\r\n` each count as a single line break.
    pub fn advance(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\n' if self.after_carriage_return => {
                    self.after_carriage_return = false;
                }
                '\n' | '\r' => {
                    self.line += 1;
                    self.column = 1;
                    self.after_carriage_return = c == '\r';
                }
                _ => {
                    self.column += 1;
                    self.after_carriage_return = false;
                }
            }
        }

        self.pos += text.len();
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn error(&mut self, error_impl: ErrorImpl, position: Position) {
        warn!("Lexer: {} at {}", error_impl, position);
        self.errors.push(Error::new(error_impl, position));
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'s str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn number_handler<'s>(lexer: &mut Lexer<'s>, matched: &'s str) {
    let kind = if matched.contains('.') {
        TokenKind::Float
    } else {
        TokenKind::Integer
    };

    lexer.push(MK_TOKEN!(kind, String::from(matched), lexer.position()));
    lexer.advance(matched);

    // A `.` directly after a complete number is either a second decimal point
    // or has no digits after it. Report it and keep it as member access.
    if lexer.at() == Some('.') {
        let position = lexer.position();
        lexer.error(
            ErrorImpl::MalformedNumber {
                token: format!("{}.", matched),
            },
            position,
        );
        lexer.push(MK_TOKEN!(TokenKind::Dot, String::from("."), position));
        lexer.advance(".");
    }
}

fn skip_handler<'s>(lexer: &mut Lexer<'s>, matched: &'s str) {
    lexer.advance(matched);
}

fn string_handler<'s>(lexer: &mut Lexer<'s>, matched: &'s str) {
    let position = lexer.position();
    let terminated = matched.len() >= 2 && matched.ends_with('"');

    let string_literal = if terminated {
        &matched[1..matched.len() - 1]
    } else {
        // the literal swallows everything up to the end of the input
        &matched[1..]
    };

    lexer.push(MK_TOKEN!(TokenKind::String, String::from(string_literal), position));

    if !terminated {
        lexer.error(
            ErrorImpl::UnterminatedString {
                token: String::from(string_literal),
            },
            position,
        );
    }

    lexer.advance(matched);
}

fn symbol_handler<'s>(lexer: &mut Lexer<'s>, matched: &'s str) {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, String::from(matched), lexer.position()));
    lexer.advance(matched);
}

fn incomplete_operator_handler<'s>(lexer: &mut Lexer<'s>, matched: &'s str) {
    let position = lexer.position();
    lexer.error(
        ErrorImpl::IncompleteOperator {
            token: String::from(matched),
            expected: matched.repeat(2),
        },
        position,
    );

    lexer.push(MK_TOKEN!(TokenKind::Undefined, String::from(matched), position));
    lexer.advance(matched);
}

/// Scans `source` into tokens.
///
/// Never fails: lexical errors are returned alongside the tokens and scanning
/// carries on after each of them. The token list always ends with one `EOF`.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Error>) {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(remainder)
                .map(|found| (pattern.handler, found.as_str()))
        });

        match matched {
            Some((handler, text)) => handler(&mut lex, text),
            None => {
                let unknown = remainder
                    .char_indices()
                    .nth(1)
                    .map_or(remainder, |(end, _)| &remainder[..end]);
                let position = lex.position();

                lex.error(
                    ErrorImpl::UnrecognisedToken {
                        token: String::from(unknown),
                    },
                    position,
                );
                lex.advance(unknown);
            }
        }
    }

    let position = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), position));

    info!(
        "Lexer: {} lines, {} characters, {} tokens",
        lex.line,
        source.chars().count(),
        lex.tokens.len()
    );

    (lex.tokens, lex.errors)
}
