//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals, terminated or not
//! - Operators and punctuation
//! - Comments, line breaks and positions
//! - Error cases

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{lexer::tokenize, tokens::TokenKind};
use crate::Position;

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, _) = tokenize(source);
    tokens.into_iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "i32 f32 bool str as if else while return pub static type extends dump";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::I32,
            TokenKind::F32,
            TokenKind::Bool,
            TokenKind::Str,
            TokenKind::As,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::Pub,
            TokenKind::Static,
            TokenKind::Type,
            TokenKind::Extends,
            TokenKind::Dump,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_booleans() {
    let (tokens, errors) = tokenize("true false");

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].value, "false");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let (tokens, errors) = tokenize("foo bar baz_123 _underscore CamelCase i32x");

    assert!(errors.is_empty());
    let values: Vec<&str> = tokens[..6].iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "CamelCase", "i32x"]);
    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let (tokens, errors) = tokenize("42 3.14 .5 0 100.5");

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Float);
    assert_eq!(tokens[2].value, ".5");
    assert_eq!(tokens[3].kind, TokenKind::Integer);
    assert_eq!(tokens[3].value, "0");
    assert_eq!(tokens[4].kind, TokenKind::Float);
    assert_eq!(tokens[4].value, "100.5");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_second_decimal_point() {
    let (tokens, errors) = tokenize("1.2.3");

    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![TokenKind::Float, TokenKind::Dot, TokenKind::Integer, TokenKind::EOF]
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "MalformedNumber");
    assert_eq!(errors[0].get_position(), &Position::new(1, 4));
}

#[test]
fn test_tokenize_trailing_decimal_point() {
    let (tokens, errors) = tokenize("1.");

    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![TokenKind::Integer, TokenKind::Dot, TokenKind::EOF]
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "MalformedNumber");
}

#[test]
fn test_tokenize_strings() {
    let (tokens, errors) = tokenize(r#""hello" "world" "multiple words" """#);

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].value, "");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_without_escapes() {
    let (tokens, _) = tokenize(r#""a\nb" x"#);

    assert_eq!(tokens[0].value, "a\\nb");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_unterminated_string() {
    let (tokens, errors) = tokenize("str s = \"abc\ni32 x;");

    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].value, "abc\ni32 x;");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
    assert_eq!(tokens.len(), 5);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnterminatedString");
    assert_eq!(errors[0].get_position(), &Position::new(1, 9));
}

#[test]
fn test_tokenize_lone_quote() {
    let (tokens, errors) = tokenize("\"");

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "");
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_tokenize_two_character_operators() {
    assert_eq!(
        kinds("++ -- -> == <= >= != && || :: ()"),
        vec![
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Arrow,
            TokenKind::Equals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::NotEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::DoubleColon,
            TokenKind::Unit,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_single_character_operators() {
    assert_eq!(
        kinds("+ - * / % = ! < > . ; : , [ ] { } ( )"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Dot,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_greedy_operators() {
    // `+++` is `++` then `+`, and `( )` is not unit
    assert_eq!(
        kinds("a+++b ( )"),
        vec![
            TokenKind::Identifier,
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_incomplete_operator() {
    let (tokens, errors) = tokenize("a & b | c");

    assert_eq!(tokens[1].kind, TokenKind::Undefined);
    assert_eq!(tokens[1].value, "&");
    assert_eq!(tokens[3].kind, TokenKind::Undefined);
    assert_eq!(tokens[3].value, "|");

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].get_error_name(), "IncompleteOperator");
    assert_eq!(errors[0].get_position(), &Position::new(1, 3));
    assert_eq!(errors[1].get_position(), &Position::new(1, 7));
}

#[test]
fn test_tokenize_unrecognised_characters() {
    let (tokens, errors) = tokenize("a # é b");

    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
    assert_eq!(tokens[1].position, Position::new(1, 7));

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].get_error_name(), "UnrecognisedToken");
    assert_eq!(errors[0].message(), "unrecognised token: \"#\"");
    assert_eq!(errors[1].message(), "unrecognised token: \"é\"");
    assert_eq!(errors[1].get_position(), &Position::new(1, 5));
}

#[test]
fn test_tokenize_comments() {
    let (tokens, errors) = tokenize("// hi\ni32 x; // trailing\n");

    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![TokenKind::I32, TokenKind::Identifier, TokenKind::Semicolon, TokenKind::EOF]
    );
    assert_eq!(tokens[0].position, Position::new(2, 1));
}

#[test]
fn test_tokenize_positions() {
    let (tokens, _) = tokenize("i32 x = 10;");

    let positions: Vec<Position> = tokens.iter().map(|token| token.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(1, 1),
            Position::new(1, 5),
            Position::new(1, 7),
            Position::new(1, 9),
            Position::new(1, 11),
            Position::new(1, 12),
        ]
    );
}

#[test]
fn test_tokenize_line_breaks() {
    let (tokens, _) = tokenize("a\r\nb\rc\nd\n\n  e");

    let positions: Vec<Position> = tokens.iter().map(|token| token.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(3, 1),
            Position::new(4, 1),
            Position::new(6, 3),
            Position::new(6, 4),
        ]
    );
}

#[test]
fn test_tokenize_empty_source() {
    let (tokens, errors) = tokenize("");

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].position, Position::start());
}

#[test]
fn test_tokenize_function_header() {
    assert_eq!(
        kinds("(i32 a) -> () main {}"),
        vec![
            TokenKind::OpenParen,
            TokenKind::I32,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Arrow,
            TokenKind::Unit,
            TokenKind::Identifier,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_debug_line() {
    let (tokens, _) = tokenize("x ;");

    assert_eq!(tokens[0].debug(), "[1, 1] Identifier (x)");
    assert_eq!(tokens[1].debug(), "[1, 3] Semicolon ()");
}

proptest! {
    #[test]
    fn tokenize_any_text_ends_with_one_eof(source in "\\PC*") {
        let (tokens, _) = tokenize(&source);

        prop_assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
        prop_assert_eq!(tokens.iter().filter(|token| token.kind == TokenKind::EOF).count(), 1);
    }

    #[test]
    fn tokenize_source_like_text(source in "[a-z0-9 .;,(){}\\[\\]+*/%&|!<>=\"\r\n-]{0,80}") {
        let (tokens, _) = tokenize(&source);

        prop_assert_eq!(tokens.iter().filter(|token| token.kind == TokenKind::EOF).count(), 1);
        prop_assert!(tokens.iter().all(|token| token.kind != TokenKind::Comment));
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].position <= pair[1].position);
        }
    }
}
