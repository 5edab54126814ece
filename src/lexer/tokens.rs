use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("i32", TokenKind::I32);
        map.insert("f32", TokenKind::F32);
        map.insert("bool", TokenKind::Bool);
        map.insert("str", TokenKind::Str);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map.insert("as", TokenKind::As);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("pub", TokenKind::Pub);
        map.insert("static", TokenKind::Static);
        map.insert("type", TokenKind::Type);
        map.insert("extends", TokenKind::Extends);
        map.insert("dump", TokenKind::Dump);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Undefined,
    EOF,
    Comment,

    Identifier,
    Unit, // ()
    Integer,
    Float,
    Boolean,
    String,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Colon,
    DoubleColon,
    Comma,
    Arrow,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Primitive types
    I32,
    F32,
    Bool,
    Str,

    // Reserved
    As,
    If,
    Else,
    While,
    Return,
    Pub,
    Static,
    Type,
    Extends,
    Dump,
}

/// Precedence levels shared by the prefix, postfix and infix tables.
/// Missing numbers are unused levels.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(i32)]
pub enum BindingPower {
    Comma = 0,
    Assignment = 1,
    LogicalOr = 2,
    LogicalAnd = 3,
    Equality = 6,
    Relational = 7,
    Additive = 11,
    Multiplicative = 12,
    Unary = 14,
    Postfix = 15,
    Scope = 16,
}

impl BindingPower {
    pub fn level(self) -> i32 {
        self as i32
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Associativity {
    LeftToRight,
    RightToLeft,
}

impl TokenKind {
    /// Prefix operators all share one level and always associate right to left.
    pub fn prefix_precedence(&self) -> Option<i32> {
        match self {
            TokenKind::Plus
            | TokenKind::Dash
            | TokenKind::Not
            | TokenKind::MinusMinus
            | TokenKind::PlusPlus => Some(BindingPower::Unary.level()),
            _ => None,
        }
    }

    /// Postfix operators, calls and indexing; always left to right.
    pub fn postfix_precedence(&self) -> Option<i32> {
        match self {
            TokenKind::PlusPlus
            | TokenKind::MinusMinus
            | TokenKind::OpenBracket
            | TokenKind::OpenParen
            | TokenKind::Unit => Some(BindingPower::Postfix.level()),
            _ => None,
        }
    }

    pub fn infix_precedence(&self) -> Option<i32> {
        let bp = match self {
            TokenKind::Comma => BindingPower::Comma,
            TokenKind::Assignment => BindingPower::Assignment,
            TokenKind::Or => BindingPower::LogicalOr,
            TokenKind::And => BindingPower::LogicalAnd,
            TokenKind::Equals | TokenKind::NotEquals => BindingPower::Equality,
            TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEquals
            | TokenKind::GreaterEquals => BindingPower::Relational,
            TokenKind::Plus | TokenKind::Dash => BindingPower::Additive,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
                BindingPower::Multiplicative
            }
            TokenKind::As | TokenKind::Dot => BindingPower::Postfix,
            TokenKind::DoubleColon => BindingPower::Scope,
            _ => return None,
        };

        Some(bp.level())
    }

    pub fn infix_associativity(&self) -> Associativity {
        match self {
            TokenKind::Assignment => Associativity::RightToLeft,
            _ => Associativity::LeftToRight,
        }
    }

    /// Tokens that name a primitive type, including unit.
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Unit | TokenKind::I32 | TokenKind::F32 | TokenKind::Bool | TokenKind::Str
        )
    }

    /// Source spelling of fixed-text tokens.
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            TokenKind::Unit => "()",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::DoubleColon => "::",
            TokenKind::Comma => ",",
            TokenKind::Arrow => "->",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::I32 => "i32",
            TokenKind::F32 => "f32",
            TokenKind::Bool => "bool",
            TokenKind::Str => "str",
            TokenKind::As => "as",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::Pub => "pub",
            TokenKind::Static => "static",
            TokenKind::Type => "type",
            TokenKind::Extends => "extends",
            TokenKind::Dump => "dump",
            _ => return None,
        };

        Some(symbol)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One-line description used by the driver's token dump.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::Boolean,
            TokenKind::Undefined,
        ]) {
            format!("{} {} ({})", self.position, self.kind, self.value)
        } else {
            format!("{} {} ()", self.position, self.kind)
        }
    }
}
