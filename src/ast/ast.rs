use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Position};

/// What an identifier names, as far as the parser can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierRole {
    /// Used inside an expression, not resolved yet.
    Undefined,
    Variable,
    Function,
    Parameter,
}

impl Display for IdentifierRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IdentifierRole::Undefined => "undefined",
            IdentifierRole::Variable => "variable",
            IdentifierRole::Function => "function",
            IdentifierRole::Parameter => "parameter",
        };

        write!(f, "{}", name)
    }
}

/// Node kinds
///
/// Leaf kinds carry their payload. Every other kind gives meaning to the
/// children of its node, in a fixed order:
///
/// - prefix and postfix operators: `[operand]`
/// - binary operators: `[lhs, rhs]`
/// - `Ret`: `[value?]`
/// - `Branch`: `[condition, then, else?]`
/// - `Loop`: `[guard, body]`
/// - `FunctionCall`: `[callee, argument*]`
/// - `ArrayAccess`: `[array, index]`
/// - `ArrayTypeName`: `[element_type, bound+]`
/// - `FunctionTypeName`: `[parameters, return_type]`
/// - `Declaration`: `[type, identifier]` or `[type, identifier, body]`
/// - `Compound`: any number of items
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Nop,
    Identifier { name: String, role: IdentifierRole },
    IntLiteral(i32),
    FloatLiteral(f32),
    StringLiteral(String),
    BoolLiteral(bool),
    TypeName(String),

    // Prefix
    Neg,
    Pos,
    LNot,
    PreIncrement,
    PreDecrement,

    // Postfix
    PostIncrement,
    PostDecrement,

    // Binary
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    LAnd,
    LOr,
    Assign,
    Cast,
    MemberAccess,
    ScopeResolution,

    Ret,
    Branch,
    Loop,
    FunctionCall,
    ArrayAccess,

    ArrayTypeName,
    FunctionTypeName,

    Declaration,
    Compound,
}

impl NodeKind {
    pub fn from_prefix(kind: TokenKind) -> Option<NodeKind> {
        let node_kind = match kind {
            TokenKind::Dash => NodeKind::Neg,
            TokenKind::Plus => NodeKind::Pos,
            TokenKind::Not => NodeKind::LNot,
            TokenKind::PlusPlus => NodeKind::PreIncrement,
            TokenKind::MinusMinus => NodeKind::PreDecrement,
            _ => return None,
        };

        Some(node_kind)
    }

    pub fn from_postfix(kind: TokenKind) -> Option<NodeKind> {
        let node_kind = match kind {
            TokenKind::PlusPlus => NodeKind::PostIncrement,
            TokenKind::MinusMinus => NodeKind::PostDecrement,
            TokenKind::OpenParen | TokenKind::Unit => NodeKind::FunctionCall,
            TokenKind::OpenBracket => NodeKind::ArrayAccess,
            _ => return None,
        };

        Some(node_kind)
    }

    /// The comma maps to `Compound`, threading comma expressions together.
    pub fn from_infix(kind: TokenKind) -> Option<NodeKind> {
        let node_kind = match kind {
            TokenKind::Plus => NodeKind::Add,
            TokenKind::Dash => NodeKind::Sub,
            TokenKind::Star => NodeKind::Mult,
            TokenKind::Slash => NodeKind::Div,
            TokenKind::Percent => NodeKind::Mod,
            TokenKind::Equals => NodeKind::Eq,
            TokenKind::NotEquals => NodeKind::Neq,
            TokenKind::Less => NodeKind::Lt,
            TokenKind::Greater => NodeKind::Gt,
            TokenKind::LessEquals => NodeKind::Lte,
            TokenKind::GreaterEquals => NodeKind::Gte,
            TokenKind::And => NodeKind::LAnd,
            TokenKind::Or => NodeKind::LOr,
            TokenKind::Assignment => NodeKind::Assign,
            TokenKind::Comma => NodeKind::Compound,
            TokenKind::As => NodeKind::Cast,
            TokenKind::Dot => NodeKind::MemberAccess,
            TokenKind::DoubleColon => NodeKind::ScopeResolution,
            _ => return None,
        };

        Some(node_kind)
    }

    /// The token an operator kind was parsed from. Inverse of the `from_*`
    /// mappings for every kind that has a single source operator.
    pub fn operator_token(&self) -> Option<TokenKind> {
        let kind = match self {
            NodeKind::Neg | NodeKind::Sub => TokenKind::Dash,
            NodeKind::Pos | NodeKind::Add => TokenKind::Plus,
            NodeKind::LNot => TokenKind::Not,
            NodeKind::PreIncrement | NodeKind::PostIncrement => TokenKind::PlusPlus,
            NodeKind::PreDecrement | NodeKind::PostDecrement => TokenKind::MinusMinus,
            NodeKind::Mult => TokenKind::Star,
            NodeKind::Div => TokenKind::Slash,
            NodeKind::Mod => TokenKind::Percent,
            NodeKind::Eq => TokenKind::Equals,
            NodeKind::Neq => TokenKind::NotEquals,
            NodeKind::Lt => TokenKind::Less,
            NodeKind::Gt => TokenKind::Greater,
            NodeKind::Lte => TokenKind::LessEquals,
            NodeKind::Gte => TokenKind::GreaterEquals,
            NodeKind::LAnd => TokenKind::And,
            NodeKind::LOr => TokenKind::Or,
            NodeKind::Assign => TokenKind::Assignment,
            NodeKind::Cast => TokenKind::As,
            NodeKind::MemberAccess => TokenKind::Dot,
            NodeKind::ScopeResolution => TokenKind::DoubleColon,
            _ => return None,
        };

        Some(kind)
    }

    pub fn is_prefix(&self) -> bool {
        matches!(
            self,
            NodeKind::Neg
                | NodeKind::Pos
                | NodeKind::LNot
                | NodeKind::PreIncrement
                | NodeKind::PreDecrement
        )
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            NodeKind::Add
                | NodeKind::Sub
                | NodeKind::Mult
                | NodeKind::Div
                | NodeKind::Mod
                | NodeKind::Eq
                | NodeKind::Neq
                | NodeKind::Lt
                | NodeKind::Gt
                | NodeKind::Lte
                | NodeKind::Gte
                | NodeKind::LAnd
                | NodeKind::LOr
                | NodeKind::Assign
                | NodeKind::Cast
                | NodeKind::MemberAccess
                | NodeKind::ScopeResolution
        )
    }
}

/// Source spelling of a float literal: positional digits, always with a `.`.
pub fn float_text(value: f32) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// A node of the syntax tree.
///
/// Children are owned by their parent; the meaning of each child slot is
/// fixed by `kind` (see [`NodeKind`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Node::new(NodeKind::Nop, Position::start())
    }
}

impl Node {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Node {
            kind,
            position,
            children: vec![],
        }
    }

    pub fn with_children(kind: NodeKind, position: Position, children: Vec<Node>) -> Self {
        Node {
            kind,
            position,
            children,
        }
    }

    pub fn identifier(name: &str, role: IdentifierRole, position: Position) -> Self {
        Node::new(
            NodeKind::Identifier {
                name: String::from(name),
                role,
            },
            position,
        )
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Independent copy of the whole subtree.
    pub fn deep_copy(&self) -> Node {
        self.clone()
    }

    /// Short text used by renderers: the operator, keyword or payload.
    pub fn label(&self) -> String {
        let label = match &self.kind {
            NodeKind::Nop => "nop",
            NodeKind::Identifier { name, .. } => return name.clone(),
            NodeKind::IntLiteral(value) => return value.to_string(),
            NodeKind::FloatLiteral(value) => return float_text(*value),
            NodeKind::StringLiteral(value) => return format!("\"{}\"", value),
            NodeKind::BoolLiteral(value) => return value.to_string(),
            NodeKind::TypeName(name) => return name.clone(),
            NodeKind::Neg | NodeKind::Sub => "-",
            NodeKind::Pos | NodeKind::Add => "+",
            NodeKind::LNot => "!",
            NodeKind::PreIncrement => "++_",
            NodeKind::PreDecrement => "--_",
            NodeKind::PostIncrement => "_++",
            NodeKind::PostDecrement => "_--",
            NodeKind::Mult => "*",
            NodeKind::Div => "/",
            NodeKind::Mod => "%",
            NodeKind::Eq => "==",
            NodeKind::Neq => "!=",
            NodeKind::Lt => "<",
            NodeKind::Gt => ">",
            NodeKind::Lte => "<=",
            NodeKind::Gte => ">=",
            NodeKind::LAnd => "&&",
            NodeKind::LOr => "||",
            NodeKind::Assign => "=",
            NodeKind::Cast => "as",
            NodeKind::MemberAccess => ".",
            NodeKind::ScopeResolution => "::",
            NodeKind::Ret => "return",
            NodeKind::Branch => "if",
            NodeKind::Loop => "loop",
            NodeKind::FunctionCall => "fcall",
            NodeKind::ArrayAccess | NodeKind::ArrayTypeName => "[]",
            NodeKind::FunctionTypeName => "→",
            NodeKind::Declaration => "decl",
            NodeKind::Compound => ",",
        };

        String::from(label)
    }

    /// False when evaluating the subtree could have side effects or not
    /// produce a value.
    pub fn is_pure(&self) -> bool {
        let pure_kind = !matches!(
            self.kind,
            NodeKind::FunctionCall
                | NodeKind::Assign
                | NodeKind::Ret
                | NodeKind::Loop
                | NodeKind::PreIncrement
                | NodeKind::PreDecrement
                | NodeKind::PostIncrement
                | NodeKind::PostDecrement
        );

        pure_kind && self.children.iter().all(Node::is_pure)
    }

    /// Structural equality: kinds, payloads and child order, ignoring positions.
    pub fn same_shape(&self, other: &Node) -> bool {
        self.kind == other.kind
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(left, right)| left.same_shape(right))
    }

    /// Number of nodes in the subtree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}

impl Display for Node {
    /// S-expression form, mostly useful in test failures.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.children.is_empty() {
            return write!(f, "{}", self.label());
        }

        write!(f, "({}", self.label())?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}
