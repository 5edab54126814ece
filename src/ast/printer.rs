//! Source reconstruction from a syntax tree.
//!
//! The output re-parses to a tree of the same shape. Parentheses are only
//! emitted where precedence or associativity needs them.

use crate::lexer::tokens::{Associativity, BindingPower};

use super::ast::{Node, NodeKind};

const INDENT: &str = "    ";

/// Atoms never need parentheses.
const ATOM: i32 = i32::MAX;

fn precedence(node: &Node) -> i32 {
    match node.kind {
        NodeKind::Compound => BindingPower::Comma.level(),
        NodeKind::PostIncrement
        | NodeKind::PostDecrement
        | NodeKind::FunctionCall
        | NodeKind::ArrayAccess => BindingPower::Postfix.level(),
        _ if node.kind.is_prefix() => BindingPower::Unary.level(),
        _ => node
            .kind
            .operator_token()
            .and_then(|token| token.infix_precedence())
            .unwrap_or(ATOM),
    }
}

fn associativity(node: &Node) -> Associativity {
    node.kind
        .operator_token()
        .map(|token| token.infix_associativity())
        .unwrap_or(Associativity::LeftToRight)
}

fn is_number(node: &Node) -> bool {
    matches!(node.kind, NodeKind::IntLiteral(_) | NodeKind::FloatLiteral(_))
}

fn is_temp_name(name: &str) -> bool {
    name.starts_with('$')
}

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn program(&mut self, root: &Node) {
        match root.kind {
            NodeKind::Compound => {
                for item in &root.children {
                    self.item(item);
                }
            }
            _ => self.item(root),
        }
    }

    fn item(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Declaration if node.children.len() == 3 => self.function(node),
            NodeKind::Declaration => {
                let text = format!("{};", variable_declaration(node));
                self.line(&text);
            }
            NodeKind::Assign if is_declaration(node.child(0)) => {
                let value = node.child(1).map(|value| expr(value, 0)).unwrap_or_default();
                let text = match node.child(0) {
                    Some(declaration) => {
                        format!("{} = {};", variable_declaration(declaration), value)
                    }
                    None => format!("{};", value),
                };
                self.line(&text);
            }
            NodeKind::Compound if is_comma_expression(node) => {
                let text = format!("{};", expr(node, 0));
                self.line(&text);
            }
            NodeKind::Compound => {
                self.block_opening("");
                self.block_body(node);
            }
            NodeKind::Branch => self.branch(node, ""),
            NodeKind::Loop => {
                let guard = node.child(0).map(|guard| expr(guard, 0)).unwrap_or_default();
                self.block_opening(&format!("while {} ", guard));
                if let Some(body) = node.child(1) {
                    self.block_body(body);
                }
            }
            NodeKind::Ret => {
                let text = match node.child(0) {
                    Some(value) => format!("return {};", expr(value, 0)),
                    None => String::from("return;"),
                };
                self.line(&text);
            }
            _ => {
                let text = format!("{};", expr(node, 0));
                self.line(&text);
            }
        }
    }

    /// Writes `prefix{` on a fresh line; `block_body` closes it.
    fn block_opening(&mut self, prefix: &str) {
        self.line(&format!("{}{{", prefix));
    }

    fn block_body(&mut self, block: &Node) {
        self.indent += 1;
        for item in &block.children {
            self.item(item);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn branch(&mut self, node: &Node, prefix: &str) {
        let condition = node.child(0).map(|condition| expr(condition, 0)).unwrap_or_default();
        self.block_opening(&format!("{}if {} ", prefix, condition));

        self.indent += 1;
        if let Some(then) = node.child(1) {
            for item in &then.children {
                self.item(item);
            }
        }
        self.indent -= 1;

        match node.child(2) {
            Some(otherwise) if otherwise.kind == NodeKind::Branch => {
                self.branch(otherwise, "} else ");
            }
            Some(otherwise) => {
                self.line("} else {");
                self.block_body(otherwise);
            }
            None => self.line("}"),
        }
    }

    fn function(&mut self, node: &Node) {
        let signature = node.child(0).map(function_type).unwrap_or_default();
        let name = node.child(1).map(Node::label).unwrap_or_default();

        self.block_opening(&format!("{} {} ", signature, name));
        if let Some(body) = node.child(2) {
            self.block_body(body);
        }
    }
}

fn is_declaration(node: Option<&Node>) -> bool {
    matches!(node, Some(Node { kind: NodeKind::Declaration, .. }))
}

/// A block item `Compound` that reads back the same as `a, b;`: two or more
/// children, none of them a statement.
fn is_comma_expression(node: &Node) -> bool {
    node.kind == NodeKind::Compound
        && node.children.len() >= 2
        && node.children.iter().all(|child| match child.kind {
            NodeKind::Declaration | NodeKind::Ret | NodeKind::Branch | NodeKind::Loop => false,
            NodeKind::Assign => !is_declaration(child.child(0)),
            NodeKind::Compound => is_comma_expression(child),
            _ => true,
        })
}

fn type_name(node: &Node) -> String {
    match node.kind {
        NodeKind::ArrayTypeName => {
            let mut text = node.child(0).map(type_name).unwrap_or_default();
            for bound in node.children.iter().skip(1) {
                text.push_str(&format!("[{}]", expr(bound, 0)));
            }
            text
        }
        NodeKind::FunctionTypeName => function_type(node),
        NodeKind::Nop => String::from("()"),
        _ => node.label(),
    }
}

fn variable_declaration(node: &Node) -> String {
    let type_text = node.child(0).map(type_name).unwrap_or_default();
    match node.child(1).map(|identifier| &identifier.kind) {
        Some(NodeKind::Identifier { name, .. }) if !is_temp_name(name) => {
            format!("{} {}", type_text, name)
        }
        _ => type_text,
    }
}

fn function_type(node: &Node) -> String {
    let parameters = match node.child(0) {
        Some(parameters) if parameters.kind == NodeKind::Compound => {
            let list: Vec<String> = parameters.children.iter().map(variable_declaration).collect();
            format!("({})", list.join(", "))
        }
        Some(unit) => type_name(unit),
        None => String::from("()"),
    };
    let return_type = node.child(1).map(type_name).unwrap_or_else(|| String::from("()"));

    format!("{} -> {}", parameters, return_type)
}

/// Renders `node` in a context that binds at least as tight as `min`.
fn expr(node: &Node, min: i32) -> String {
    let text = expr_unwrapped(node);
    if precedence(node) < min {
        format!("({})", text)
    } else {
        text
    }
}

fn operand(node: Option<&Node>, min: i32) -> String {
    node.map(|node| expr(node, min)).unwrap_or_default()
}

fn expr_unwrapped(node: &Node) -> String {
    let level = precedence(node);

    match &node.kind {
        NodeKind::Nop
        | NodeKind::TypeName(_)
        | NodeKind::ArrayTypeName
        | NodeKind::FunctionTypeName => type_name(node),
        NodeKind::StringLiteral(value) => format!("\"{}\"", value),
        NodeKind::Compound => {
            let items: Vec<String> = node
                .children
                .iter()
                .enumerate()
                .map(|(index, item)| expr(item, if index == 0 { level } else { level + 1 }))
                .collect();
            items.join(", ")
        }
        NodeKind::PostIncrement | NodeKind::PostDecrement => {
            format!("{}{}", operand(node.child(0), level), symbol(node))
        }
        NodeKind::FunctionCall => {
            let arguments: Vec<String> = node
                .children
                .iter()
                .skip(1)
                .map(|argument| expr(argument, BindingPower::Assignment.level()))
                .collect();
            format!("{}({})", operand(node.child(0), level), arguments.join(", "))
        }
        NodeKind::ArrayAccess => {
            format!("{}[{}]", operand(node.child(0), level), operand(node.child(1), 0))
        }
        kind if kind.is_prefix() => {
            let operand_text = match node.child(0) {
                // `- -a` and `--a` must not run together
                Some(child) if child.kind.is_prefix() => format!("({})", expr_unwrapped(child)),
                child => operand(child, level),
            };
            format!("{}{}", symbol(node), operand_text)
        }
        kind if kind.is_binary() => binary(node, level),
        _ => node.label(),
    }
}

fn binary(node: &Node, level: i32) -> String {
    let (left_min, right_min) = match associativity(node) {
        Associativity::LeftToRight => (level, level + 1),
        Associativity::RightToLeft => (level + 1, level),
    };

    let mut left = operand(node.child(0), left_min);
    let mut right = operand(node.child(1), right_min);

    match node.kind {
        NodeKind::MemberAccess | NodeKind::ScopeResolution => {
            // a number next to `.` would lex as part of the number
            if node.child(0).is_some_and(is_number) && !left.starts_with('(') {
                left = format!("({})", left);
            }
            if node.child(1).is_some_and(is_number) && !right.starts_with('(') {
                right = format!("({})", right);
            }
            format!("{}{}{}", left, symbol(node), right)
        }
        _ => format!("{} {} {}", left, symbol(node), right),
    }
}

fn symbol(node: &Node) -> &'static str {
    node.kind
        .operator_token()
        .and_then(|token| token.symbol())
        .unwrap_or("")
}

/// Renders a whole tree as source text.
pub fn pretty_print(root: &Node) -> String {
    let mut printer = Printer {
        out: String::new(),
        indent: 0,
    };

    printer.program(root);
    printer.out
}
