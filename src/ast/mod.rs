/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node type, node kinds and identifier roles
/// - visitor: Generic read-only traversal
/// - dot: Graphviz export
/// - printer: Source reconstruction
pub mod ast;
pub mod dot;
pub mod printer;
pub mod visitor;
