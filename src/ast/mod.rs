/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node type and the closed set of node kinds
/// - expressions: Constructors for expression nodes
/// - statements: Constructors for statement nodes
/// - types: The type representation written onto nodes by the checker
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
