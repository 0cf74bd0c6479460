//! Type checking and semantic analysis module.
//!
//! This module performs name resolution and type inference on the AST,
//! writing the inferred type onto every node in place. It:
//!
//! - Links every block and identifier to its lexical scope
//! - Verifies operand, declaration and argument types
//! - Resolves calls against user functions, then builtins
//! - Collects string literals and operator uses for the code generator
//!
//! Scopes live in an arena and refer to their parent by index.

pub mod builtins;
pub mod program;
pub mod scope;
pub mod type_checker;

#[cfg(test)]
mod tests;
