//! Token definitions shared with the external lexer.
//!
//! Scanning itself happens outside this crate. What remains here is the
//! operator token set the AST refers to:
//!
//! - Operator token kinds and their source symbols
//! - Canonical operator names used to build operator signatures

pub mod tokens;
