//! Code generation module for the compiler.
//!
//! This module lowers a checked program into an LLVM module. It handles:
//!
//! - Type conversion from language types to LLVM types
//! - Builtin, string literal and user function declarations
//! - Deduplication of operator signatures and helper declarations for
//!   operators on complex types

pub mod compiler;
pub mod globals;
pub mod operators;
pub mod registry;
