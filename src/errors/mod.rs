//! Error types and error handling for the compiler.
//!
//! This module defines the error types produced by the semantic passes and
//! the lowering stage. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each kind of violation
//! - Short suggestions attached to some errors
//! - The `Reporter` hook errors are handed to as they are found

pub mod errors;
