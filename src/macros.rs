//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_BUILTIN!` - Creates a BuiltinFunction descriptor
//!
//! These macros keep the builtin table readable.

/// Creates a BuiltinFunction descriptor.
///
/// # Arguments
///
/// * `$name` - The name calls refer to
/// * `$param` - The parameter type names, in order
/// * `$ret` - The return type name
///
/// # Example
///
/// ```ignore
/// let pow = MK_BUILTIN!("pow", [FLOAT, FLOAT], FLOAT);
/// ```
#[macro_export]
macro_rules! MK_BUILTIN {
    ($name:expr, [$($param:expr),*], $ret:expr) => {
        BuiltinFunction {
            name: String::from($name),
            params: vec![$(Type::new($param)),*],
            ret: Type::new($ret),
        }
    };
}
