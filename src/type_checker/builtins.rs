//! Functions every program can call without declaring them.

use lazy_static::lazy_static;

use crate::{
    ast::types::{Type, FLOAT, INT, STRING, VOID},
    MK_BUILTIN,
};

lazy_static! {
    static ref BUILTIN_FUNCTIONS: Vec<BuiltinFunction> = vec![
        MK_BUILTIN!("print", [STRING], VOID),
        MK_BUILTIN!("println", [STRING], VOID),
        MK_BUILTIN!("input", [], STRING),
        MK_BUILTIN!("len", [STRING], INT),
        MK_BUILTIN!("exit", [INT], VOID),
        MK_BUILTIN!("abs", [INT], INT),
        MK_BUILTIN!("sqrt", [FLOAT], FLOAT),
        MK_BUILTIN!("pow", [FLOAT, FLOAT], FLOAT),
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFunction {
    pub name: String,
    pub params: Vec<Type>,
    pub ret: Type,
}

/// Read-only table of builtin functions.
///
/// Build it before checking starts and hand the same value to the checker
/// and the compiler.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    functions: Vec<BuiltinFunction>,
}

impl BuiltinRegistry {
    /// The builtins shipped with the language.
    pub fn new() -> Self {
        BuiltinRegistry {
            functions: BUILTIN_FUNCTIONS.clone(),
        }
    }

    pub fn from_functions(functions: Vec<BuiltinFunction>) -> Self {
        BuiltinRegistry { functions }
    }

    pub fn resolve(&self, name: &str) -> Option<&BuiltinFunction> {
        self.functions.iter().find(|function| function.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltinFunction> {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        BuiltinRegistry::new()
    }
}
