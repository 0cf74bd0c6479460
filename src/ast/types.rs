//! Type system definitions for the AST.
//!
//! This module defines the types the checker writes onto AST nodes:
//!
//! - `Type`, identified purely by its name
//! - `UnderlyingKind`, the representation class derived from a name
//! - `reconcile`, the single consistency rule used for operands,
//!   declarations and comparisons
//!
//! There is no implicit widening: two types are compatible only when their
//! names are equal.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

lazy_static! {
    static ref ARRAY_TYPE: Regex = Regex::new(r"^\[\](.+)$").unwrap();
}

pub const INT: &str = "int";
pub const FLOAT: &str = "float";
pub const BOOL: &str = "bool";
pub const STRING: &str = "string";
pub const FUNC: &str = "func";
pub const VOID: &str = "void";

const ERROR: &str = "<error>";

/// The representation class of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnderlyingKind {
    Integer,
    Float,
    Boolean,
    String,
    Array,
    Function,
    Void,
    /// Written onto nodes whose type could not be determined.
    Unresolved,
}

impl UnderlyingKind {
    /// Whether values of this kind need a generated helper function instead
    /// of an inline instruction.
    pub fn is_complex(&self) -> bool {
        matches!(self, UnderlyingKind::String | UnderlyingKind::Array)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, UnderlyingKind::Integer | UnderlyingKind::Float)
    }
}

/// Maps a type name to its underlying kind, `None` for names the language
/// does not know.
pub fn underlying(name: &str) -> Option<UnderlyingKind> {
    match name {
        INT => Some(UnderlyingKind::Integer),
        FLOAT => Some(UnderlyingKind::Float),
        BOOL => Some(UnderlyingKind::Boolean),
        STRING => Some(UnderlyingKind::String),
        FUNC => Some(UnderlyingKind::Function),
        VOID => Some(UnderlyingKind::Void),
        ERROR => Some(UnderlyingKind::Unresolved),
        _ => {
            let element = ARRAY_TYPE.captures(name)?.get(1)?.as_str();
            match underlying(element)? {
                UnderlyingKind::Void | UnderlyingKind::Unresolved => None,
                _ => Some(UnderlyingKind::Array),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub name: String,
}

impl Type {
    pub fn new(name: &str) -> Self {
        Type {
            name: name.to_string(),
        }
    }

    /// Builds a type from a source-level name, `None` if the name is unknown.
    pub fn resolve(name: &str) -> Option<Self> {
        match underlying(name)? {
            UnderlyingKind::Unresolved => None,
            _ => Some(Type::new(name)),
        }
    }

    pub fn int() -> Self {
        Type::new(INT)
    }

    pub fn float() -> Self {
        Type::new(FLOAT)
    }

    pub fn boolean() -> Self {
        Type::new(BOOL)
    }

    pub fn string() -> Self {
        Type::new(STRING)
    }

    pub fn function() -> Self {
        Type::new(FUNC)
    }

    pub fn void() -> Self {
        Type::new(VOID)
    }

    pub fn error() -> Self {
        Type::new(ERROR)
    }

    pub fn underlying(&self) -> Option<UnderlyingKind> {
        underlying(&self.name)
    }

    pub fn is_error(&self) -> bool {
        self.name == ERROR
    }

    pub fn is_complex(&self) -> bool {
        self.underlying().is_some_and(|kind| kind.is_complex())
    }

    pub fn is_void(&self) -> bool {
        self.name == VOID
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Reconciles the types observed for a group of operands into one.
///
/// Returns the first type when every type has the same name. Otherwise fails
/// with `TypeMismatch` at the position of the first operand that diverges
/// from the first one.
pub fn reconcile(observed: &[(Type, Position)]) -> Result<Type, Error> {
    let Some((first, _)) = observed.first() else {
        return Ok(Type::void());
    };

    for (ty, position) in observed.iter().skip(1) {
        if ty != first {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: first.name.clone(),
                    received: ty.name.clone(),
                },
                position.clone(),
            ));
        }
    }

    Ok(first.clone())
}
