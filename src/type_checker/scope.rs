use std::collections::HashMap;

use log::trace;

use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Index of a scope inside a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Local,
    Param,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub ty: Type,
    pub kind: VariableKind,
}

impl Variable {
    pub fn new(ty: Type, kind: VariableKind) -> Self {
        Variable { ty, kind }
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    pub variable_lookup: HashMap<String, Variable>,
    pub parent: Option<ScopeId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            variable_lookup: HashMap::new(),
            parent,
        }
    }

    /// Inserts a binding, replacing any binding of the same name in this
    /// scope.
    pub fn declare_variable(&mut self, variable_name: String, variable: Variable) {
        self.variable_lookup.insert(variable_name, variable);
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<&Variable> {
        self.variable_lookup.get(variable_name)
    }
}

/// Owns every scope of a program. Scopes refer to their parent by index.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        ScopeArena { scopes: vec![] }
    }

    pub fn add_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope::new(parent));
        ScopeId(self.scopes.len() - 1)
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes[id.0].parent
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn create(&mut self, scope: ScopeId, name: &str, variable: Variable) {
        trace!("declare `{}: {}` in scope {}", name, variable.ty, scope.0);
        self.scopes[scope.0].declare_variable(name.to_string(), variable);
    }

    /// Finds `name` in `scope` or the nearest ancestor declaring it.
    pub fn lookup(&self, scope: ScopeId, name: &str, position: &Position) -> Result<&Variable, Error> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(variable) = scope.get_variable(name) {
                return Ok(variable);
            }
            current = scope.parent;
        }

        Err(Error::new(
            ErrorImpl::UndefinedSymbol {
                symbol: name.to_string(),
            },
            position.clone(),
        ))
    }
}

/// Attaches scopes to the tree rooted at `node`.
///
/// Every block gets a fresh scope whose parent is `parent`, and its children
/// are linked against that new scope. Identifiers record the scope they
/// appear in. Linking a `Program` makes its contents block the root scope.
pub fn link(node: &mut Node, parent: Option<ScopeId>, scopes: &mut ScopeArena) {
    match &mut node.kind {
        NodeKind::Identifier { scope, .. } => {
            *scope = parent;
        }
        NodeKind::Block { body, scope } => {
            let id = scopes.add_scope(parent);
            *scope = Some(id);
            for child in body.iter_mut() {
                link(child, Some(id), scopes);
            }
        }
        _ => {
            for child in node.children_mut() {
                link(child, parent, scopes);
            }
        }
    }
}
