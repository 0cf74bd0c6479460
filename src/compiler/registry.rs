//! Tables of lowered operators, keyed by signature.

use std::collections::HashMap;

use inkwell::values::FunctionValue;

/// One distinct operator signature and how it is lowered.
///
/// Simple entries are emitted inline at each use and carry no function.
/// Complex entries carry the declaration of the helper every use calls.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorEntry<'a> {
    pub signature: String,
    pub ir: Option<FunctionValue<'a>>,
    pub complex: bool,
}

impl<'a> OperatorEntry<'a> {
    pub fn inline(signature: String) -> Self {
        OperatorEntry {
            signature,
            ir: None,
            complex: false,
        }
    }

    pub fn helper(signature: String, ir: FunctionValue<'a>) -> Self {
        OperatorEntry {
            signature,
            ir: Some(ir),
            complex: true,
        }
    }
}

/// Entries in the order their signature was first registered.
#[derive(Debug, Default)]
pub struct OperatorTable<'a> {
    entries: Vec<OperatorEntry<'a>>,
    lookup: HashMap<String, usize>,
}

impl<'a> OperatorTable<'a> {
    pub fn new() -> Self {
        OperatorTable {
            entries: vec![],
            lookup: HashMap::new(),
        }
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.lookup.contains_key(signature)
    }

    pub fn get(&self, signature: &str) -> Option<&OperatorEntry<'a>> {
        self.lookup.get(signature).map(|index| &self.entries[*index])
    }

    /// Adds `entry` unless its signature is already present. Returns whether
    /// the entry was added.
    pub fn register(&mut self, entry: OperatorEntry<'a>) -> bool {
        if self.lookup.contains_key(&entry.signature) {
            return false;
        }
        self.lookup
            .insert(entry.signature.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorEntry<'a>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
