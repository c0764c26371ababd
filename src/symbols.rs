//! Flat registry of declared variables, filled in while emitting.

use std::collections::BTreeMap;

use crate::ast::VarType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub ty: VarType,
    /// Python text generated for the initialiser.
    pub value: String,
}

/// One per generation run. Redeclaring a name replaces the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, ty: VarType, value: impl Into<String>) {
        self.symbols.insert(
            name.to_string(),
            Symbol {
                ty,
                value: value.into(),
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }
}
