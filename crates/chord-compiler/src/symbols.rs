//! Per-file symbol table.
//!
//! The parser registers every declaration it sees as a side effect; the
//! generator later reads the table to decide `await` insertion, constructor
//! detection and static emission. One table per parsed file, never shared.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// What a name was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Variable,
    Function,
    Class,
    Property,
}

/// Modifier flags attached to a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SymbolFlags {
    pub is_async: bool,
    pub is_exported: bool,
    pub is_static: bool,
}

/// A single declared name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub flags: SymbolFlags,
}

/// File-scoped symbol table.
///
/// Re-declaring a name is last-write-wins with no diagnostic; `define`
/// returns the shadowed entry so callers could report it, but the parser
/// deliberately does not.
#[derive(Debug, Default, Serialize)]
pub struct SymbolTable {
    symbols: FxHashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration, replacing any previous entry for the name.
    pub fn define(&mut self, name: &str, kind: SymbolKind, flags: SymbolFlags) -> Option<Symbol> {
        let symbol = Symbol {
            name: name.to_string(),
            kind,
            flags,
        };
        self.symbols.insert(name.to_string(), symbol)
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Flip the exported flag on an already-registered name.
    pub fn mark_exported(&mut self, name: &str) {
        if let Some(symbol) = self.symbols.get_mut(name) {
            symbol.flags.is_exported = true;
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}
