//! Multi-valued name tables
//!
//! A name normally maps to one declaration. Redeclarations and overloads are
//! kept side by side in declaration order so that lookups can surface them.

use crate::SymbolId;
use rustc_hash::FxHashMap;
use rv_intern::Name;
use smallvec::SmallVec;

/// Declarations sharing one name, usually exactly one
pub type Candidates = SmallVec<[SymbolId; 1]>;

/// Name → declarations mapping for one scope or container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: FxHashMap<Name, Candidates>,
}

impl NameTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `symbol` under `name`; the same symbol is recorded once
    pub fn insert(&mut self, name: Name, symbol: SymbolId) {
        let candidates = self.entries.entry(name).or_default();
        if !candidates.contains(&symbol) {
            candidates.push(symbol);
        }
    }

    /// Declarations named `name`, in declaration order
    #[must_use]
    pub fn get(&self, name: Name) -> &[SymbolId] {
        self.entries.get(&name).map_or(&[][..], SmallVec::as_slice)
    }

    /// Whether anything is declared under `name`
    #[must_use]
    pub fn contains(&self, name: Name) -> bool {
        self.entries.contains_key(&name)
    }

    /// Distinct names in the table
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.entries.keys().copied()
    }

    /// All `(name, declarations)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Name, &[SymbolId])> + '_ {
        self.entries
            .iter()
            .map(|(name, candidates)| (*name, candidates.as_slice()))
    }

    /// Number of distinct names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table declares nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
