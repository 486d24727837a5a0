//! Use-site diagnostics
//!
//! Problems with a symbol's own definition (a missing module, unreadable
//! metadata, an inheritance cycle) surface when a lookup touches the symbol,
//! whether or not it ends up chosen. They are collected in a
//! [`UseSiteDiagnostics`] sink owned by the caller of the lookup.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use rv_intern::Interner;
use rv_symbols::{SymbolId, SymbolTable, UseSiteProblem};

/// One use-site finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseSiteDiagnostic {
    /// The symbol's definition carries a problem
    Problem {
        /// Symbol that was examined
        symbol: SymbolId,
        /// What is wrong with it
        problem: UseSiteProblem,
    },
    /// Base types of `ty` form a cycle
    InheritanceCycle {
        /// Type reached a second time while its bases were being searched
        ty: SymbolId,
    },
}

impl UseSiteDiagnostic {
    /// Human-readable message
    #[must_use]
    pub fn message(&self, symbols: &SymbolTable, interner: &Interner) -> String {
        match *self {
            Self::Problem { symbol, problem } => {
                let name = interner.resolve(symbols[symbol].name);
                match problem {
                    UseSiteProblem::MissingModule { module } => format!(
                        "`{name}` is defined in terms of module `{}`, which is not referenced",
                        interner.resolve(module)
                    ),
                    UseSiteProblem::BadMetadata => {
                        format!("`{name}` has metadata that could not be read")
                    }
                    UseSiteProblem::UnsupportedByLanguage => {
                        format!("`{name}` uses a construct that is not supported")
                    }
                }
            }
            Self::InheritanceCycle { ty } => format!(
                "base types of `{}` form a cycle",
                interner.resolve(symbols[ty].name)
            ),
        }
    }
}

/// Append-only, insertion-ordered set of use-site diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseSiteDiagnostics {
    entries: IndexSet<UseSiteDiagnostic, FxBuildHasher>,
}

impl UseSiteDiagnostics {
    /// An empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic; returns false if it was already present
    pub fn add(&mut self, diagnostic: UseSiteDiagnostic) -> bool {
        self.entries.insert(diagnostic)
    }

    /// Record the use-site problem of `symbol`, if it has one
    pub fn record_symbol(&mut self, symbols: &SymbolTable, symbol: SymbolId) {
        if let Some(problem) = symbols[symbol].use_site_problem {
            self.add(UseSiteDiagnostic::Problem { symbol, problem });
        }
    }

    /// Append everything from `other`, keeping its order
    pub fn extend_from(&mut self, other: &Self) {
        self.entries.extend(other.entries.iter().copied());
    }

    /// Whether `diagnostic` was recorded
    #[must_use]
    pub fn contains(&self, diagnostic: &UseSiteDiagnostic) -> bool {
        self.entries.contains(diagnostic)
    }

    /// Recorded diagnostics in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &UseSiteDiagnostic> + '_ {
        self.entries.iter()
    }

    /// Number of recorded diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the recorded diagnostics
    #[must_use]
    pub fn into_vec(self) -> Vec<UseSiteDiagnostic> {
        self.entries.into_iter().collect()
    }
}
