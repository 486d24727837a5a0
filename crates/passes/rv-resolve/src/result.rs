//! Accumulated outcome of a lookup
//!
//! A [`LookupResult`] is filled while scopes are searched and is read-only
//! once the lookup returns. Viable candidates always decide the outcome;
//! rejected candidates are kept alongside them for diagnostics.

use crate::error::ResolutionError;
use crate::viability::{RejectReason, Viability};
use rv_intern::Interner;
use rv_symbols::{SymbolId, SymbolKind, SymbolTable};
use smallvec::SmallVec;

/// Overall state of a [`LookupResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LookupResultKind {
    /// Nothing examined, or nothing found
    #[default]
    Empty,
    /// Only rejected candidates
    NotViable,
    /// One viable symbol, or an overload set
    Viable,
    /// Several distinct viable symbols that are not an overload set
    ///
    /// This is how an ambiguous lookup is reported: [`RejectReason`] has no
    /// ambiguity variant, and the competing symbols are the result's
    /// [`LookupResult::symbols`], which [`LookupResult::to_error`] turns into
    /// [`ResolutionError::Ambiguous`].
    Ambiguous,
}

/// A candidate that was found but not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rejection {
    /// The rejected symbol
    pub symbol: SymbolId,
    /// Why, when the lookup was diagnosing
    pub reason: Option<RejectReason>,
}

/// Result of looking up one name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupResult {
    kind: LookupResultKind,
    symbols: SmallVec<[SymbolId; 1]>,
    rejections: Vec<Rejection>,
}

impl LookupResult {
    /// An empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        self.kind = LookupResultKind::Empty;
        self.symbols.clear();
        self.rejections.clear();
    }

    /// Nothing has been recorded
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.kind == LookupResultKind::Empty
    }

    /// Overall state
    #[must_use]
    pub fn kind(&self) -> LookupResultKind {
        self.kind
    }

    /// One viable symbol or an overload set
    #[must_use]
    pub fn is_viable(&self) -> bool {
        self.kind == LookupResultKind::Viable
    }

    /// Several unrelated viable symbols
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.kind == LookupResultKind::Ambiguous
    }

    /// The symbol, if exactly one viable symbol was found
    #[must_use]
    pub fn single_symbol(&self) -> Option<SymbolId> {
        match (self.kind, self.symbols.as_slice()) {
            (LookupResultKind::Viable, [symbol]) => Some(*symbol),
            _ => None,
        }
    }

    /// Viable symbols in the order they were found
    #[must_use]
    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    /// Rejected candidates in the order they were found
    #[must_use]
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Record one candidate
    ///
    /// A viable candidate displaces a not-viable state. A second viable
    /// candidate with a different identity makes the result ambiguous unless
    /// both are methods, which form an overload set for overload resolution
    /// to pick from. A rejected candidate never displaces a viable one.
    pub fn merge_equal(
        &mut self,
        symbols: &SymbolTable,
        candidate: SymbolId,
        viability: Viability,
        diagnose: bool,
    ) {
        match viability {
            Viability::Viable => self.add_viable(symbols, candidate),
            Viability::NotViable(reason) => self.add_rejection(Rejection {
                symbol: candidate,
                reason: diagnose.then_some(reason),
            }),
        }
    }

    /// Fold in a result found at the same level, such as the lookup in a
    /// sibling base type
    pub fn merge(&mut self, symbols: &SymbolTable, other: Self) {
        for rejection in other.rejections {
            self.add_rejection(rejection);
        }
        for symbol in other.symbols {
            self.add_viable(symbols, symbol);
        }
        if other.kind == LookupResultKind::Ambiguous {
            self.kind = LookupResultKind::Ambiguous;
        }
    }

    fn add_viable(&mut self, symbols: &SymbolTable, candidate: SymbolId) {
        if self.symbols.contains(&candidate) {
            return;
        }
        self.kind = match self.kind {
            LookupResultKind::Empty | LookupResultKind::NotViable => LookupResultKind::Viable,
            LookupResultKind::Viable if self.extends_overload_set(symbols, candidate) => {
                LookupResultKind::Viable
            }
            LookupResultKind::Viable | LookupResultKind::Ambiguous => LookupResultKind::Ambiguous,
        };
        self.symbols.push(candidate);
    }

    fn add_rejection(&mut self, rejection: Rejection) {
        if self.rejections.iter().any(|existing| existing.symbol == rejection.symbol) {
            return;
        }
        self.rejections.push(rejection);
        if self.kind == LookupResultKind::Empty {
            self.kind = LookupResultKind::NotViable;
        }
    }

    fn extends_overload_set(&self, symbols: &SymbolTable, candidate: SymbolId) -> bool {
        symbols[candidate].kind == SymbolKind::Method
            && self
                .symbols
                .iter()
                .all(|&existing| symbols[existing].kind == SymbolKind::Method)
    }

    /// Whether the viable symbols form an overload set rather than a single
    /// symbol
    #[must_use]
    pub fn is_overload_set(&self) -> bool {
        self.kind == LookupResultKind::Viable && self.symbols.len() > 1
    }

    /// Describe a failed lookup of `name`
    ///
    /// Returns `None` for a viable result. An empty result becomes
    /// [`ResolutionError::Undefined`] without suggestions; the resolver adds
    /// them when it has the scope chain at hand.
    #[must_use]
    pub fn to_error(&self, name: &str) -> Option<ResolutionError> {
        match self.kind {
            LookupResultKind::Viable => None,
            LookupResultKind::Empty => Some(ResolutionError::Undefined {
                name: name.to_string(),
                suggestions: Vec::new(),
            }),
            LookupResultKind::Ambiguous => Some(ResolutionError::Ambiguous {
                name: name.to_string(),
                candidates: self.symbols.to_vec(),
            }),
            LookupResultKind::NotViable => {
                let first = self.rejections.first()?;
                Some(ResolutionError::NotViable {
                    name: name.to_string(),
                    symbol: first.symbol,
                    reason: first.reason,
                })
            }
        }
    }

    /// Multi-line rendering for logs and snapshot tests
    #[must_use]
    pub fn describe(&self, symbols: &SymbolTable, interner: &Interner) -> String {
        let mut out = format!("{:?}", self.kind);
        for &symbol in &self.symbols {
            let data = &symbols[symbol];
            out.push_str(&format!("\n  + {} {}", data.kind, interner.resolve(data.name)));
        }
        for rejection in &self.rejections {
            let data = &symbols[rejection.symbol];
            out.push_str(&format!("\n  - {} {}", data.kind, interner.resolve(data.name)));
            if let Some(reason) = rejection.reason {
                out.push_str(&format!(": {reason}"));
            }
        }
        out
    }
}
