//! Locals, parameters and labels

use crate::binder::{
    BasesBeingResolved, LookupEnv, LookupScope, NameSet, assert_clear, consider_candidates,
};
use crate::diagnostics::UseSiteDiagnostics;
use crate::error::Cancelled;
use crate::options::LookupOptions;
use crate::request::ScopeQuery;
use crate::result::LookupResult;
use rv_symbols::{NameTable, SymbolId, SymbolTable};

/// Syntactic construct that opened the scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalScopeKind {
    /// Body of a method, constructor or accessor, holding its parameters
    MemberBody,
    /// `{ ... }` block
    Block,
    /// Lambda, holding its parameters
    Lambda,
}

/// Variables and labels declared directly in one body, block or lambda
///
/// Labels live in their own table and are only visible to label lookups.
/// Locals are never instance members, so a lookup that requires one skips
/// this scope and reaches the members of the enclosing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalScope {
    kind: LocalScopeKind,
    locals: NameTable,
    labels: NameTable,
}

impl LocalScope {
    /// An empty scope of `kind`
    #[must_use]
    pub fn new(kind: LocalScopeKind) -> Self {
        Self {
            kind,
            locals: NameTable::new(),
            labels: NameTable::new(),
        }
    }

    /// An empty block scope
    #[must_use]
    pub fn block() -> Self {
        Self::new(LocalScopeKind::Block)
    }

    /// Declare a local or parameter
    #[must_use]
    pub fn with_local(mut self, symbols: &SymbolTable, local: SymbolId) -> Self {
        self.locals.insert(symbols[local].name, local);
        self
    }

    /// Declare several locals or parameters
    #[must_use]
    pub fn with_locals(self, symbols: &SymbolTable, locals: &[SymbolId]) -> Self {
        locals
            .iter()
            .fold(self, |scope, &local| scope.with_local(symbols, local))
    }

    /// Declare a statement label
    #[must_use]
    pub fn with_label(mut self, symbols: &SymbolTable, label: SymbolId) -> Self {
        self.labels.insert(symbols[label].name, label);
        self
    }

    /// Construct that opened the scope
    #[must_use]
    pub fn kind(&self) -> LocalScopeKind {
        self.kind
    }
}

impl LookupScope for LocalScope {
    fn can_consider(&self, options: LookupOptions) -> bool {
        !options.intersects(LookupOptions::NAMESPACE_ALIASES_ONLY | LookupOptions::MUST_BE_INSTANCE)
    }

    fn lookup_own_symbols(
        &self,
        result: &mut LookupResult,
        query: &ScopeQuery,
        _bases: &mut BasesBeingResolved,
        env: &LookupEnv<'_>,
        sink: &mut UseSiteDiagnostics,
    ) -> Result<(), Cancelled> {
        assert_clear(result);
        let table = if query.options.is_label_lookup() {
            &self.labels
        } else {
            &self.locals
        };
        consider_candidates(result, table.get(query.name), query, env, sink);
        Ok(())
    }

    fn add_lookup_names(&self, options: LookupOptions, _symbols: &SymbolTable, names: &mut NameSet) {
        if !self.can_consider(options) {
            return;
        }
        if options.is_label_lookup() {
            names.extend(self.labels.names());
        } else {
            names.extend(self.locals.names());
        }
    }
}
