//! Namespace members

use crate::binder::{
    BasesBeingResolved, LookupEnv, LookupScope, NameSet, assert_clear, consider_candidates,
};
use crate::diagnostics::UseSiteDiagnostics;
use crate::error::Cancelled;
use crate::options::LookupOptions;
use crate::request::ScopeQuery;
use crate::result::LookupResult;
use rv_symbols::{SymbolId, SymbolTable};

/// Types and nested namespaces declared directly in one namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceScope {
    namespace: SymbolId,
}

impl NamespaceScope {
    /// Scope over the members of `namespace`
    #[must_use]
    pub fn new(namespace: SymbolId) -> Self {
        Self { namespace }
    }

    /// The namespace symbol
    #[must_use]
    pub fn namespace(self) -> SymbolId {
        self.namespace
    }
}

impl LookupScope for NamespaceScope {
    fn can_consider(&self, options: LookupOptions) -> bool {
        !options.intersects(LookupOptions::LABELS_ONLY | LookupOptions::NAMESPACE_ALIASES_ONLY)
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
        let candidates = env.symbols.members_named(self.namespace, query.name);
        consider_candidates(result, candidates, query, env, sink);
        Ok(())
    }

    fn add_lookup_names(&self, options: LookupOptions, symbols: &SymbolTable, names: &mut NameSet) {
        if !self.can_consider(options) {
            return;
        }
        if let Some(members) = symbols.members(self.namespace) {
            names.extend(members.names());
        }
    }
}
