//! `using` directives of a compilation unit or namespace body

use crate::binder::{
    BasesBeingResolved, LookupEnv, LookupScope, NameSet, assert_clear, consider_candidates,
};
use crate::diagnostics::UseSiteDiagnostics;
use crate::error::Cancelled;
use crate::options::LookupOptions;
use crate::request::ScopeQuery;
use crate::result::LookupResult;
use rv_symbols::{NameTable, SymbolId, SymbolTable};
use smallvec::SmallVec;

/// Aliases and imported namespaces in effect at one nesting level
///
/// Aliases are searched first and hide imported types of the same name.
/// Imported namespaces contribute their types only, never nested
/// namespaces; the same name imported from two namespaces is ambiguous.
#[derive(Debug, Clone, Default)]
pub struct ImportScope {
    aliases: NameTable,
    imports: SmallVec<[SymbolId; 2]>,
}

impl ImportScope {
    /// An empty set of directives
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace alias symbol
    #[must_use]
    pub fn with_alias(mut self, symbols: &SymbolTable, alias: SymbolId) -> Self {
        self.aliases.insert(symbols[alias].name, alias);
        self
    }

    /// Import the types of `namespace`
    #[must_use]
    pub fn with_import(mut self, namespace: SymbolId) -> Self {
        if !self.imports.contains(&namespace) {
            self.imports.push(namespace);
        }
        self
    }

    /// Imported namespaces in directive order
    #[must_use]
    pub fn imports(&self) -> &[SymbolId] {
        &self.imports
    }

    fn imported_types<'scope>(
        &'scope self,
        symbols: &'scope SymbolTable,
        query: &'scope ScopeQuery,
    ) -> impl Iterator<Item = SymbolId> + 'scope {
        self.imports.iter().flat_map(move |&namespace| {
            symbols
                .members_named(namespace, query.name)
                .iter()
                .copied()
                .filter(move |&member| symbols[member].is_type())
        })
    }
}

impl LookupScope for ImportScope {
    fn can_consider(&self, options: LookupOptions) -> bool {
        !options.is_label_lookup()
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
        consider_candidates(result, self.aliases.get(query.name), query, env, sink);
        if !result.is_clear() || query.options.is_alias_lookup() {
            return Ok(());
        }

        let types: SmallVec<[SymbolId; 2]> = self.imported_types(env.symbols, query).collect();
        consider_candidates(result, &types, query, env, sink);
        Ok(())
    }

    fn add_lookup_names(&self, options: LookupOptions, symbols: &SymbolTable, names: &mut NameSet) {
        if !self.can_consider(options) {
            return;
        }
        names.extend(self.aliases.names());
        if options.is_alias_lookup() {
            return;
        }
        for &namespace in &self.imports {
            let Some(members) = symbols.members(namespace) else {
                continue;
            };
            for (name, candidates) in members.iter() {
                if candidates.iter().any(|&member| symbols[member].is_type()) {
                    names.insert(name);
                }
            }
        }
    }
}
