//! Members of a type declaration, including inherited ones

use crate::binder::{
    BasesBeingResolved, LookupEnv, LookupScope, NameSet, assert_clear, consider_candidates,
};
use crate::diagnostics::{UseSiteDiagnostic, UseSiteDiagnostics};
use crate::error::Cancelled;
use crate::options::LookupOptions;
use crate::request::ScopeQuery;
use crate::result::LookupResult;
use rustc_hash::FxHashSet;
use rv_symbols::{SymbolId, SymbolTable};

/// Scope of a type body: its members, then members inherited from its bases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeScope {
    ty: SymbolId,
}

impl TypeScope {
    /// Scope over the members of `ty`
    #[must_use]
    pub fn new(ty: SymbolId) -> Self {
        Self { ty }
    }

    /// The type symbol
    #[must_use]
    pub fn ty(self) -> SymbolId {
        self.ty
    }
}

impl LookupScope for TypeScope {
    fn can_consider(&self, options: LookupOptions) -> bool {
        !options.intersects(LookupOptions::LABELS_ONLY | LookupOptions::NAMESPACE_ALIASES_ONLY)
    }

    fn lookup_own_symbols(
        &self,
        result: &mut LookupResult,
        query: &ScopeQuery,
        bases: &mut BasesBeingResolved,
        env: &LookupEnv<'_>,
        sink: &mut UseSiteDiagnostics,
    ) -> Result<(), Cancelled> {
        assert_clear(result);
        lookup_in_type_hierarchy(self.ty, result, query, bases, env, sink)
    }

    fn add_lookup_names(&self, options: LookupOptions, symbols: &SymbolTable, names: &mut NameSet) {
        if !self.can_consider(options) {
            return;
        }
        let mut seen = FxHashSet::default();
        let mut pending = vec![self.ty];
        while let Some(ty) = pending.pop() {
            if !seen.insert(ty) {
                continue;
            }
            if let Some(members) = symbols.members(ty) {
                names.extend(members.names());
            }
            pending.extend(symbols.bases(ty).iter().rev());
        }
    }
}

/// Search `ty` and, if it declares nothing by that name, its base types
///
/// Members of a type hide inherited members of the same name. Results from
/// sibling bases are merged, so the same name inherited along two unrelated
/// paths is ambiguous while a diamond reaching one symbol twice is not.
/// Re-entering a type already on `bases` records an inheritance cycle and
/// contributes nothing.
///
/// # Errors
///
/// Returns [`Cancelled`] if the cancellation flag is raised before a type is
/// searched.
pub fn lookup_in_type_hierarchy(
    ty: SymbolId,
    result: &mut LookupResult,
    query: &ScopeQuery,
    bases: &mut BasesBeingResolved,
    env: &LookupEnv<'_>,
    sink: &mut UseSiteDiagnostics,
) -> Result<(), Cancelled> {
    env.cancel.check()?;
    if !bases.push(ty) {
        tracing::debug!(?ty, "inheritance cycle while searching base types");
        sink.add(UseSiteDiagnostic::InheritanceCycle { ty });
        return Ok(());
    }

    let outcome = search_type(ty, result, query, bases, env, sink);
    bases.pop(ty);
    outcome
}

fn search_type(
    ty: SymbolId,
    result: &mut LookupResult,
    query: &ScopeQuery,
    bases: &mut BasesBeingResolved,
    env: &LookupEnv<'_>,
    sink: &mut UseSiteDiagnostics,
) -> Result<(), Cancelled> {
    consider_candidates(result, env.symbols.members_named(ty, query.name), query, env, sink);
    if !result.is_clear() {
        return Ok(());
    }

    for &base in env.symbols.bases(ty) {
        let mut inherited = LookupResult::new();
        lookup_in_type_hierarchy(base, &mut inherited, query, bases, env, sink)?;
        result.merge(env.symbols, inherited);
    }
    Ok(())
}
