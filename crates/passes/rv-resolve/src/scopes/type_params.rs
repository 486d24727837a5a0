//! Type parameters introduced by a generic type or method

use crate::binder::{
    BasesBeingResolved, LookupEnv, LookupScope, NameSet, assert_clear, consider_candidates,
};
use crate::diagnostics::UseSiteDiagnostics;
use crate::error::Cancelled;
use crate::options::LookupOptions;
use crate::request::ScopeQuery;
use crate::result::LookupResult;
use rv_symbols::{NameTable, SymbolId, SymbolTable};

/// Type parameters are never instance members, labels or aliases
const TYPE_PARAMETER_EXCLUDED: LookupOptions = LookupOptions::NAMESPACE_ALIASES_ONLY
    .union(LookupOptions::MUST_BE_INSTANCE)
    .union(LookupOptions::LABELS_ONLY);

/// Method type parameters are additionally hidden from attributes on the
/// method
const METHOD_TYPE_PARAMETER_EXCLUDED: LookupOptions =
    TYPE_PARAMETER_EXCLUDED.union(LookupOptions::MUST_NOT_BE_METHOD_TYPE_PARAMETER);

/// Which declaration introduced the parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeParameterLevel {
    /// A generic type
    Type,
    /// A generic method
    Method,
}

/// Scope holding one type parameter list
///
/// A name maps to several parameters only when the source redeclares it;
/// every such parameter is offered and the redeclaration is reported by
/// declaration binding, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameterScope {
    owner: SymbolId,
    level: TypeParameterLevel,
    table: NameTable,
    excluded: LookupOptions,
}

impl TypeParameterScope {
    /// Parameters of generic type `owner`
    #[must_use]
    pub fn for_type(symbols: &SymbolTable, owner: SymbolId, parameters: &[SymbolId]) -> Self {
        Self::new(symbols, owner, parameters, TypeParameterLevel::Type)
    }

    /// Parameters of generic method `owner`
    #[must_use]
    pub fn for_method(symbols: &SymbolTable, owner: SymbolId, parameters: &[SymbolId]) -> Self {
        Self::new(symbols, owner, parameters, TypeParameterLevel::Method)
    }

    fn new(
        symbols: &SymbolTable,
        owner: SymbolId,
        parameters: &[SymbolId],
        level: TypeParameterLevel,
    ) -> Self {
        let mut table = NameTable::new();
        for &parameter in parameters {
            table.insert(symbols[parameter].name, parameter);
        }
        let excluded = match level {
            TypeParameterLevel::Type => TYPE_PARAMETER_EXCLUDED,
            TypeParameterLevel::Method => METHOD_TYPE_PARAMETER_EXCLUDED,
        };
        Self {
            owner,
            level,
            table,
            excluded,
        }
    }

    /// The generic type or method
    #[must_use]
    pub fn owner(&self) -> SymbolId {
        self.owner
    }

    /// Type or method level
    #[must_use]
    pub fn level(&self) -> TypeParameterLevel {
        self.level
    }
}

impl LookupScope for TypeParameterScope {
    fn can_consider(&self, options: LookupOptions) -> bool {
        !options.intersects(self.excluded)
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
        consider_candidates(result, self.table.get(query.name), query, env, sink);
        Ok(())
    }

    fn add_lookup_names(&self, options: LookupOptions, _symbols: &SymbolTable, names: &mut NameSet) {
        if self.can_consider(options) {
            names.extend(self.table.names());
        }
    }
}
