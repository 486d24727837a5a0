//! Scope binder chains
//!
//! Every lexical nesting level (namespace, imports, type declaration, type
//! parameter list, member body, block, lambda) is one [`Binder`] linked to the
//! binder of the enclosing level. A binder knows only its own declarations;
//! walking the chain is the resolver's job (see [`crate::lookup`]).

use crate::cancel::CancellationFlag;
use crate::diagnostics::UseSiteDiagnostics;
use crate::error::Cancelled;
use crate::options::LookupOptions;
use crate::request::ScopeQuery;
use crate::result::LookupResult;
use crate::scopes::{ImportScope, LocalScope, NamespaceScope, TypeParameterScope, TypeScope};
use crate::viability::check_viability;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use rv_intern::Name;
use rv_symbols::{SymbolId, SymbolTable};
use std::iter;
use std::sync::Arc;

/// Ordered set of names, innermost scope first
pub type NameSet = IndexSet<Name, FxBuildHasher>;

/// Shared, read-only inputs of a lookup
#[derive(Debug, Clone, Copy)]
pub struct LookupEnv<'env> {
    /// Declared symbols
    pub symbols: &'env SymbolTable,
    /// Raised to abandon the lookup
    pub cancel: &'env CancellationFlag,
}

/// Types whose bases are currently being searched, outermost first
///
/// Reaching a type that is already on the stack means the base types form a
/// cycle.
#[derive(Debug, Clone, Default)]
pub struct BasesBeingResolved {
    stack: IndexSet<SymbolId, FxBuildHasher>,
}

impl BasesBeingResolved {
    /// An empty stack
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `ty` is being searched further up the call stack
    #[must_use]
    pub fn contains(&self, ty: SymbolId) -> bool {
        self.stack.contains(&ty)
    }

    /// Enter `ty`; false if it is already being searched
    pub fn push(&mut self, ty: SymbolId) -> bool {
        self.stack.insert(ty)
    }

    /// Leave `ty`, which must be the most recently entered type
    ///
    /// # Panics
    ///
    /// Panics if `ty` is not on top of the stack.
    pub fn pop(&mut self, ty: SymbolId) {
        let top = self.stack.pop();
        assert_eq!(top, Some(ty), "bases popped out of order");
    }

    /// Number of types being searched
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no type is being searched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// The one capability every scope kind provides
pub trait LookupScope {
    /// Whether the scope can contribute anything under `options`
    ///
    /// A scope that answers false is skipped without being searched.
    fn can_consider(&self, _options: LookupOptions) -> bool {
        true
    }

    /// Add the candidates this scope itself declares under `query.name`
    ///
    /// Outer scopes are never consulted. `result` must be clear on entry.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the lookup was cancelled while the scope was
    /// searching base types.
    fn lookup_own_symbols(
        &self,
        result: &mut LookupResult,
        query: &ScopeQuery,
        bases: &mut BasesBeingResolved,
        env: &LookupEnv<'_>,
        sink: &mut UseSiteDiagnostics,
    ) -> Result<(), Cancelled>;

    /// Add the names this scope would contribute under `options`
    fn add_lookup_names(&self, options: LookupOptions, symbols: &SymbolTable, names: &mut NameSet);
}

/// Check each candidate and merge it into `result`, recording use-site
/// problems of every candidate examined
pub(crate) fn consider_candidates(
    result: &mut LookupResult,
    candidates: &[SymbolId],
    query: &ScopeQuery,
    env: &LookupEnv<'_>,
    sink: &mut UseSiteDiagnostics,
) {
    for &candidate in candidates {
        sink.record_symbol(env.symbols, candidate);
        let viability = check_viability(env.symbols, candidate, query);
        result.merge_equal(env.symbols, candidate, viability, query.diagnose);
    }
}

/// Contract check shared by every scope kind
pub(crate) fn assert_clear(result: &LookupResult) {
    assert!(
        result.is_clear(),
        "lookup_own_symbols called with a non-clear result"
    );
}

/// A scope of one of the supported kinds
#[derive(Debug, Clone)]
pub enum ScopeBinder {
    /// Members of a namespace
    Namespace(NamespaceScope),
    /// `using` aliases and imported namespaces
    Imports(ImportScope),
    /// Members of a type declaration and its bases
    Type(TypeScope),
    /// Type parameters of a type or method
    TypeParameters(TypeParameterScope),
    /// Locals, parameters and labels of a body, block or lambda
    Locals(LocalScope),
}

impl LookupScope for ScopeBinder {
    fn can_consider(&self, options: LookupOptions) -> bool {
        match self {
            Self::Namespace(scope) => scope.can_consider(options),
            Self::Imports(scope) => scope.can_consider(options),
            Self::Type(scope) => scope.can_consider(options),
            Self::TypeParameters(scope) => scope.can_consider(options),
            Self::Locals(scope) => scope.can_consider(options),
        }
    }

    fn lookup_own_symbols(
        &self,
        result: &mut LookupResult,
        query: &ScopeQuery,
        bases: &mut BasesBeingResolved,
        env: &LookupEnv<'_>,
        sink: &mut UseSiteDiagnostics,
    ) -> Result<(), Cancelled> {
        match self {
            Self::Namespace(scope) => scope.lookup_own_symbols(result, query, bases, env, sink),
            Self::Imports(scope) => scope.lookup_own_symbols(result, query, bases, env, sink),
            Self::Type(scope) => scope.lookup_own_symbols(result, query, bases, env, sink),
            Self::TypeParameters(scope) => scope.lookup_own_symbols(result, query, bases, env, sink),
            Self::Locals(scope) => scope.lookup_own_symbols(result, query, bases, env, sink),
        }
    }

    fn add_lookup_names(&self, options: LookupOptions, symbols: &SymbolTable, names: &mut NameSet) {
        match self {
            Self::Namespace(scope) => scope.add_lookup_names(options, symbols, names),
            Self::Imports(scope) => scope.add_lookup_names(options, symbols, names),
            Self::Type(scope) => scope.add_lookup_names(options, symbols, names),
            Self::TypeParameters(scope) => scope.add_lookup_names(options, symbols, names),
            Self::Locals(scope) => scope.add_lookup_names(options, symbols, names),
        }
    }
}

impl From<NamespaceScope> for ScopeBinder {
    fn from(scope: NamespaceScope) -> Self {
        Self::Namespace(scope)
    }
}

impl From<ImportScope> for ScopeBinder {
    fn from(scope: ImportScope) -> Self {
        Self::Imports(scope)
    }
}

impl From<TypeScope> for ScopeBinder {
    fn from(scope: TypeScope) -> Self {
        Self::Type(scope)
    }
}

impl From<TypeParameterScope> for ScopeBinder {
    fn from(scope: TypeParameterScope) -> Self {
        Self::TypeParameters(scope)
    }
}

impl From<LocalScope> for ScopeBinder {
    fn from(scope: LocalScope) -> Self {
        Self::Locals(scope)
    }
}

#[derive(Debug)]
struct BinderNode {
    scope: ScopeBinder,
    next: Option<Binder>,
}

/// Handle to one immutable link of a scope chain
///
/// Cloning is cheap; chains built from a common outer binder share it.
#[derive(Debug, Clone)]
pub struct Binder {
    node: Arc<BinderNode>,
}

impl Binder {
    /// The outermost binder of a chain
    pub fn root(scope: impl Into<ScopeBinder>) -> Self {
        Self {
            node: Arc::new(BinderNode {
                scope: scope.into(),
                next: None,
            }),
        }
    }

    /// A new innermost binder whose enclosing binder is `self`
    #[must_use]
    pub fn with(&self, scope: impl Into<ScopeBinder>) -> Self {
        Self {
            node: Arc::new(BinderNode {
                scope: scope.into(),
                next: Some(self.clone()),
            }),
        }
    }

    /// This binder's own scope
    #[must_use]
    pub fn scope(&self) -> &ScopeBinder {
        &self.node.scope
    }

    /// The enclosing binder
    #[must_use]
    pub fn next(&self) -> Option<&Self> {
        self.node.next.as_ref()
    }

    /// This binder followed by every enclosing one
    pub fn iter(&self) -> impl Iterator<Item = &Self> + '_ {
        iter::successors(Some(self), |binder| binder.next())
    }

    /// Number of binders in the chain, counting this one
    #[must_use]
    pub fn depth(&self) -> usize {
        self.iter().count()
    }

    /// Whether both handles point at the same link
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}
