//! Viability of a single candidate
//!
//! A candidate found by name is viable when it has the shape the lookup asks
//! for and is accessible from the referencing context. Rules are checked in a
//! fixed order and the first failure is the reported reason.

use crate::options::LookupOptions;
use crate::request::{LookupContext, ScopeQuery};
use rv_symbols::{Accessibility, SymbolId, SymbolTable};
use std::fmt;

/// Why a candidate was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// A member that cannot be invoked where an invocation is required
    NotInvocable,
    /// Label lookup found something else
    NotALabel,
    /// Alias lookup found something else
    NotANamespaceAlias,
    /// A type or namespace was required
    NotATypeOrNamespace,
    /// Instance member where a static one is required, or the reverse
    WrongInstanceContext,
    /// Generic arity mismatch
    WrongArity {
        /// Type arguments written at the use site
        requested: u32,
        /// Type parameters the candidate declares
        declared: u32,
    },
    /// Not visible from the referencing context
    Inaccessible,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInvocable => formatter.write_str("is not invocable"),
            Self::NotALabel => formatter.write_str("is not a label"),
            Self::NotANamespaceAlias => formatter.write_str("is not a namespace alias"),
            Self::NotATypeOrNamespace => formatter.write_str("is not a type or namespace"),
            Self::WrongInstanceContext => formatter.write_str("is used in the wrong instance context"),
            Self::WrongArity {
                requested,
                declared,
            } => write!(formatter, "declares {declared} type parameters but {requested} were given"),
            Self::Inaccessible => formatter.write_str("is inaccessible due to its protection level"),
        }
    }
}

/// Outcome of checking one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viability {
    /// Acceptable
    Viable,
    /// Found but unusable
    NotViable(RejectReason),
}

impl Viability {
    /// Whether the candidate was accepted
    #[must_use]
    pub fn is_viable(self) -> bool {
        matches!(self, Self::Viable)
    }
}

/// Check `candidate` against `query`
#[must_use]
pub fn check_viability(symbols: &SymbolTable, candidate: SymbolId, query: &ScopeQuery) -> Viability {
    let data = &symbols[candidate];
    let options = query.options;

    if options.contains(LookupOptions::MUST_BE_INVOCABLE_IF_MEMBER)
        && data.kind.is_member()
        && !data.is_invocable
    {
        return Viability::NotViable(RejectReason::NotInvocable);
    }

    if options.is_label_lookup() {
        if !data.is_label() {
            return Viability::NotViable(RejectReason::NotALabel);
        }
    } else if options.is_alias_lookup() {
        if !data.is_namespace_alias() {
            return Viability::NotViable(RejectReason::NotANamespaceAlias);
        }
    } else if options.contains(LookupOptions::NAMESPACES_OR_TYPES_ONLY)
        && !data.kind.is_namespace_or_type()
    {
        return Viability::NotViable(RejectReason::NotATypeOrNamespace);
    }

    let instance = data.is_instance_member();
    if (options.contains(LookupOptions::MUST_BE_INSTANCE) && !instance)
        || (options.contains(LookupOptions::MUST_NOT_BE_INSTANCE) && instance)
    {
        return Viability::NotViable(RejectReason::WrongInstanceContext);
    }

    let arity_matches = if query.arity > 0 || options.contains(LookupOptions::EXACT_ARITY) {
        data.arity == query.arity
    } else {
        true
    };
    if !arity_matches {
        return Viability::NotViable(RejectReason::WrongArity {
            requested: query.arity,
            declared: data.arity,
        });
    }

    if !is_accessible(symbols, candidate, &query.context) {
        return Viability::NotViable(RejectReason::Inaccessible);
    }

    Viability::Viable
}

/// Whether `symbol` may be referenced from `context`
///
/// A symbol nested in a type is only accessible if every enclosing type is
/// accessible as well.
#[must_use]
pub fn is_accessible(symbols: &SymbolTable, symbol: SymbolId, context: &LookupContext) -> bool {
    let mut current = Some(symbol);
    while let Some(id) = current {
        let containing_type = symbols.containing_type(id);
        if !is_declared_accessibility_ok(symbols, id, containing_type, context) {
            return false;
        }
        current = containing_type;
    }
    true
}

fn is_declared_accessibility_ok(
    symbols: &SymbolTable,
    symbol: SymbolId,
    containing_type: Option<SymbolId>,
    context: &LookupContext,
) -> bool {
    let data = &symbols[symbol];
    let same_module = data.module == context.module;
    let Some(owner) = containing_type else {
        // Top-level declarations are either public or module-visible.
        return data.accessibility == Accessibility::Public || same_module;
    };

    match data.accessibility {
        Accessibility::Public => true,
        Accessibility::Internal => same_module,
        Accessibility::Private => is_within(symbols, context, owner),
        Accessibility::Protected => is_within_or_derived(symbols, context, owner),
        Accessibility::ProtectedInternal => {
            same_module || is_within_or_derived(symbols, context, owner)
        }
        Accessibility::PrivateProtected => {
            same_module && is_within_or_derived(symbols, context, owner)
        }
    }
}

fn is_within(symbols: &SymbolTable, context: &LookupContext, owner: SymbolId) -> bool {
    context
        .within
        .is_some_and(|within| symbols.is_nested_in(within, owner))
}

fn is_within_or_derived(symbols: &SymbolTable, context: &LookupContext, owner: SymbolId) -> bool {
    let mut current = context.within;
    while let Some(ty) = current {
        if ty == owner || symbols.derives_from(ty, owner) {
            return true;
        }
        current = symbols.containing_type(ty);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rv_intern::Interner;
    use rv_symbols::{ModuleId, SymbolData, SymbolKind, SymbolTableBuilder, TypeKind};

    struct Fixture {
        interner: Interner,
        table: SymbolTable,
        outer: SymbolId,
        derived: SymbolId,
        unrelated: SymbolId,
        private_field: SymbolId,
        protected_method: SymbolId,
        internal_field: SymbolId,
        static_method: SymbolId,
        generic: SymbolId,
        label: SymbolId,
    }

    fn fixture() -> Fixture {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let outer = builder.type_decl(global, "Outer", TypeKind::Class, 0);
        let derived = builder.type_decl(global, "Derived", TypeKind::Class, 0);
        let unrelated = builder.type_decl(global, "Unrelated", TypeKind::Class, 0);
        builder.add_base(derived, outer);
        let private_field = builder.member(outer, "secret", SymbolKind::Field, Accessibility::Private);
        let protected_method =
            builder.member(outer, "Hook", SymbolKind::Method, Accessibility::Protected);
        let internal_field =
            builder.member(outer, "shared", SymbolKind::Field, Accessibility::Internal);
        let static_method = builder.add(
            SymbolData::new(builder.name("Create"), SymbolKind::Method)
                .with_container(outer)
                .into_static(),
        );
        let generic = builder.type_decl(global, "List", TypeKind::Class, 1);
        let label = builder.add(SymbolData::new(builder.name("done"), SymbolKind::Label));
        Fixture {
            interner,
            table: builder.finish(),
            outer,
            derived,
            unrelated,
            private_field,
            protected_method,
            internal_field,
            static_method,
            generic,
            label,
        }
    }

    fn query(fixture: &Fixture, symbol: SymbolId) -> ScopeQuery {
        ScopeQuery {
            name: fixture.table[symbol].name,
            arity: 0,
            options: LookupOptions::DEFAULT,
            context: LookupContext::default(),
            diagnose: true,
        }
    }

    #[test]
    fn test_private_member_only_inside_owner() {
        let fx = fixture();
        let mut request = query(&fx, fx.private_field);
        request.context = LookupContext::in_type(ModuleId(0), fx.outer);
        assert_eq!(check_viability(&fx.table, fx.private_field, &request), Viability::Viable);

        request.context = LookupContext::in_type(ModuleId(0), fx.derived);
        assert_eq!(
            check_viability(&fx.table, fx.private_field, &request),
            Viability::NotViable(RejectReason::Inaccessible)
        );
    }

    #[test]
    fn test_protected_member_visible_to_derived() {
        let fx = fixture();
        let mut request = query(&fx, fx.protected_method);
        request.context = LookupContext::in_type(ModuleId(0), fx.derived);
        assert!(check_viability(&fx.table, fx.protected_method, &request).is_viable());

        request.context = LookupContext::in_type(ModuleId(0), fx.unrelated);
        assert!(!check_viability(&fx.table, fx.protected_method, &request).is_viable());
    }

    #[test]
    fn test_internal_member_stops_at_module() {
        let fx = fixture();
        let mut request = query(&fx, fx.internal_field);
        assert!(check_viability(&fx.table, fx.internal_field, &request).is_viable());
        request.context = LookupContext::in_module(ModuleId(1));
        assert_eq!(
            check_viability(&fx.table, fx.internal_field, &request),
            Viability::NotViable(RejectReason::Inaccessible)
        );
    }

    #[test]
    fn test_instance_context() {
        let fx = fixture();
        let mut request = query(&fx, fx.static_method);
        request.options = LookupOptions::MUST_BE_INSTANCE;
        assert_eq!(
            check_viability(&fx.table, fx.static_method, &request),
            Viability::NotViable(RejectReason::WrongInstanceContext)
        );
        request.options = LookupOptions::MUST_NOT_BE_INSTANCE;
        assert!(check_viability(&fx.table, fx.static_method, &request).is_viable());
    }

    #[test]
    fn test_arity_zero_matches_any_unless_exact() {
        let fx = fixture();
        let mut request = query(&fx, fx.generic);
        assert!(check_viability(&fx.table, fx.generic, &request).is_viable());

        request.options = LookupOptions::EXACT_ARITY;
        assert_eq!(
            check_viability(&fx.table, fx.generic, &request),
            Viability::NotViable(RejectReason::WrongArity {
                requested: 0,
                declared: 1
            })
        );

        request.options = LookupOptions::DEFAULT;
        request.arity = 2;
        assert!(!check_viability(&fx.table, fx.generic, &request).is_viable());
        request.arity = 1;
        assert!(check_viability(&fx.table, fx.generic, &request).is_viable());
    }

    #[test]
    fn test_invocability_checked_before_shape() {
        let fx = fixture();
        let mut request = query(&fx, fx.internal_field);
        request.options =
            LookupOptions::MUST_BE_INVOCABLE_IF_MEMBER | LookupOptions::NAMESPACES_OR_TYPES_ONLY;
        assert_eq!(
            check_viability(&fx.table, fx.internal_field, &request),
            Viability::NotViable(RejectReason::NotInvocable)
        );
    }

    #[test]
    fn test_label_lookup() {
        let fx = fixture();
        let mut request = query(&fx, fx.label);
        request.options = LookupOptions::LABELS_ONLY;
        assert!(check_viability(&fx.table, fx.label, &request).is_viable());
        assert_eq!(
            check_viability(&fx.table, fx.outer, &request),
            Viability::NotViable(RejectReason::NotALabel)
        );
        assert_eq!(fx.interner.resolve(fx.table[fx.label].name), "done");
    }

    #[test]
    fn test_reason_messages() {
        let reason = RejectReason::WrongArity {
            requested: 2,
            declared: 1,
        };
        assert_eq!(reason.to_string(), "declares 1 type parameters but 2 were given");
    }
}
