//! Walking a binder chain to resolve one name
//!
//! The resolver asks each binder, innermost first, for the candidates it
//! declares itself. The first binder that yields anything at all decides the
//! result; enclosing binders are not consulted after that, so an inner
//! declaration shadows outer ones even when it turns out not to be viable.

use crate::binder::{BasesBeingResolved, Binder, LookupEnv, LookupScope, NameSet};
use crate::cancel::CancellationFlag;
use crate::config::ResolverConfig;
use crate::diagnostics::UseSiteDiagnostics;
use crate::error::{Cancelled, ResolutionError, compute_suggestions};
use crate::options::LookupOptions;
use crate::request::LookupRequest;
use crate::result::LookupResult;
use crate::scopes::TypeScope;
use rv_intern::{Interner, Name};
use rv_symbols::{SymbolId, SymbolTable};

/// Name lookup over a fixed symbol table
///
/// A resolver borrows everything it needs and holds no per-call state, so
/// one instance can serve lookups from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'ctx> {
    symbols: &'ctx SymbolTable,
    interner: &'ctx Interner,
    config: &'ctx ResolverConfig,
}

impl<'ctx> Resolver<'ctx> {
    /// Create a resolver over `symbols`, whose names were interned in `interner`
    #[must_use]
    pub fn new(
        symbols: &'ctx SymbolTable,
        interner: &'ctx Interner,
        config: &'ctx ResolverConfig,
    ) -> Self {
        Self {
            symbols,
            interner,
            config,
        }
    }

    /// The symbol table being searched
    #[must_use]
    pub fn symbols(&self) -> &'ctx SymbolTable {
        self.symbols
    }

    /// Look `request` up along the chain starting at `binder`
    ///
    /// Use-site problems of every candidate examined are added to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancel` is raised before the lookup
    /// finishes. No partial result is returned in that case.
    ///
    /// # Panics
    ///
    /// Panics if `request.options` is not a valid combination.
    pub fn lookup(
        &self,
        binder: &Binder,
        request: &LookupRequest<'_>,
        cancel: &CancellationFlag,
        sink: &mut UseSiteDiagnostics,
    ) -> Result<LookupResult, Cancelled> {
        request.options.assert_valid();
        cancel.check()?;

        let mut result = LookupResult::new();
        let Some(name) = self.interner.get(request.name) else {
            tracing::trace!(name = request.name, "name was never declared");
            return Ok(result);
        };

        let query = request.query(name);
        let env = LookupEnv {
            symbols: self.symbols,
            cancel,
        };
        let mut bases = BasesBeingResolved::new();

        for (depth, level) in binder.iter().enumerate() {
            if let Err(cancelled) = cancel.check() {
                tracing::debug!(name = request.name, depth, "lookup cancelled");
                return Err(cancelled);
            }
            let scope = level.scope();
            if !scope.can_consider(request.options) {
                continue;
            }
            scope.lookup_own_symbols(&mut result, &query, &mut bases, &env, sink)?;
            if !result.is_clear() {
                tracing::trace!(
                    name = request.name,
                    depth,
                    kind = ?result.kind(),
                    "name found"
                );
                return Ok(result);
            }
        }

        Ok(result)
    }

    /// Look `request` up among the members of `ty` and its bases, as for a
    /// qualified reference `ty.name`
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancel` is raised before the lookup
    /// finishes.
    ///
    /// # Panics
    ///
    /// Panics if `request.options` is not a valid combination.
    pub fn lookup_in_type(
        &self,
        ty: SymbolId,
        request: &LookupRequest<'_>,
        cancel: &CancellationFlag,
        sink: &mut UseSiteDiagnostics,
    ) -> Result<LookupResult, Cancelled> {
        self.lookup(&Binder::root(TypeScope::new(ty)), request, cancel, sink)
    }

    /// Look `request` up and require a usable outcome
    ///
    /// A viable result, including an overload set, is returned as is.
    /// Anything else becomes a [`ResolutionError`]; undefined names carry
    /// suggestions drawn from the names visible along the chain.
    ///
    /// # Errors
    ///
    /// Returns the error describing why the name is not usable, or
    /// [`ResolutionError::Cancelled`].
    ///
    /// # Panics
    ///
    /// Panics if `request.options` is not a valid combination.
    pub fn resolve(
        &self,
        binder: &Binder,
        request: &LookupRequest<'_>,
        cancel: &CancellationFlag,
        sink: &mut UseSiteDiagnostics,
    ) -> Result<LookupResult, ResolutionError> {
        let result = self.lookup(binder, request, cancel, sink)?;
        match result.to_error(request.name) {
            None => Ok(result),
            Some(ResolutionError::Undefined { name, .. }) => {
                let visible = self.visible_names(binder, request.options);
                let suggestions = compute_suggestions(
                    &name,
                    visible.iter().map(|&candidate| self.interner.resolve(candidate)),
                    self.config,
                );
                Err(ResolutionError::Undefined { name, suggestions })
            }
            Some(error) => Err(error),
        }
    }

    /// Names that some binder along the chain would consider under
    /// `options`, innermost first and without duplicates
    #[must_use]
    pub fn visible_names(&self, binder: &Binder, options: LookupOptions) -> Vec<Name> {
        let mut names = NameSet::default();
        for level in binder.iter() {
            level
                .scope()
                .add_lookup_names(options, self.symbols, &mut names);
        }
        names.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::UseSiteDiagnostic;
    use crate::request::LookupContext;
    use crate::result::LookupResultKind;
    use crate::scopes::{ImportScope, LocalScope, LocalScopeKind, NamespaceScope, TypeParameterScope};
    use crate::viability::RejectReason;
    use expect_test::expect;
    use rv_symbols::{
        Accessibility, ModuleId, SymbolData, SymbolKind, SymbolTableBuilder, TypeKind,
        UseSiteProblem,
    };

    fn lookup(
        table: &SymbolTable,
        interner: &Interner,
        binder: &Binder,
        request: &LookupRequest<'_>,
    ) -> (LookupResult, UseSiteDiagnostics) {
        let config = ResolverConfig::default();
        let resolver = Resolver::new(table, interner, &config);
        let mut sink = UseSiteDiagnostics::new();
        let result = resolver
            .lookup(binder, request, &CancellationFlag::new(), &mut sink)
            .unwrap();
        (result, sink)
    }

    /// Method `Convert<T>` inside class `Map<T, U>` inside the global namespace
    struct GenericFixture {
        interner: Interner,
        table: SymbolTable,
        chain: Binder,
        method_t: SymbolId,
        class_u: SymbolId,
    }

    fn generic_fixture() -> GenericFixture {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let map = builder.type_decl(global, "Map", TypeKind::Class, 2);
        let class_params = builder.type_parameters(map, &["T", "U"]);
        let convert = builder.add(
            SymbolData::new(builder.name("Convert"), SymbolKind::Method)
                .with_arity(1)
                .with_container(map),
        );
        let method_params = builder.type_parameters(convert, &["T"]);
        let table = builder.finish();

        let chain = Binder::root(NamespaceScope::new(global))
            .with(TypeParameterScope::for_type(&table, map, &class_params))
            .with(TypeParameterScope::for_method(&table, convert, &method_params));
        GenericFixture {
            interner,
            table,
            chain,
            method_t: method_params[0],
            class_u: class_params[1],
        }
    }

    #[test]
    fn test_inner_type_parameter_shadows_outer() {
        let fx = generic_fixture();

        let (found_t, _) = lookup(&fx.table, &fx.interner, &fx.chain, &LookupRequest::new("T"));
        assert_eq!(found_t.single_symbol(), Some(fx.method_t));
        assert!(found_t.rejections().is_empty());

        let (found_u, _) = lookup(&fx.table, &fx.interner, &fx.chain, &LookupRequest::new("U"));
        assert_eq!(found_u.single_symbol(), Some(fx.class_u));

        let (found_v, sink) = lookup(&fx.table, &fx.interner, &fx.chain, &LookupRequest::new("V"));
        assert!(found_v.is_clear());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_gated_scope_is_skipped() {
        let fx = generic_fixture();
        let request =
            LookupRequest::new("T").with_options(LookupOptions::MUST_NOT_BE_METHOD_TYPE_PARAMETER);
        let (result, _) = lookup(&fx.table, &fx.interner, &fx.chain, &request);
        assert_ne!(result.single_symbol(), Some(fx.method_t));
        assert!(result.single_symbol().is_some());
    }

    #[test]
    fn test_not_viable_inner_hit_still_shadows() {
        let fx = generic_fixture();
        let request = LookupRequest::new("T").with_arity(1);
        let (result, _) = lookup(&fx.table, &fx.interner, &fx.chain, &request);
        assert_eq!(result.kind(), LookupResultKind::NotViable);
        assert_eq!(result.rejections().len(), 1);
        assert_eq!(result.rejections()[0].symbol, fx.method_t);
        assert_eq!(
            result.rejections()[0].reason,
            Some(RejectReason::WrongArity {
                requested: 1,
                declared: 0
            })
        );
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let fx = generic_fixture();
        let request = LookupRequest::new("T");
        let first = lookup(&fx.table, &fx.interner, &fx.chain, &request).0;
        let second = lookup(&fx.table, &fx.interner, &fx.chain, &request).0;
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_name_is_not_interned() {
        let fx = generic_fixture();
        let before = fx.interner.len();
        let (result, _) = lookup(
            &fx.table,
            &fx.interner,
            &fx.chain,
            &LookupRequest::new("NeverDeclared"),
        );
        assert!(result.is_clear());
        assert_eq!(fx.interner.len(), before);
    }

    #[test]
    fn test_cancelled_lookup_returns_no_result() {
        let fx = generic_fixture();
        let config = ResolverConfig::default();
        let resolver = Resolver::new(&fx.table, &fx.interner, &config);
        let cancel = CancellationFlag::new();
        cancel.cancel();
        let mut sink = UseSiteDiagnostics::new();
        let outcome = resolver.lookup(&fx.chain, &LookupRequest::new("T"), &cancel, &mut sink);
        assert_eq!(outcome, Err(Cancelled));

        let resolved = resolver.resolve(&fx.chain, &LookupRequest::new("T"), &cancel, &mut sink);
        assert_eq!(resolved, Err(ResolutionError::Cancelled(Cancelled)));
    }

    #[test]
    #[should_panic(expected = "invalid lookup options")]
    fn test_invalid_options_panic() {
        let fx = generic_fixture();
        let request = LookupRequest::new("T")
            .with_options(LookupOptions::MUST_BE_INSTANCE | LookupOptions::MUST_NOT_BE_INSTANCE);
        lookup(&fx.table, &fx.interner, &fx.chain, &request);
    }

    #[test]
    fn test_diagnose_false_keeps_candidates_but_drops_reasons() {
        let fx = generic_fixture();
        let diagnosed = LookupRequest::new("T").with_arity(2);
        let (with_reasons, _) = lookup(&fx.table, &fx.interner, &fx.chain, &diagnosed);
        let (without_reasons, _) = lookup(
            &fx.table,
            &fx.interner,
            &fx.chain,
            &diagnosed.without_diagnostics(),
        );

        assert_eq!(with_reasons.kind(), without_reasons.kind());
        assert_eq!(with_reasons.symbols(), without_reasons.symbols());
        assert_eq!(
            with_reasons.rejections().len(),
            without_reasons.rejections().len()
        );
        assert!(with_reasons.rejections().iter().all(|rejection| rejection.reason.is_some()));
        assert!(without_reasons.rejections().iter().all(|rejection| rejection.reason.is_none()));
    }

    /// `class Base { void Run(); private int secret; }`,
    /// `class Derived : Base { int Run; void Helper(); void Helper(int); }`
    struct ClassFixture {
        interner: Interner,
        table: SymbolTable,
        base: SymbolId,
        derived: SymbolId,
        base_run: SymbolId,
        derived_run: SymbolId,
        secret: SymbolId,
    }

    fn class_fixture() -> ClassFixture {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let base = builder.type_decl(global, "Base", TypeKind::Class, 0);
        let derived = builder.type_decl(global, "Derived", TypeKind::Class, 0);
        builder.add_base(derived, base);
        let base_run = builder.member(base, "Run", SymbolKind::Method, Accessibility::Public);
        let secret = builder.member(base, "secret", SymbolKind::Field, Accessibility::Private);
        let derived_run = builder.member(derived, "Run", SymbolKind::Field, Accessibility::Public);
        builder.member(derived, "Helper", SymbolKind::Method, Accessibility::Public);
        builder.member(derived, "Helper", SymbolKind::Method, Accessibility::Public);
        ClassFixture {
            interner,
            table: builder.finish(),
            base,
            derived,
            base_run,
            derived_run,
            secret,
        }
    }

    #[test]
    fn test_derived_member_hides_base_member() {
        let fx = class_fixture();
        let chain = Binder::root(NamespaceScope::new(fx.table.global_namespace()))
            .with(TypeScope::new(fx.derived));
        let (result, _) = lookup(&fx.table, &fx.interner, &chain, &LookupRequest::new("Run"));
        assert_eq!(result.single_symbol(), Some(fx.derived_run));
        assert!(!result.symbols().contains(&fx.base_run));
    }

    #[test]
    fn test_overloads_are_not_ambiguous() {
        let fx = class_fixture();
        let chain = Binder::root(TypeScope::new(fx.derived));
        let (result, _) = lookup(&fx.table, &fx.interner, &chain, &LookupRequest::new("Helper"));
        assert_eq!(result.kind(), LookupResultKind::Viable);
        assert!(result.is_overload_set());
        assert_eq!(result.symbols().len(), 2);
    }

    #[test]
    fn test_inherited_private_member_is_inaccessible() {
        let fx = class_fixture();
        let config = ResolverConfig::default();
        let resolver = Resolver::new(&fx.table, &fx.interner, &config);
        let mut sink = UseSiteDiagnostics::new();
        let cancel = CancellationFlag::new();

        let from_derived = LookupRequest::new("secret")
            .with_context(LookupContext::in_type(ModuleId::default(), fx.derived));
        let hidden = resolver
            .lookup_in_type(fx.derived, &from_derived, &cancel, &mut sink)
            .unwrap();
        assert_eq!(hidden.kind(), LookupResultKind::NotViable);
        assert_eq!(hidden.rejections()[0].reason, Some(RejectReason::Inaccessible));

        let from_base = LookupRequest::new("secret")
            .with_context(LookupContext::in_type(ModuleId::default(), fx.base));
        let visible = resolver
            .lookup_in_type(fx.derived, &from_base, &cancel, &mut sink)
            .unwrap();
        assert_eq!(visible.single_symbol(), Some(fx.secret));
    }

    #[test]
    fn test_inheritance_cycle_is_reported_once() {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let first = builder.type_decl(global, "A", TypeKind::Class, 0);
        let second = builder.type_decl(global, "B", TypeKind::Class, 0);
        builder.add_base(first, second);
        builder.add_base(second, first);
        builder.name("Missing");
        let table = builder.finish();

        let chain = Binder::root(TypeScope::new(first));
        let (result, sink) = lookup(&table, &interner, &chain, &LookupRequest::new("Missing"));
        assert!(result.is_clear());
        assert_eq!(
            sink.into_vec(),
            vec![UseSiteDiagnostic::InheritanceCycle { ty: first }]
        );
    }

    #[test]
    fn test_self_referential_base_terminates() {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let node = builder.type_decl(global, "Node", TypeKind::Class, 0);
        builder.add_base(node, node);
        builder.member(node, "Next", SymbolKind::Field, Accessibility::Public);
        let table = builder.finish();

        let chain = Binder::root(TypeScope::new(node));
        let (found, _) = lookup(&table, &interner, &chain, &LookupRequest::new("Next"));
        assert!(found.single_symbol().is_some());

        let (missing, sink) = lookup(&table, &interner, &chain, &LookupRequest::new("Node"));
        assert!(missing.is_clear());
        assert!(sink.contains(&UseSiteDiagnostic::InheritanceCycle { ty: node }));
    }

    #[test]
    fn test_use_site_problem_recorded_for_examined_candidate() {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let module = builder.name("Legacy.Runtime");
        let broken = builder.add(
            SymbolData::new(builder.name("Widget"), SymbolKind::Type(TypeKind::Class))
                .with_container(global)
                .with_use_site_problem(UseSiteProblem::MissingModule { module }),
        );
        let table = builder.finish();

        let chain = Binder::root(NamespaceScope::new(global));
        let (result, sink) = lookup(&table, &interner, &chain, &LookupRequest::new("Widget"));
        assert_eq!(result.single_symbol(), Some(broken));
        assert_eq!(
            sink.into_vec(),
            vec![UseSiteDiagnostic::Problem {
                symbol: broken,
                problem: UseSiteProblem::MissingModule { module },
            }]
        );
    }

    #[test]
    fn test_import_ambiguity_and_alias_priority() {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let left = builder.namespace(global, "Left");
        let right = builder.namespace(global, "Right");
        builder.type_decl(left, "Widget", TypeKind::Class, 0);
        builder.type_decl(right, "Widget", TypeKind::Struct, 0);
        let alias = builder.add(
            SymbolData::new(
                builder.name("Widget"),
                SymbolKind::NamespaceAlias { target: left },
            )
            .with_container(global),
        );
        let table = builder.finish();

        let imports = ImportScope::new().with_import(left).with_import(right);
        let chain = Binder::root(NamespaceScope::new(global)).with(imports.clone());
        let (ambiguous, _) = lookup(&table, &interner, &chain, &LookupRequest::new("Widget"));
        assert_eq!(ambiguous.kind(), LookupResultKind::Ambiguous);
        assert_eq!(ambiguous.symbols().len(), 2);

        let aliased = Binder::root(NamespaceScope::new(global))
            .with(imports.with_alias(&table, alias));
        let (preferred, _) = lookup(&table, &interner, &aliased, &LookupRequest::new("Widget"));
        assert_eq!(preferred.single_symbol(), Some(alias));
    }

    #[test]
    fn test_labels_only_see_labels() {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let global = builder.global_namespace();
        let ty = builder.type_decl(global, "Loop", TypeKind::Class, 0);
        let local = builder.add(SymbolData::new(builder.name("retry"), SymbolKind::Local));
        let label = builder.add(SymbolData::new(builder.name("retry"), SymbolKind::Label));
        let table = builder.finish();

        let chain = Binder::root(NamespaceScope::new(global))
            .with(TypeScope::new(ty))
            .with(
                LocalScope::new(LocalScopeKind::MemberBody)
                    .with_local(&table, local)
                    .with_label(&table, label),
            );
        let (as_label, _) = lookup(
            &table,
            &interner,
            &chain,
            &LookupRequest::new("retry").with_options(LookupOptions::LABELS_ONLY),
        );
        assert_eq!(as_label.single_symbol(), Some(label));

        let (as_value, _) = lookup(&table, &interner, &chain, &LookupRequest::new("retry"));
        assert_eq!(as_value.single_symbol(), Some(local));
    }

    #[test]
    fn test_resolve_suggests_visible_names() {
        let fx = class_fixture();
        let config = ResolverConfig::default();
        let resolver = Resolver::new(&fx.table, &fx.interner, &config);
        let chain = Binder::root(NamespaceScope::new(fx.table.global_namespace()))
            .with(TypeScope::new(fx.derived));
        let mut sink = UseSiteDiagnostics::new();

        let error = resolver
            .resolve(
                &chain,
                &LookupRequest::new("Helpr"),
                &CancellationFlag::new(),
                &mut sink,
            )
            .unwrap_err();
        expect![[r#"the name `Helpr` does not exist in the current context (did you mean `Helper`?)"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_visible_names_inner_first() {
        let fx = generic_fixture();
        let config = ResolverConfig::default();
        let resolver = Resolver::new(&fx.table, &fx.interner, &config);
        let names: Vec<&str> = resolver
            .visible_names(&fx.chain, LookupOptions::DEFAULT)
            .into_iter()
            .map(|name| fx.interner.resolve(name))
            .collect();
        assert_eq!(names, vec!["T", "U", "Map"]);
    }
}
