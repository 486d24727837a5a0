//! Scenario fixtures for name lookup
//!
//! A scenario is a TOML file describing declarations, a scope chain and a
//! list of lookups with their expected outcomes. Declarations are named by
//! dotted paths (`App.Map.Convert`); the prefix of a path names the
//! container, an empty prefix the global namespace.

use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::FxHashMap;
use rv_intern::Interner;
use rv_resolve::{
    Binder, CancellationFlag, ImportScope, LocalScope, LocalScopeKind, LookupContext,
    LookupOptions, LookupRequest, NamespaceScope, Resolver, ResolverConfig, ScopeBinder,
    TypeParameterScope, TypeScope, UseSiteDiagnostics,
};
use rv_symbols::{
    Accessibility, ModuleId, SymbolData, SymbolId, SymbolKind, SymbolTable, SymbolTableBuilder,
    TypeKind, UseSiteProblem,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One declaration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolDecl {
    /// Dotted path; the last segment is the declared name
    pub path: String,
    /// `namespace`, `class`, `struct`, `interface`, `enum`, `delegate`,
    /// `method`, `field`, `property`, `event`, `local`, `parameter`,
    /// `label` or `alias`
    pub kind: String,
    /// Generic arity; defaults to the number of type parameters
    pub arity: Option<u32>,
    /// `public`, `internal`, `protected`, `protected-internal`,
    /// `private-protected` or `private`
    #[serde(default)]
    pub accessibility: Option<String>,
    /// Static member
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Module the declaration belongs to
    #[serde(default)]
    pub module: u32,
    /// Type parameters declared by this symbol, in order
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Paths of direct base types
    #[serde(default)]
    pub bases: Vec<String>,
    /// Aliased namespace, for `alias`
    pub target: Option<String>,
    /// `bad-metadata`, `unsupported` or `missing-module:<name>`
    pub problem: Option<String>,
}

/// One link of the scope chain
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeDecl {
    /// `namespace`, `imports`, `type`, `type-parameters`,
    /// `method-type-parameters`, `body`, `block` or `lambda`
    pub kind: String,
    /// Namespace, type or generic owner the scope belongs to
    pub of: Option<String>,
    /// Imported namespaces
    #[serde(default)]
    pub imports: Vec<String>,
    /// Alias declarations in effect
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Locals and parameters in effect
    #[serde(default)]
    pub locals: Vec<String>,
    /// Labels in effect
    #[serde(default)]
    pub labels: Vec<String>,
}

/// One lookup and its expected outcome
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupDecl {
    /// Identifier to look up
    pub name: String,
    /// Type arguments written
    #[serde(default)]
    pub arity: u32,
    /// Names of [`LookupOptions`] flags
    #[serde(default)]
    pub options: Vec<String>,
    /// Type the reference is made from
    pub within: Option<String>,
    /// Module the reference is made from
    #[serde(default)]
    pub module: u32,
    /// Record rejection reasons
    #[serde(default = "default_diagnose")]
    pub diagnose: bool,
    /// Rendered [`rv_resolve::LookupResult`]
    pub expect: String,
    /// Rendered use-site diagnostics, in order
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

fn default_diagnose() -> bool {
    true
}

/// A parsed scenario file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// What the scenario exercises
    pub description: String,
    /// Declarations, in declaration order
    #[serde(default, rename = "symbol")]
    pub symbols: Vec<SymbolDecl>,
    /// Scope chain, outermost first
    #[serde(default, rename = "scope")]
    pub scopes: Vec<ScopeDecl>,
    /// Lookups to run against the innermost scope
    #[serde(default, rename = "lookup")]
    pub lookups: Vec<LookupDecl>,
}

impl Scenario {
    /// Parse a scenario from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a scenario file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Every `.toml` file directly inside `dir`, sorted by name
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn scenario_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Outcome of one scenario lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    /// Identifier looked up
    pub name: String,
    /// Rendered result
    pub result: String,
    /// Rendered use-site diagnostics
    pub diagnostics: Vec<String>,
}

/// A scenario with its declarations bound and its chain built
pub struct ScenarioFixture {
    /// Interner holding every declared name
    pub interner: Interner,
    /// Innermost binder of the chain
    pub binder: Binder,
    declarations: Declarations,
}

impl ScenarioFixture {
    /// Declare the scenario's symbols and build its scope chain
    ///
    /// # Errors
    ///
    /// Returns an error if a declaration or scope refers to an unknown path
    /// or uses an unknown kind
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let interner = Interner::new();
        let mut builder = SymbolTableBuilder::new(&interner);
        let mut paths = FxHashMap::default();
        let mut type_parameters = FxHashMap::default();
        paths.insert(String::new(), builder.global_namespace());

        for decl in &scenario.symbols {
            let id = declare(&mut builder, &paths, decl)?;
            paths.insert(decl.path.clone(), id);
            if !decl.type_parameters.is_empty() {
                let names: Vec<&str> = decl.type_parameters.iter().map(String::as_str).collect();
                let params = builder.type_parameters(id, &names);
                for (name, &param) in names.iter().zip(&params) {
                    paths.insert(format!("{}.{name}", decl.path), param);
                }
                type_parameters.insert(id, params);
            }
        }
        for decl in &scenario.symbols {
            let ty = lookup_path(&paths, &decl.path)?;
            for base in &decl.bases {
                builder.add_base(ty, lookup_path(&paths, base)?);
            }
        }

        let declarations = Declarations {
            symbols: builder.finish(),
            paths,
            type_parameters,
        };
        let binder = declarations.build_chain(&scenario.scopes)?;
        Ok(Self {
            interner,
            binder,
            declarations,
        })
    }

    /// Declared symbols
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.declarations.symbols
    }

    /// Symbol declared at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is declared there
    pub fn symbol(&self, path: &str) -> Result<SymbolId> {
        self.declarations.symbol(path)
    }

    /// Run one lookup against the innermost scope
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup names an unknown option or type
    pub fn run(&self, lookup: &LookupDecl) -> Result<LookupOutcome> {
        let mut options = LookupOptions::DEFAULT;
        for flag in &lookup.options {
            options |= LookupOptions::from_name(flag)
                .ok_or_else(|| anyhow!("unknown lookup option `{flag}`"))?;
        }
        let module = ModuleId(lookup.module);
        let context = match &lookup.within {
            Some(path) => LookupContext::in_type(module, self.symbol(path)?),
            None => LookupContext::in_module(module),
        };
        let mut request = LookupRequest::new(&lookup.name)
            .with_arity(lookup.arity)
            .with_options(options)
            .with_context(context);
        if !lookup.diagnose {
            request = request.without_diagnostics();
        }

        let symbols = self.symbols();
        let config = ResolverConfig::default();
        let resolver = Resolver::new(symbols, &self.interner, &config);
        let mut sink = UseSiteDiagnostics::new();
        let result = resolver.lookup(&self.binder, &request, &CancellationFlag::new(), &mut sink)?;

        Ok(LookupOutcome {
            name: lookup.name.clone(),
            result: result.describe(symbols, &self.interner),
            diagnostics: sink
                .iter()
                .map(|diagnostic| diagnostic.message(symbols, &self.interner))
                .collect(),
        })
    }
}

struct Declarations {
    symbols: SymbolTable,
    paths: FxHashMap<String, SymbolId>,
    type_parameters: FxHashMap<SymbolId, Vec<SymbolId>>,
}

impl Declarations {
    fn symbol(&self, path: &str) -> Result<SymbolId> {
        lookup_path(&self.paths, path)
    }

    fn build_chain(&self, scopes: &[ScopeDecl]) -> Result<Binder> {
        let (outermost, inner) = scopes
            .split_first()
            .ok_or_else(|| anyhow!("scenario declares no scopes"))?;
        let mut binder = Binder::root(self.build_scope(outermost)?);
        for decl in inner {
            binder = binder.with(self.build_scope(decl)?);
        }
        Ok(binder)
    }

    fn build_scope(&self, decl: &ScopeDecl) -> Result<ScopeBinder> {
        let owner = || -> Result<SymbolId> {
            let path = decl
                .of
                .as_deref()
                .ok_or_else(|| anyhow!("`{}` scope needs `of`", decl.kind))?;
            self.symbol(path)
        };
        let scope = match decl.kind.as_str() {
            "namespace" => NamespaceScope::new(owner()?).into(),
            "type" => TypeScope::new(owner()?).into(),
            "type-parameters" | "method-type-parameters" => {
                let generic = owner()?;
                let params = self
                    .type_parameters
                    .get(&generic)
                    .map_or(&[][..], Vec::as_slice);
                if decl.kind == "type-parameters" {
                    TypeParameterScope::for_type(&self.symbols, generic, params).into()
                } else {
                    TypeParameterScope::for_method(&self.symbols, generic, params).into()
                }
            }
            "imports" => {
                let mut imports = ImportScope::new();
                for path in &decl.imports {
                    imports = imports.with_import(self.symbol(path)?);
                }
                for path in &decl.aliases {
                    imports = imports.with_alias(&self.symbols, self.symbol(path)?);
                }
                imports.into()
            }
            "body" | "block" | "lambda" => {
                let kind = match decl.kind.as_str() {
                    "body" => LocalScopeKind::MemberBody,
                    "lambda" => LocalScopeKind::Lambda,
                    _ => LocalScopeKind::Block,
                };
                let mut locals = LocalScope::new(kind);
                for path in &decl.locals {
                    locals = locals.with_local(&self.symbols, self.symbol(path)?);
                }
                for path in &decl.labels {
                    locals = locals.with_label(&self.symbols, self.symbol(path)?);
                }
                locals.into()
            }
            other => bail!("unknown scope kind `{other}`"),
        };
        Ok(scope)
    }
}

fn lookup_path(paths: &FxHashMap<String, SymbolId>, path: &str) -> Result<SymbolId> {
    paths
        .get(path)
        .copied()
        .ok_or_else(|| anyhow!("nothing is declared at `{path}`"))
}

fn declare(
    builder: &mut SymbolTableBuilder,
    paths: &FxHashMap<String, SymbolId>,
    decl: &SymbolDecl,
) -> Result<SymbolId> {
    let (container_path, name) = decl.path.rsplit_once('.').unwrap_or(("", decl.path.as_str()));
    let container = lookup_path(paths, container_path)?;

    let kind = match decl.kind.as_str() {
        "namespace" => SymbolKind::Namespace,
        "class" => SymbolKind::Type(TypeKind::Class),
        "struct" => SymbolKind::Type(TypeKind::Struct),
        "interface" => SymbolKind::Type(TypeKind::Interface),
        "enum" => SymbolKind::Type(TypeKind::Enum),
        "delegate" => SymbolKind::Type(TypeKind::Delegate),
        "method" => SymbolKind::Method,
        "field" => SymbolKind::Field,
        "property" => SymbolKind::Property,
        "event" => SymbolKind::Event,
        "local" => SymbolKind::Local,
        "parameter" => SymbolKind::Parameter,
        "label" => SymbolKind::Label,
        "alias" => {
            let target = decl
                .target
                .as_deref()
                .ok_or_else(|| anyhow!("alias `{}` needs a target", decl.path))?;
            SymbolKind::NamespaceAlias {
                target: lookup_path(paths, target)?,
            }
        }
        other => bail!("unknown symbol kind `{other}`"),
    };

    let accessibility = match decl.accessibility.as_deref() {
        None | Some("public") => Accessibility::Public,
        Some("internal") => Accessibility::Internal,
        Some("protected") => Accessibility::Protected,
        Some("protected-internal") => Accessibility::ProtectedInternal,
        Some("private-protected") => Accessibility::PrivateProtected,
        Some("private") => Accessibility::Private,
        Some(other) => bail!("unknown accessibility `{other}`"),
    };

    let arity = decl
        .arity
        .unwrap_or_else(|| u32::try_from(decl.type_parameters.len()).unwrap_or(u32::MAX));
    let mut data = SymbolData::new(builder.name(name), kind)
        .with_arity(arity)
        .with_accessibility(accessibility)
        .with_container(container)
        .in_module(ModuleId(decl.module));
    if decl.is_static {
        data = data.into_static();
    }
    if let Some(problem) = decl.problem.as_deref() {
        data = data.with_use_site_problem(parse_problem(builder, problem)?);
    }
    Ok(builder.add(data))
}

fn parse_problem(builder: &SymbolTableBuilder, problem: &str) -> Result<UseSiteProblem> {
    match problem.split_once(':') {
        Some(("missing-module", module)) => Ok(UseSiteProblem::MissingModule {
            module: builder.name(module),
        }),
        None if problem == "bad-metadata" => Ok(UseSiteProblem::BadMetadata),
        None if problem == "unsupported" => Ok(UseSiteProblem::UnsupportedByLanguage),
        _ => bail!("unknown use-site problem `{problem}`"),
    }
}
