//! Declared entities
//!
//! A [`SymbolData`] is created once by declaration binding and never mutated
//! afterwards; the resolver only reads it.

use crate::ModuleId;
use la_arena::Idx;
use rv_intern::Name;
use rv_span::FileSpan;
use std::fmt;

/// Identity of a declared symbol
///
/// Two candidates are "the same symbol" exactly when their ids are equal.
pub type SymbolId = Idx<SymbolData>;

/// Flavour of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Reference type with single inheritance
    Class,
    /// Value type
    Struct,
    /// Interface, may have several bases
    Interface,
    /// Enumeration
    Enum,
    /// Delegate type
    Delegate,
}

/// What a symbol is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Namespace
    Namespace,
    /// Type declaration
    Type(TypeKind),
    /// Generic type parameter of a type or method
    TypeParameter {
        /// Zero-based position in the owner's parameter list
        ordinal: u32,
    },
    /// Method
    Method,
    /// Field
    Field,
    /// Property
    Property,
    /// Event
    Event,
    /// Local variable
    Local,
    /// Parameter of a method or lambda
    Parameter,
    /// Statement label
    Label,
    /// `using Alias = Some.Namespace;`
    NamespaceAlias {
        /// Namespace or type the alias stands for
        target: SymbolId,
    },
}

impl SymbolKind {
    /// Whether symbols of this kind live in a type's member table
    #[must_use]
    pub fn is_member(self) -> bool {
        matches!(self, Self::Method | Self::Field | Self::Property | Self::Event)
    }

    /// Whether the kind can appear where a type or namespace is expected
    #[must_use]
    pub fn is_namespace_or_type(self) -> bool {
        matches!(
            self,
            Self::Namespace | Self::Type(_) | Self::TypeParameter { .. } | Self::NamespaceAlias { .. }
        )
    }

    /// Human-readable kind for diagnostics
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Type(TypeKind::Class) => "class",
            Self::Type(TypeKind::Struct) => "struct",
            Self::Type(TypeKind::Interface) => "interface",
            Self::Type(TypeKind::Enum) => "enum",
            Self::Type(TypeKind::Delegate) => "delegate",
            Self::TypeParameter { .. } => "type parameter",
            Self::Method => "method",
            Self::Field => "field",
            Self::Property => "property",
            Self::Event => "event",
            Self::Local => "local variable",
            Self::Parameter => "parameter",
            Self::Label => "label",
            Self::NamespaceAlias { .. } => "namespace alias",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.describe())
    }
}

/// Declared accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    /// Visible everywhere
    #[default]
    Public,
    /// Visible inside the declaring module or to derived types
    ProtectedInternal,
    /// Visible inside the declaring module
    Internal,
    /// Visible inside the containing type and types deriving from it
    Protected,
    /// Visible to derived types declared in the same module
    PrivateProtected,
    /// Visible inside the containing type and its nested types
    Private,
}

/// Something wrong with a symbol's definition that is only reported when the
/// symbol is referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseSiteProblem {
    /// The symbol's signature mentions a module that is not referenced
    MissingModule {
        /// Name of the missing module
        module: Name,
    },
    /// Imported metadata for the symbol could not be decoded
    BadMetadata,
    /// The symbol uses a construct the language cannot consume
    UnsupportedByLanguage,
}

/// A declared entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolData {
    /// Declared name
    pub name: Name,
    /// What the symbol is
    pub kind: SymbolKind,
    /// Number of generic parameters the symbol declares
    pub arity: u32,
    /// Declared accessibility
    pub accessibility: Accessibility,
    /// Static member (ignored for non-members)
    pub is_static: bool,
    /// Can appear as the target of an invocation
    pub is_invocable: bool,
    /// Declaring namespace, type or method
    pub container: Option<SymbolId>,
    /// Module the declaration belongs to
    pub module: ModuleId,
    /// Declaration site, absent for imported symbols
    pub span: Option<FileSpan>,
    /// Problem to report whenever the symbol is looked at
    pub use_site_problem: Option<UseSiteProblem>,
}

impl SymbolData {
    /// A public, non-generic symbol in module 0; methods start out invocable
    #[must_use]
    pub fn new(name: Name, kind: SymbolKind) -> Self {
        Self {
            name,
            kind,
            arity: 0,
            accessibility: Accessibility::Public,
            is_static: false,
            is_invocable: matches!(kind, SymbolKind::Method),
            container: None,
            module: ModuleId::default(),
            span: None,
            use_site_problem: None,
        }
    }

    /// Set the generic arity
    #[must_use]
    pub fn with_arity(mut self, arity: u32) -> Self {
        self.arity = arity;
        self
    }

    /// Set the accessibility
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Set the declaring container
    #[must_use]
    pub fn with_container(mut self, container: SymbolId) -> Self {
        self.container = Some(container);
        self
    }

    /// Set the declaring module
    #[must_use]
    pub fn in_module(mut self, module: ModuleId) -> Self {
        self.module = module;
        self
    }

    /// Set the declaration site
    #[must_use]
    pub fn with_span(mut self, span: FileSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Mark as a static member
    #[must_use]
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as invocable, e.g. a delegate-typed field
    #[must_use]
    pub fn into_invocable(mut self) -> Self {
        self.is_invocable = true;
        self
    }

    /// Attach a use-site problem
    #[must_use]
    pub fn with_use_site_problem(mut self, problem: UseSiteProblem) -> Self {
        self.use_site_problem = Some(problem);
        self
    }

    /// Non-static field, property, event or method
    #[must_use]
    pub fn is_instance_member(&self) -> bool {
        self.kind.is_member() && !self.is_static
    }

    /// Statement label
    #[must_use]
    pub fn is_label(&self) -> bool {
        matches!(self.kind, SymbolKind::Label)
    }

    /// Namespace alias
    #[must_use]
    pub fn is_namespace_alias(&self) -> bool {
        matches!(self.kind, SymbolKind::NamespaceAlias { .. })
    }

    /// Type declaration
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::Type(_))
    }
}
