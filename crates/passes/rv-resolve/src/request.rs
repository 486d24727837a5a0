//! What is being looked up, and from where

use crate::options::LookupOptions;
use rv_intern::Name;
use rv_symbols::{ModuleId, SymbolId};

/// The position a lookup is made from, as far as accessibility is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LookupContext {
    /// Module containing the reference
    pub module: ModuleId,
    /// Innermost type declaration containing the reference
    pub within: Option<SymbolId>,
}

impl LookupContext {
    /// A reference from inside `module`, outside of any type
    #[must_use]
    pub fn in_module(module: ModuleId) -> Self {
        Self { module, within: None }
    }

    /// A reference from inside type `ty` of `module`
    #[must_use]
    pub fn in_type(module: ModuleId, ty: SymbolId) -> Self {
        Self {
            module,
            within: Some(ty),
        }
    }
}

/// An identifier occurrence to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupRequest<'src> {
    /// Identifier text
    pub name: &'src str,
    /// Number of type arguments written, 0 when none
    pub arity: u32,
    /// Shape constraints
    pub options: LookupOptions,
    /// Where the reference is made from
    pub context: LookupContext,
    /// Record rejection reasons; false for cheap existence checks
    pub diagnose: bool,
}

impl<'src> LookupRequest<'src> {
    /// Look up `name` with default options, arity 0 and full diagnostics
    #[must_use]
    pub fn new(name: &'src str) -> Self {
        Self {
            name,
            arity: 0,
            options: LookupOptions::DEFAULT,
            context: LookupContext::default(),
            diagnose: true,
        }
    }

    /// Set the number of type arguments
    #[must_use]
    pub fn with_arity(mut self, arity: u32) -> Self {
        self.arity = arity;
        self
    }

    /// Set the shape constraints
    #[must_use]
    pub fn with_options(mut self, options: LookupOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the referencing context
    #[must_use]
    pub fn with_context(mut self, context: LookupContext) -> Self {
        self.context = context;
        self
    }

    /// Skip rejection reasons
    #[must_use]
    pub fn without_diagnostics(mut self) -> Self {
        self.diagnose = false;
        self
    }

    /// The request with its name interned, as handed to scopes
    #[must_use]
    pub fn query(&self, name: Name) -> ScopeQuery {
        ScopeQuery {
            name,
            arity: self.arity,
            options: self.options,
            context: self.context,
            diagnose: self.diagnose,
        }
    }
}

/// A [`LookupRequest`] whose name is interned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeQuery {
    /// Interned identifier
    pub name: Name,
    /// Number of type arguments written, 0 when none
    pub arity: u32,
    /// Shape constraints
    pub options: LookupOptions,
    /// Where the reference is made from
    pub context: LookupContext,
    /// Record rejection reasons
    pub diagnose: bool,
}
