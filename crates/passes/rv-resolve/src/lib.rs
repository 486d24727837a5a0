//! Name lookup for Raven
//!
//! Given an identifier, a chain of lexical scopes and a set of shape
//! constraints, this crate finds the symbols the identifier denotes and
//! classifies the outcome as viable, not viable, ambiguous or empty.
//!
//! # Architecture
//!
//! - **Scopes** (`scopes`): one type per kind of nesting level, each able to
//!   search only its own declarations
//! - **Binder chain** (`binder`): immutable, shareable links from the
//!   innermost scope outwards
//! - **Resolver** (`lookup`): walks a chain, applying the shadowing rule
//! - **Results** (`result`, `viability`): how candidates are accepted,
//!   rejected and merged
//!
//! # Usage
//!
//! ```rust,ignore
//! use rv_resolve::{Binder, LookupRequest, Resolver, UseSiteDiagnostics};
//!
//! let resolver = Resolver::new(&symbols, &interner, &config);
//! let mut sink = UseSiteDiagnostics::new();
//! let result = resolver.lookup(&binder, &LookupRequest::new("List").with_arity(1), &cancel, &mut sink)?;
//! if let Some(symbol) = result.single_symbol() {
//!     // bind the reference to `symbol`
//! }
//! ```

pub mod binder;
pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lookup;
pub mod map;
pub mod options;
pub mod request;
pub mod result;
pub mod scopes;
pub mod viability;

pub use binder::{BasesBeingResolved, Binder, LookupEnv, LookupScope, NameSet, ScopeBinder};
pub use cancel::CancellationFlag;
pub use config::ResolverConfig;
pub use diagnostics::{UseSiteDiagnostic, UseSiteDiagnostics};
pub use error::{Cancelled, ResolutionError, compute_suggestions};
pub use lookup::Resolver;
pub use map::BinderMap;
pub use options::LookupOptions;
pub use request::{LookupContext, LookupRequest, ScopeQuery};
pub use result::{LookupResult, LookupResultKind, Rejection};
pub use scopes::{
    ImportScope, LocalScope, LocalScopeKind, NamespaceScope, TypeParameterLevel,
    TypeParameterScope, TypeScope, lookup_in_type_hierarchy,
};
pub use viability::{RejectReason, Viability, check_viability, is_accessible};
