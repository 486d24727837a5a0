//! Concrete scope kinds

mod imports;
mod locals;
mod namespace;
mod type_decl;
mod type_params;

pub use imports::ImportScope;
pub use locals::{LocalScope, LocalScopeKind};
pub use namespace::NamespaceScope;
pub use type_decl::{TypeScope, lookup_in_type_hierarchy};
pub use type_params::{TypeParameterLevel, TypeParameterScope};
