//! Declared-symbol model for Raven name resolution
//!
//! Declaration binding produces a [`SymbolTable`] of namespaces, types, type
//! parameters, members and locals. Name resolution only ever reads it, so a
//! finished table can be shared across threads without synchronisation.

pub mod name_table;
pub mod symbol;
pub mod table;

pub use name_table::{Candidates, NameTable};
pub use symbol::{Accessibility, SymbolData, SymbolId, SymbolKind, TypeKind, UseSiteProblem};
pub use table::{SymbolTable, SymbolTableBuilder};

/// Unit of compilation that owns declarations; `internal` visibility stops at
/// its boundary
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ModuleId(pub u32);
