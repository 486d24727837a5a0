//! Identifier interning
//!
//! Every identifier the resolver compares is interned once into a [`Name`].
//! Lookups compare `Name`s by value, so a name that was never interned cannot
//! have been declared anywhere and can be rejected without walking any scope.

pub use lasso::Spur as Name;
use lasso::ThreadedRodeo;
use std::fmt;
use std::sync::Arc;

/// Thread-safe identifier interner shared by the declaration tables and the
/// resolver
#[derive(Clone, Default)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    /// Create an empty interner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the existing name if it was seen before
    pub fn intern(&self, text: &str) -> Name {
        self.inner.get_or_intern(text)
    }

    /// Look up `text` without interning it
    #[must_use]
    pub fn get(&self, text: &str) -> Option<Name> {
        self.inner.get(text)
    }

    /// Text of an interned name
    ///
    /// # Panics
    ///
    /// Panics if `name` was produced by a different interner.
    #[must_use]
    pub fn resolve(&self, name: Name) -> &str {
        self.inner.resolve(&name)
    }

    /// Text of an interned name, or `None` if it belongs to another interner
    #[must_use]
    pub fn try_resolve(&self, name: Name) -> Option<&str> {
        self.inner.try_resolve(&name)
    }

    /// Number of distinct names interned so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing has been interned yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Interner").field("len", &self.len()).finish()
    }
}
