//! Finding the binder in effect at a source position

use crate::binder::Binder;
use rv_span::{FileId, FileSpan};

/// Binders registered per syntactic scope, keyed by the source range they
/// cover
///
/// Built once by declaration binding and then only read.
#[derive(Debug, Clone, Default)]
pub struct BinderMap {
    entries: Vec<(FileSpan, Binder)>,
}

impl BinderMap {
    /// An empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the binder for the scope covering `span`
    pub fn insert(&mut self, span: FileSpan, binder: Binder) {
        self.entries.push((span, binder));
    }

    /// The binder of the innermost scope containing `offset` in `file`
    ///
    /// When several registered ranges are equally small the one inserted
    /// last wins.
    #[must_use]
    pub fn binder_at(&self, file: FileId, offset: u32) -> Option<&Binder> {
        self.entries
            .iter()
            .rev()
            .filter(|(span, _)| span.contains_position(file, offset))
            .min_by_key(|(span, _)| span.span.len())
            .map(|(_, binder)| binder)
    }

    /// Number of registered scopes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
