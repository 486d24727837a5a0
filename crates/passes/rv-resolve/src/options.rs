//! Shape constraints on a lookup

use bitflags::bitflags;

bitflags! {
    /// Which symbol shapes a lookup accepts
    ///
    /// The empty set ([`LookupOptions::DEFAULT`]) accepts anything.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LookupOptions: u32 {
        /// Only namespaces, types, type parameters and aliases
        const NAMESPACES_OR_TYPES_ONLY = 1 << 0;
        /// Only namespace aliases
        const NAMESPACE_ALIASES_ONLY = 1 << 1;
        /// Members must be invocable
        const MUST_BE_INVOCABLE_IF_MEMBER = 1 << 2;
        /// Only instance members
        const MUST_BE_INSTANCE = 1 << 3;
        /// No instance members
        const MUST_NOT_BE_INSTANCE = 1 << 4;
        /// Only statement labels
        const LABELS_ONLY = 1 << 5;
        /// Arity 0 means "not generic" instead of "any arity"
        const EXACT_ARITY = 1 << 6;
        /// Method type parameters are out of scope (attributes on methods)
        const MUST_NOT_BE_METHOD_TYPE_PARAMETER = 1 << 7;
    }
}

impl LookupOptions {
    /// Accept any symbol shape
    pub const DEFAULT: Self = Self::empty();

    /// Whether the combination is meaningful
    #[must_use]
    pub fn is_valid(self) -> bool {
        if self.contains(Self::MUST_BE_INSTANCE | Self::MUST_NOT_BE_INSTANCE) {
            return false;
        }
        if self.contains(Self::LABELS_ONLY) && self != Self::LABELS_ONLY {
            return false;
        }
        if self.contains(Self::NAMESPACE_ALIASES_ONLY)
            && self.intersects(
                Self::MUST_BE_INSTANCE | Self::MUST_NOT_BE_INSTANCE | Self::MUST_BE_INVOCABLE_IF_MEMBER,
            )
        {
            return false;
        }
        true
    }

    /// Fail hard on a contradictory combination
    ///
    /// # Panics
    ///
    /// Panics if [`Self::is_valid`] is false; callers build options from
    /// syntax, so an invalid set is a bug in the caller.
    pub fn assert_valid(self) {
        assert!(self.is_valid(), "invalid lookup options: {self:?}");
    }

    /// Lookup is for a statement label
    #[must_use]
    pub fn is_label_lookup(self) -> bool {
        self.contains(Self::LABELS_ONLY)
    }

    /// Lookup only wants `using` aliases
    #[must_use]
    pub fn is_alias_lookup(self) -> bool {
        self.contains(Self::NAMESPACE_ALIASES_ONLY)
    }
}
