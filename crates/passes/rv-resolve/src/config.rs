//! Resolver settings
//!
//! Hosts deserialize this from their own configuration source; every field
//! has a default so partial configurations are fine.

use serde::{Deserialize, Serialize};

/// Tunables for diagnostics produced from lookup results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Offer "did you mean" suggestions for undefined names
    pub suggestions: bool,
    /// Largest edit distance a suggestion may have
    pub max_suggestion_distance: usize,
    /// Most suggestions reported per undefined name
    pub max_suggestions: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            suggestions: true,
            max_suggestion_distance: 3,
            max_suggestions: 3,
        }
    }
}
