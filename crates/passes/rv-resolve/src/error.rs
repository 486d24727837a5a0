//! Error types for name resolution

use crate::config::ResolverConfig;
use crate::viability::RejectReason;
use rv_symbols::SymbolId;
use std::mem;

/// Lookup was abandoned because its cancellation flag was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("name lookup was cancelled")]
pub struct Cancelled;

/// Why a name could not be resolved to a usable symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// Nothing by that name is visible
    #[error("the name `{name}` does not exist in the current context{}", did_you_mean(.suggestions))]
    Undefined {
        /// The name that was not found
        name: String,
        /// Similar visible names, closest first
        suggestions: Vec<String>,
    },

    /// Several unrelated symbols by that name are visible at the same level
    #[error("`{name}` is ambiguous between {} candidates", .candidates.len())]
    Ambiguous {
        /// The ambiguous name
        name: String,
        /// Every viable candidate
        candidates: Vec<SymbolId>,
    },

    /// Found, but not usable here
    #[error("`{name}` cannot be used here{}", because(.reason.as_ref()))]
    NotViable {
        /// The name that was found
        name: String,
        /// First rejected candidate
        symbol: SymbolId,
        /// Why it was rejected, if the lookup was diagnosing
        reason: Option<RejectReason>,
    },

    /// Lookup was cancelled before finishing
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!(" (did you mean `{only}`?)"),
        many => format!(" (did you mean one of `{}`?)", many.join("`, `")),
    }
}

fn because(reason: Option<&RejectReason>) -> String {
    reason.map_or_else(String::new, |rejected| format!(": it {rejected}"))
}

/// Rank `available` names by edit distance to `name`
///
/// Names farther than the configured distance are dropped; an exact match is
/// never suggested.
#[must_use]
pub fn compute_suggestions<'name>(
    name: &str,
    available: impl IntoIterator<Item = &'name str>,
    config: &ResolverConfig,
) -> Vec<String> {
    if !config.suggestions {
        return Vec::new();
    }
    let mut ranked: Vec<(&str, usize)> = available
        .into_iter()
        .filter(|candidate| *candidate != name)
        .map(|candidate| (candidate, levenshtein_distance(name, candidate)))
        .filter(|(_, distance)| *distance <= config.max_suggestion_distance)
        .collect();

    ranked.sort_by(|left, right| left.1.cmp(&right.1).then_with(|| left.0.cmp(right.0)));
    ranked.dedup_by(|left, right| left.0 == right.0);
    ranked
        .into_iter()
        .take(config.max_suggestions)
        .map(|(candidate, _)| candidate.to_string())
        .collect()
}

/// Levenshtein distance between two strings, counted in chars
fn levenshtein_distance(source: &str, target: &str) -> usize {
    let target: Vec<char> = target.chars().collect();
    let mut previous: Vec<usize> = (0..=target.len()).collect();
    let mut current = vec![0; target.len() + 1];

    for (idx, source_char) in source.chars().enumerate() {
        current[0] = idx + 1;
        for (jdx, target_char) in target.iter().enumerate() {
            let cost = usize::from(source_char != *target_char);
            current[jdx + 1] = (previous[jdx + 1] + 1)
                .min(current[jdx] + 1)
                .min(previous[jdx] + cost);
        }
        mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}
