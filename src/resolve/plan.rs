use crate::analysis::ResolutionStats;
use crate::store::Requirements;
use serde::Serialize;

/// One derivation step: compute `parameter` with `strategy` from `requires`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntry<S> {
    pub parameter: String,
    pub requires: Requirements,
    pub strategy: S,
    /// Index of the chosen option in the parameter's option list (0 = highest).
    pub priority: usize,
}

/// The ordered derivation steps produced by the resolver.
///
/// Consumers run the entries in order and publish each result under its
/// parameter name before moving on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionPlan<S> {
    entries: Vec<ResolvedEntry<S>>,
    unresolved: Vec<String>,
    stats: ResolutionStats,
}

impl<S> ResolutionPlan<S> {
    pub(crate) fn new(entries: Vec<ResolvedEntry<S>>, unresolved: Vec<String>, stats: ResolutionStats) -> Self {
        Self { entries, unresolved, stats }
    }

    pub fn entries(&self) -> &[ResolvedEntry<S>] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedEntry<S>> { self.entries.iter() }

    pub fn get(&self, parameter: &str) -> Option<&ResolvedEntry<S>> {
        self.entries.iter().find(|e| e.parameter == parameter)
    }

    pub fn position(&self, parameter: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.parameter == parameter)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.parameter.as_str())
    }

    /// Parameters that have options but none ever became satisfiable.
    pub fn unresolved(&self) -> &[String] { &self.unresolved }

    pub fn stats(&self) -> ResolutionStats { self.stats }

    pub fn into_entries(self) -> Vec<ResolvedEntry<S>> { self.entries }
}

impl<'a, S> IntoIterator for &'a ResolutionPlan<S> {
    type Item = &'a ResolvedEntry<S>;
    type IntoIter = std::slice::Iter<'a, ResolvedEntry<S>>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}
