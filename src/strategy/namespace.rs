use crate::config::ParamKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The two parameter kinds that own a strategy namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Standard,
    Optional,
}

impl Namespace {
    /// `None` for kinds with no strategies (e.g. pure unit-conversion parameters).
    pub fn for_kind(kind: &ParamKind) -> Option<Self> {
        match kind {
            ParamKind::Standard => Some(Namespace::Standard),
            ParamKind::Optional => Some(Namespace::Optional),
            ParamKind::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Standard => "standard",
            Namespace::Optional => "optional",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup seam between configuration and computation. The resolver never
/// invokes a strategy; it only carries the handle returned here into the plan.
pub trait StrategyNamespace {
    type Strategy: Clone;

    fn lookup(&self, namespace: Namespace, id: &str) -> Option<Self::Strategy>;
}

/// A map-backed namespace, one table per kind.
#[derive(Debug, Clone)]
pub struct StrategyRegistry<S> {
    standard: HashMap<String, S>,
    optional: HashMap<String, S>,
}

impl<S> Default for StrategyRegistry<S> {
    fn default() -> Self {
        Self { standard: HashMap::new(), optional: HashMap::new() }
    }
}

impl<S> StrategyRegistry<S> {
    pub fn new() -> Self { Self::default() }

    /// Registers `strategy` under `id`, returning any handle it replaced.
    pub fn register(&mut self, namespace: Namespace, id: impl Into<String>, strategy: S) -> Option<S> {
        self.table_mut(namespace).insert(id.into(), strategy)
    }

    pub fn with(mut self, namespace: Namespace, id: &str, strategy: S) -> Self {
        self.register(namespace, id, strategy);
        self
    }

    pub fn len(&self) -> usize { self.standard.len() + self.optional.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn table(&self, namespace: Namespace) -> &HashMap<String, S> {
        match namespace {
            Namespace::Standard => &self.standard,
            Namespace::Optional => &self.optional,
        }
    }

    fn table_mut(&mut self, namespace: Namespace) -> &mut HashMap<String, S> {
        match namespace {
            Namespace::Standard => &mut self.standard,
            Namespace::Optional => &mut self.optional,
        }
    }
}

impl<S: Clone> StrategyNamespace for StrategyRegistry<S> {
    type Strategy = S;

    fn lookup(&self, namespace: Namespace, id: &str) -> Option<S> {
        self.table(namespace).get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_scoped_by_namespace() {
        let registry = StrategyRegistry::new()
            .with(Namespace::Standard, "wind_speed", 1)
            .with(Namespace::Optional, "calc_snow", 2);

        assert_eq!(registry.lookup(Namespace::Standard, "wind_speed"), Some(1));
        assert_eq!(registry.lookup(Namespace::Optional, "wind_speed"), None);
        assert_eq!(registry.lookup(Namespace::Optional, "calc_snow"), Some(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_replaces_existing_handle() {
        let mut registry = StrategyRegistry::new();
        assert_eq!(registry.register(Namespace::Standard, "f", "old"), None);
        assert_eq!(registry.register(Namespace::Standard, "f", "new"), Some("old"));
        assert_eq!(registry.lookup(Namespace::Standard, "f"), Some("new"));
    }

    #[test]
    fn test_only_standard_and_optional_have_namespaces() {
        assert_eq!(Namespace::for_kind(&ParamKind::Standard), Some(Namespace::Standard));
        assert_eq!(Namespace::for_kind(&ParamKind::Optional), Some(Namespace::Optional));
        assert_eq!(Namespace::for_kind(&ParamKind::Other("conversion".into())), None);
    }
}
