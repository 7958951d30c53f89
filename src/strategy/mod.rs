//! Strategy namespaces: where a `(kind, strategy_id)` pair is turned into
//! something the evaluation loop can invoke.
pub mod catalog;
pub mod namespace;

pub use catalog::{Catalog, StrategyRef};
pub use namespace::{Namespace, StrategyNamespace, StrategyRegistry};
