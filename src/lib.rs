//! Derived-variable dependency resolver for meteorological forcing pre-processing.
//!
//! Given a parameter map (each derived variable with its alternative formulas,
//! highest priority first) and the names of variables already loaded, the
//! resolver decides which variables can be derived, in what order, and with
//! which formula. It never computes anything itself.

pub mod analysis;
pub mod compute;
pub mod config;
pub mod display;
pub mod preprocess;
pub mod resolve;
pub mod store;
pub mod strategy;

#[cfg(feature = "python")]
mod bindings;

pub use analysis::{CircularDependencyError, ResolutionStats};
pub use config::{ConfigurationError, ParamMap, ParamSpec, RunConfig};
pub use preprocess::PreprocessPlan;
pub use resolve::{resolve, resolve_scenarios, ResolutionPlan, ResolveError, ResolvedEntry};
pub use store::{Requirements, StrategyTable};
pub use strategy::{Catalog, Namespace, StrategyNamespace, StrategyRef, StrategyRegistry};
