//! Turns a strategy table and a set of available inputs into an ordered plan.
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod resolver;

pub use error::ResolveError;
pub use orchestrator::{resolve, resolve_scenarios};
pub use plan::{ResolutionPlan, ResolvedEntry};
pub use resolver::{Availability, Resolver};
