//! Static checks and run statistics for the strategy table.
pub mod cycles;
pub mod telemetry;

pub use cycles::{check_acyclic, detect, CircularDependencyError, Cycle, RequirementGraph};
pub use telemetry::ResolutionStats;
