//! Human-readable renderings of resolution results.
pub mod report;

pub use report::format_plan;
