//! Defines the core data structures for the strategy table.
pub mod table;
pub mod types;

pub use table::StrategyTable;
pub use types::{CalculationOption, ParamId, Requirements, NO_REQUIREMENTS};
