//! Runs a resolution plan against a store of named values.
pub mod engine;
pub mod ledger;

pub use engine::Engine;
pub use ledger::{EvaluationError, Ledger};
