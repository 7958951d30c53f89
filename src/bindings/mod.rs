//! Foreign-language facades.
pub mod python;
