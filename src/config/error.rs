//! Defines the error type for configuration loading and strategy table construction.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Calculation descriptors on a parameter whose kind has no strategy namespace.
    /// Pure unit-conversion parameters land here when someone gives them a `calc` list.
    #[error("strategy resolution undefined for kind '{kind}' (parameter '{parameter}')")]
    UndefinedKind { parameter: String, kind: String },
    #[error("unknown {kind} strategy '{strategy}' for parameter '{parameter}'")]
    UnknownStrategy {
        parameter: String,
        kind: String,
        strategy: String,
    },
    #[error("invalid configuration document: {0}")]
    Parse(String),
    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },
}
