use crate::analysis::CircularDependencyError;
use crate::config::ConfigurationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Circular(#[from] CircularDependencyError),
}
