//! Run-level settings: where the raw inputs live, which variables are
//! daily-accumulated, and the output prefix.
use super::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub directories: Vec<String>,
    /// Variables stored as running daily accumulations, to be differenced to hourly.
    #[serde(default)]
    pub hourly_acc: Vec<String>,
    #[serde(default)]
    pub output_file: Option<String>,
}

impl RunConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigurationError> {
        serde_yaml::from_str(s).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        super::read_document(path.as_ref())
    }
}
