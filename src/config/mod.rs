//! Typed configuration documents: the parameter map and the run config.
pub mod error;
pub mod param_map;
pub mod run;

pub use error::ConfigurationError;
pub use param_map::{CalcDescriptor, ParamKind, ParamMap, ParamSpec};
pub use run::RunConfig;

use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads a YAML or JSON document from disk. `.json` files go through
/// `serde_json`; everything else is treated as YAML.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigurationError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&text).map_err(|e| ConfigurationError::Parse(e.to_string()))
    } else {
        serde_yaml::from_str(&text).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }
}
