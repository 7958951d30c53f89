//! The parameter map: every canonical variable, how it is named in raw inputs,
//! its target unit and the alternative formulas that can derive it.

use super::error::ConfigurationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Declared kind of a parameter. Only `standard` and `optional` parameters
/// carry derivable formulas; any other kind is a pass-through/conversion variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamKind {
    Standard,
    Optional,
    Other(String),
}

impl ParamKind {
    pub fn as_str(&self) -> &str {
        match self {
            ParamKind::Standard => "standard",
            ParamKind::Optional => "optional",
            ParamKind::Other(s) => s,
        }
    }

    /// Whether variables of this kind are kept in the final output.
    pub fn is_retained(&self) -> bool {
        matches!(self, ParamKind::Standard | ParamKind::Optional)
    }
}

impl From<String> for ParamKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "standard" => ParamKind::Standard,
            "optional" => ParamKind::Optional,
            _ => ParamKind::Other(s),
        }
    }
}

impl From<ParamKind> for String {
    fn from(kind: ParamKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alternative formula: a comma-separated list of required inputs and the
/// identifier of the strategy that computes the parameter from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcDescriptor {
    #[serde(default, alias = "required")]
    pub deps: String,
    #[serde(alias = "strategy_id")]
    pub func: String,
}

impl CalcDescriptor {
    pub fn new(deps: impl Into<String>, func: impl Into<String>) -> Self {
        Self { deps: deps.into(), func: func.into() }
    }

    /// The verbatim split of `deps` on `,`. An empty string yields `[""]`;
    /// `Requirements::parse` is the normalized view used for resolution.
    pub fn raw_requirements(&self) -> Vec<&str> {
        self.deps.split(',').collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(default, rename = "type", alias = "kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ParamKind>,
    #[serde(default, alias = "options", skip_serializing_if = "Vec::is_empty")]
    pub calc: Vec<CalcDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Raw dataset names that are renamed to this parameter on load.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_param: Vec<String>,
}

impl ParamSpec {
    pub fn new(kind: ParamKind) -> Self {
        Self { kind: Some(kind), ..Default::default() }
    }

    pub fn standard() -> Self { Self::new(ParamKind::Standard) }
    pub fn optional() -> Self { Self::new(ParamKind::Optional) }

    pub fn with_calc(mut self, deps: &str, func: &str) -> Self {
        self.calc.push(CalcDescriptor::new(deps, func));
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_inputs(mut self, aliases: &[&str]) -> Self {
        self.input_param.extend(aliases.iter().map(|a| a.to_string()));
        self
    }
}

/// Ordered mapping of parameter name to its spec. Document order is kept:
/// it fixes the resolver's scan order and therefore the resulting plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap {
    params: IndexMap<String, ParamSpec>,
}

impl ParamMap {
    pub fn new() -> Self { Self::default() }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigurationError> {
        serde_yaml::from_str(s).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(s).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        super::read_document(path.as_ref())
    }

    /// Appends (or replaces in place) a parameter.
    pub fn insert(&mut self, name: impl Into<String>, spec: ParamSpec) -> Option<ParamSpec> {
        self.params.insert(name.into(), spec)
    }

    pub fn with(mut self, name: &str, spec: ParamSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> { self.params.get(name) }
    pub fn len(&self) -> usize { self.params.len() }
    pub fn is_empty(&self) -> bool { self.params.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamSpec)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Maps each raw dataset name that appears in some parameter's `input_param`
    /// list to that parameter. When two parameters claim the same alias, the one
    /// declared later wins.
    pub fn rename_criteria<T: AsRef<str>>(&self, dataset_vars: &[T]) -> IndexMap<String, String> {
        let mut criteria = IndexMap::new();
        for (param, spec) in &self.params {
            for alias in &spec.input_param {
                if dataset_vars.iter().any(|v| v.as_ref() == alias) {
                    criteria.insert(alias.clone(), param.clone());
                }
            }
        }
        criteria
    }

    /// Parameters that declare a target unit, in document order.
    pub fn unit_conversion_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(_, spec)| spec.unit.is_some())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Whether `name` is a `standard`/`optional` parameter and thus part of the output.
    pub fn is_retained(&self, name: &str) -> bool {
        self.params
            .get(name)
            .and_then(|spec| spec.kind.as_ref())
            .is_some_and(ParamKind::is_retained)
    }
}
