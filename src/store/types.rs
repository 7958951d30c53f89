use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Synthetic name that is always available; an option requiring only this
/// needs no inputs at all.
pub const NO_REQUIREMENTS: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ParamId(pub u32);

impl ParamId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// The input names one calculation option needs. Empty means "always satisfiable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirements(SmallVec<[String; 4]>);

impl Requirements {
    /// Normalizes a comma-separated requirement string: segments are trimmed,
    /// empty segments and the `none` sentinel are dropped, repeats collapse.
    /// `""` and `"none"` both parse to the empty set.
    pub fn parse(raw: &str) -> Self {
        Self::from_names(raw.split(','))
    }

    pub fn from_names<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut out: SmallVec<[String; 4]> = SmallVec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || name == NO_REQUIREMENTS || out.iter().any(|n| n == name) {
                continue;
            }
            out.push(name.to_string());
        }
        Self(out)
    }

    pub fn none() -> Self { Self::default() }

    pub fn names(&self) -> &[String] { &self.0 }
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn to_vec(&self) -> Vec<String> { self.0.to_vec() }
}

/// One alternative way to derive a parameter. Its priority is its position
/// in the parameter's option list (0 is highest).
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOption<S> {
    pub requires: Requirements,
    pub strategy: S,
}
