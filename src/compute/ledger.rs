use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("'{parameter}' requires '{input}', which has not been published")]
    MissingInput { parameter: String, input: String },
    #[error("strategy for '{parameter}' failed: {message}")]
    Strategy { parameter: String, message: String },
}

/// Named values known to the evaluation loop, in publication order.
#[derive(Debug, Clone)]
pub struct Ledger<V> {
    values: IndexMap<String, V>,
}

impl<V> Default for Ledger<V> {
    fn default() -> Self { Self { values: IndexMap::new() } }
}

impl<V> Ledger<V> {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, name: &str) -> Option<&V> { self.values.get(name) }
    pub fn contains(&self, name: &str) -> bool { self.values.contains_key(name) }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Publishes `value` under `name`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.values.insert(name.into(), value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Moves a value to a new name. Returns false if `from` is absent.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.values.shift_remove(from) {
            Some(value) => {
                self.values.insert(to.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.values.retain(|name, _| keep(name));
    }
}

impl<V, K: Into<String>> FromIterator<(K, V)> for Ledger<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}
