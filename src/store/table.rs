//! table.rs
//! Columnar strategy table: parameter names plus a flat option array
//! addressed by `(start, count)` ranges, one range per parameter.

use super::types::{CalculationOption, ParamId, Requirements};
use crate::config::{ConfigurationError, ParamMap};
use crate::strategy::{Namespace, StrategyNamespace};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct StrategyTable<S> {
    names: Vec<String>,
    index: HashMap<String, ParamId>,

    // Options (CSR)
    options_flat: Vec<CalculationOption<S>>,
    option_ranges: Vec<(u32, u32)>, // (start, count)
}

impl<S> Default for StrategyTable<S> {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            index: HashMap::new(),
            options_flat: Vec::new(),
            option_ranges: Vec::new(),
        }
    }
}

impl<S: Clone> StrategyTable<S> {
    /// Builds the table from the parameter map, resolving every strategy id
    /// against the namespace of its parameter's kind. Parameters with no
    /// calculation descriptors get an entry with no options.
    pub fn build<N>(params: &ParamMap, namespace: &N) -> Result<Self, ConfigurationError>
    where
        N: StrategyNamespace<Strategy = S>,
    {
        let mut table = Self::new();

        for (name, spec) in params.iter() {
            let mut options = Vec::with_capacity(spec.calc.len());

            if !spec.calc.is_empty() {
                let ns = spec
                    .kind
                    .as_ref()
                    .and_then(Namespace::for_kind)
                    .ok_or_else(|| ConfigurationError::UndefinedKind {
                        parameter: name.to_string(),
                        kind: spec.kind.as_ref().map_or_else(|| "<unset>".to_string(), |k| k.to_string()),
                    })?;

                for calc in &spec.calc {
                    let strategy = namespace.lookup(ns, &calc.func).ok_or_else(|| {
                        ConfigurationError::UnknownStrategy {
                            parameter: name.to_string(),
                            kind: ns.to_string(),
                            strategy: calc.func.clone(),
                        }
                    })?;
                    options.push(CalculationOption {
                        requires: Requirements::parse(&calc.deps),
                        strategy,
                    });
                }
            }

            table.push_param(name, options);
        }

        debug!(
            params = table.count(),
            options = table.total_options(),
            "strategy table built"
        );
        Ok(table)
    }
}

impl<S> StrategyTable<S> {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.names.len() }
    /// Options reachable through the ranges. Options orphaned by a replaced
    /// parameter are not counted.
    pub fn total_options(&self) -> usize {
        self.option_ranges.iter().map(|&(_, count)| count as usize).sum()
    }

    /// Appends a parameter with its options in priority order.
    /// A repeated name keeps its original position and id but takes the new options.
    pub fn push_param(&mut self, name: &str, options: Vec<CalculationOption<S>>) -> ParamId {
        let start = self.options_flat.len() as u32;
        let count = options.len() as u32;
        self.options_flat.extend(options);

        if let Some(id) = self.id_of(name) {
            self.option_ranges[id.index()] = (start, count);
            return id;
        }

        let id = ParamId::new(self.names.len());
        self.option_ranges.push((start, count));
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<ParamId> { self.index.get(name).copied() }
    pub fn name(&self, id: ParamId) -> &str { &self.names[id.index()] }

    #[inline(always)]
    pub fn options(&self, id: ParamId) -> &[CalculationOption<S>] {
        let (start, count) = self.option_ranges[id.index()];
        &self.options_flat[start as usize..(start + count) as usize]
    }

    pub fn ids(&self) -> impl Iterator<Item = ParamId> {
        (0..self.names.len()).map(ParamId::new)
    }

    /// Parameters in configuration order with their options.
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, &str, &[CalculationOption<S>])> + '_ {
        self.ids().map(move |id| (id, self.name(id), self.options(id)))
    }
}
