//! The full pre-processing run, expressed as data.
//!
//! Stage order:
//! 1. rename raw dataset variables to canonical parameter names;
//! 2. difference daily accumulations to hourly;
//! 3. convert loaded parameters to their target units;
//! 4. derive everything the resolver can reach, converting each derived
//!    result to its target unit as soon as it is computed;
//! 5. keep only `standard`/`optional` variables for output.
//!
//! The numeric work of stages 2-4 belongs to the dataset layer; this module
//! decides what each stage touches.

use crate::compute::Ledger;
use crate::config::{ParamMap, RunConfig};
use crate::resolve::{resolve, ResolutionPlan, ResolveError};
use crate::strategy::StrategyNamespace;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessPlan<S> {
    /// Raw dataset name -> canonical parameter name.
    pub renames: IndexMap<String, String>,
    pub hourly_accumulations: Vec<String>,
    /// Loaded parameters that declare a target unit, in configuration order.
    pub unit_conversions: Vec<String>,
    pub derivations: ResolutionPlan<S>,
    /// Derived parameters that declare a target unit, in plan order.
    pub derived_unit_conversions: Vec<String>,
    /// Variables written out at the end: loaded and derived, `standard`/`optional` only.
    pub retained: Vec<String>,
}

impl<S: Clone> PreprocessPlan<S> {
    pub fn build<N>(
        params: &ParamMap,
        run: &RunConfig,
        namespace: &N,
        dataset_vars: &[impl AsRef<str>],
    ) -> Result<Self, ResolveError>
    where
        N: StrategyNamespace<Strategy = S>,
    {
        let renames = params.rename_criteria(dataset_vars);

        let loaded: IndexSet<String> = dataset_vars
            .iter()
            .map(|v| {
                let v = v.as_ref();
                renames.get(v).cloned().unwrap_or_else(|| v.to_string())
            })
            .collect();

        let mut hourly_accumulations = Vec::with_capacity(run.hourly_acc.len());
        for var in &run.hourly_acc {
            if loaded.contains(var) {
                hourly_accumulations.push(var.clone());
            } else {
                warn!(variable = %var, "hourly accumulation requested for a variable that was not loaded");
            }
        }

        let mut unit_conversions = Vec::new();
        for param in params.unit_conversion_params() {
            if loaded.contains(param) {
                unit_conversions.push(param.to_string());
            } else {
                debug!(parameter = param, "unit conversion skipped, parameter not loaded");
            }
        }

        let derivations = resolve(params, namespace, loaded.iter().cloned())?;

        let derived_unit_conversions: Vec<String> = derivations
            .parameters()
            .filter(|p| params.get(p).is_some_and(|spec| spec.unit.is_some()))
            .map(str::to_string)
            .collect();

        let mut outputs = loaded;
        outputs.extend(derivations.parameters().map(str::to_string));
        let retained: Vec<String> = outputs.into_iter().filter(|v| params.is_retained(v)).collect();

        debug!(
            renames = renames.len(),
            conversions = unit_conversions.len(),
            derivations = derivations.len(),
            derived_conversions = derived_unit_conversions.len(),
            retained = retained.len(),
            "pre-processing plan built"
        );

        Ok(Self {
            renames,
            hourly_accumulations,
            unit_conversions,
            derivations,
            derived_unit_conversions,
            retained,
        })
    }

    /// Stage 1 applied to a ledger keyed by raw dataset names.
    pub fn apply_renames<V>(&self, ledger: &mut Ledger<V>) {
        for (from, to) in &self.renames {
            ledger.rename(from, to);
        }
    }

    /// Stage 5: drop everything that is not a retained output.
    pub fn retain_outputs<V>(&self, ledger: &mut Ledger<V>) {
        ledger.retain(|name| self.retained.iter().any(|r| r == name));
    }
}
