use crate::compute::ledger::{EvaluationError, Ledger};
use crate::resolve::{ResolutionPlan, ResolvedEntry};
use std::fmt;
use tracing::trace;

pub struct Engine;

impl Engine {
    /// Executes the plan against the ledger, strictly in order.
    ///
    /// For each entry the required inputs are gathered from the ledger (in the
    /// entry's requirement order) and handed to `evaluate` together with the
    /// entry; the result is published under the parameter's name before the
    /// next entry runs. Entries with no requirements receive an empty slice.
    pub fn run<S, V, E, F>(
        plan: &ResolutionPlan<S>,
        ledger: &mut Ledger<V>,
        mut evaluate: F,
    ) -> Result<(), EvaluationError>
    where
        F: FnMut(&ResolvedEntry<S>, &[&V]) -> Result<V, E>,
        E: fmt::Display,
    {
        for entry in plan {
            let value = {
                let inputs = Self::gather_inputs(entry, ledger)?;
                evaluate(entry, &inputs).map_err(|e| EvaluationError::Strategy {
                    parameter: entry.parameter.clone(),
                    message: e.to_string(),
                })?
            };
            trace!(parameter = %entry.parameter, priority = entry.priority, "published");
            ledger.insert(entry.parameter.as_str(), value);
        }
        Ok(())
    }

    fn gather_inputs<'l, S, V>(
        entry: &ResolvedEntry<S>,
        ledger: &'l Ledger<V>,
    ) -> Result<Vec<&'l V>, EvaluationError> {
        entry
            .requires
            .iter()
            .map(|name| {
                ledger.get(name).ok_or_else(|| EvaluationError::MissingInput {
                    parameter: entry.parameter.clone(),
                    input: name.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParamMap, ParamSpec};
    use crate::resolve::resolve;
    use crate::strategy::{Namespace, StrategyRegistry};

    type Formula = fn(&[&f64]) -> Result<f64, String>;

    fn add(inputs: &[&f64]) -> Result<f64, String> { Ok(inputs.iter().copied().sum()) }
    fn constant(_: &[&f64]) -> Result<f64, String> { Ok(350.0) }
    fn fails(_: &[&f64]) -> Result<f64, String> { Err("negative vapour pressure".into()) }

    fn registry() -> StrategyRegistry<Formula> {
        StrategyRegistry::new()
            .with(Namespace::Standard, "add", add as Formula)
            .with(Namespace::Optional, "constant", constant as Formula)
            .with(Namespace::Standard, "fails", fails as Formula)
    }

    fn apply(entry: &ResolvedEntry<Formula>, inputs: &[&f64]) -> Result<f64, String> {
        (entry.strategy)(inputs)
    }

    #[test]
    fn test_results_published_before_later_entries() {
        let params = ParamMap::new()
            .with("C", ParamSpec::standard().with_calc("B,a", "add"))
            .with("B", ParamSpec::standard().with_calc("a,CO2", "add"))
            .with("CO2", ParamSpec::optional().with_calc("none", "constant"));
        let plan = resolve(&params, &registry(), ["a"]).unwrap();

        let mut ledger: Ledger<f64> = [("a", 1.0)].into_iter().collect();
        Engine::run(&plan, &mut ledger, apply).unwrap();

        assert_eq!(ledger.get("CO2"), Some(&350.0));
        assert_eq!(ledger.get("B"), Some(&351.0));
        assert_eq!(ledger.get("C"), Some(&352.0));
        assert_eq!(ledger.names().collect::<Vec<_>>(), ["a", "CO2", "B", "C"]);
    }

    #[test]
    fn test_no_requirement_entry_gets_empty_inputs() {
        let params = ParamMap::new().with("CO2", ParamSpec::optional().with_calc("", "constant"));
        let plan = resolve(&params, &registry(), Vec::<String>::new()).unwrap();

        let mut seen = None;
        let mut ledger = Ledger::new();
        Engine::run(&plan, &mut ledger, |entry, inputs: &[&f64]| {
            seen = Some(inputs.len());
            apply(entry, inputs)
        })
        .unwrap();
        assert_eq!(seen, Some(0));
    }

    #[test]
    fn test_missing_input_is_reported() {
        let params = ParamMap::new().with("B", ParamSpec::standard().with_calc("a", "add"));
        let plan = resolve(&params, &registry(), ["a"]).unwrap();

        // `a` was declared available but never loaded into the ledger.
        let mut ledger = Ledger::new();
        let err = Engine::run(&plan, &mut ledger, apply).unwrap_err();
        assert_eq!(err, EvaluationError::MissingInput { parameter: "B".into(), input: "a".into() });
    }

    #[test]
    fn test_upgrade_in_place_can_precede_its_new_input() {
        // Q keeps its first plan position after upgrading to an option that
        // needs Y, which is planned after it.
        let params = ParamMap::new()
            .with("Q", ParamSpec::standard().with_calc("x,Y", "add").with_calc("x", "add"))
            .with("Y", ParamSpec::standard().with_calc("x", "add"));
        let plan = resolve(&params, &registry(), ["x"]).unwrap();
        assert_eq!(plan.parameters().collect::<Vec<_>>(), ["Q", "Y"]);

        let mut ledger: Ledger<f64> = [("x", 1.0)].into_iter().collect();
        let err = Engine::run(&plan, &mut ledger, apply).unwrap_err();
        assert!(matches!(err, EvaluationError::MissingInput { ref input, .. } if input == "Y"));
    }

    #[test]
    fn test_strategy_failure_is_wrapped() {
        let params = ParamMap::new().with("Qair", ParamSpec::standard().with_calc("vp", "fails"));
        let plan = resolve(&params, &registry(), ["vp"]).unwrap();

        let mut ledger: Ledger<f64> = [("vp", 1.0)].into_iter().collect();
        let err = Engine::run(&plan, &mut ledger, apply).unwrap_err();
        assert_eq!(err.to_string(), "strategy for 'Qair' failed: negative vapour pressure");
        assert!(!ledger.contains("Qair"));
    }

    #[test]
    fn test_ledger_rename_and_retain() {
        let mut ledger: Ledger<i32> = [("t2m", 1), ("u10", 2), ("tp", 3)].into_iter().collect();
        assert!(ledger.rename("t2m", "Tair"));
        assert!(!ledger.rename("missing", "X"));
        ledger.retain(|name| name != "u10");
        assert_eq!(ledger.names().collect::<Vec<_>>(), ["tp", "Tair"]);
    }
}
