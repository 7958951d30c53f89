//! Entry points: build the table, prove it acyclic, resolve.
use super::error::ResolveError;
use super::plan::ResolutionPlan;
use super::resolver::{Availability, Resolver};
use crate::analysis::check_acyclic;
use crate::config::ParamMap;
use crate::store::StrategyTable;
use crate::strategy::StrategyNamespace;
use rayon::prelude::*;
use tracing::debug;

/// Decides which parameters can be derived from `initial_inputs`, in what
/// order, and with which option.
///
/// # Returns
/// - `Ok(plan)`, possibly leaving some parameters unresolved.
/// - `Err(ResolveError::Configuration)` if a strategy cannot be looked up.
/// - `Err(ResolveError::Circular)` if the union requirement graph has a cycle.
pub fn resolve<N, I, T>(
    params: &ParamMap,
    namespace: &N,
    initial_inputs: I,
) -> Result<ResolutionPlan<N::Strategy>, ResolveError>
where
    N: StrategyNamespace,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let table = StrategyTable::build(params, namespace)?;
    check_acyclic(&table)?;
    Ok(Resolver::new(&table, Availability::seeded(initial_inputs)).run())
}

/// Resolves one configuration against several independent input sets.
///
/// The table is built and checked once; every scenario then gets its own
/// resolver. Plans come back in the order of `scenarios`.
pub fn resolve_scenarios<N>(
    params: &ParamMap,
    namespace: &N,
    scenarios: &[Vec<String>],
) -> Result<Vec<ResolutionPlan<N::Strategy>>, ResolveError>
where
    N: StrategyNamespace,
    N::Strategy: Send + Sync,
{
    let table = StrategyTable::build(params, namespace)?;
    check_acyclic(&table)?;

    debug!(scenarios = scenarios.len(), "resolving scenarios");
    Ok(scenarios
        .par_iter()
        .map(|inputs| Resolver::new(&table, Availability::seeded(inputs.iter().cloned())).run())
        .collect())
}
