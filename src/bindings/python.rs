// FFI Facade: exposes the resolver to the Python pre-processing driver.
// Strategies are resolved against the built-in catalog; the Python side
// dispatches on the returned (kind, strategy id) pair.

use crate::config::ParamMap;
use crate::display::format_plan;
use crate::resolve::resolve;
use crate::strategy::Catalog;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

type PlanRow = (String, Vec<String>, String, String);

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Returns `[(parameter, requires, kind, strategy_id), ...]` in evaluation order.
#[pyfunction]
fn resolve_plan(param_map_yaml: &str, inputs: Vec<String>) -> PyResult<Vec<PlanRow>> {
    let params = ParamMap::from_yaml_str(param_map_yaml).map_err(to_py_err)?;
    let plan = resolve(&params, &Catalog, inputs).map_err(to_py_err)?;
    Ok(plan
        .into_entries()
        .into_iter()
        .map(|e| {
            (
                e.parameter,
                e.requires.to_vec(),
                e.strategy.namespace.as_str().to_string(),
                e.strategy.id.to_string(),
            )
        })
        .collect())
}

/// Same resolution, rendered as the plain-text plan report.
#[pyfunction]
fn describe_plan(param_map_yaml: &str, inputs: Vec<String>) -> PyResult<String> {
    let params = ParamMap::from_yaml_str(param_map_yaml).map_err(to_py_err)?;
    let plan = resolve(&params, &Catalog, inputs).map_err(to_py_err)?;
    Ok(format_plan(&plan))
}

/// This function defines the `met_preprocessor._core` Python module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(resolve_plan, m)?)?;
    m.add_function(wrap_pyfunction!(describe_plan, m)?)?;
    Ok(())
}
