use crate::resolve::ResolutionPlan;
use std::fmt::{Display, Write};

/// Renders a plan as numbered derivation steps, followed by any parameters
/// that could not be resolved.
pub fn format_plan<S: Display>(plan: &ResolutionPlan<S>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "DERIVATION PLAN ({} steps)", plan.len());
    let _ = writeln!(out, "--------------------------------------------------");

    for (i, entry) in plan.iter().enumerate() {
        let inputs = if entry.requires.is_empty() {
            "(no inputs)".to_string()
        } else {
            entry.requires.names().join(", ")
        };
        let _ = writeln!(
            out,
            "[{}] {} <- {} via {} [option {}]",
            i + 1,
            entry.parameter,
            inputs,
            entry.strategy,
            entry.priority + 1
        );
    }

    if !plan.unresolved().is_empty() {
        let _ = writeln!(out, "Unresolved: {}", plan.unresolved().join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParamMap, ParamSpec};
    use crate::resolve::resolve;
    use crate::strategy::Catalog;

    #[test]
    fn test_format_plan() {
        let params = ParamMap::new()
            .with(
                "Qair",
                ParamSpec::standard()
                    .with_calc("vp,Tair", "vp_tair_sh")
                    .with_calc("vpd,Tair", "vpd_tair_sh"),
            )
            .with("CO2air", ParamSpec::optional().with_calc("none", "default_co2"))
            .with("Wind", ParamSpec::standard().with_calc("wind_e,wind_n", "wind_speed"));
        let plan = resolve(&params, &Catalog, ["vpd", "Tair"]).unwrap();

        let expected = "\
DERIVATION PLAN (2 steps)
--------------------------------------------------
[1] Qair <- vpd, Tair via standard::vpd_tair_sh [option 2]
[2] CO2air <- (no inputs) via optional::default_co2 [option 1]
Unresolved: Wind
";
        assert_eq!(format_plan(&plan), expected);
    }
}
