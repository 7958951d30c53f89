//! The greedy priority resolver.
//!
//! Repeatedly scans the table in configuration order for the first parameter
//! with a satisfiable option, accepts it, and restarts from the top. Accepting
//! option `i` cuts the parameter's live options down to `0..i`, so the only
//! later match possible for it is a strictly higher-priority option, which
//! replaces its plan entry in place. Every match removes at least one live
//! option, so the loop ends after at most `total_options` matches.

use super::plan::{ResolutionPlan, ResolvedEntry};
use crate::analysis::ResolutionStats;
use crate::store::{ParamId, Requirements, StrategyTable, NO_REQUIREMENTS};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Names whose values are known. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct Availability {
    names: HashSet<String>,
}

impl Availability {
    /// The initial inputs plus the `none` sentinel.
    pub fn seeded<I, T>(initial: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut names: HashSet<String> = initial.into_iter().map(Into::into).collect();
        names.insert(NO_REQUIREMENTS.to_string());
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool { self.names.contains(name) }

    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn satisfies(&self, requires: &Requirements) -> bool {
        requires.iter().all(|name| self.contains(name))
    }

    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}

/// Owns all mutable resolution state; the table itself is only read.
pub struct Resolver<'t, S> {
    table: &'t StrategyTable<S>,
    /// Live option count per parameter. Options are dropped from the tail only.
    live: Vec<u32>,
    available: Availability,
    entries: Vec<ResolvedEntry<S>>,
    /// ParamId -> position in `entries`.
    slots: Vec<Option<usize>>,
    stats: ResolutionStats,
}

impl<'t, S: Clone> Resolver<'t, S> {
    pub fn new(table: &'t StrategyTable<S>, available: Availability) -> Self {
        let live = table.ids().map(|id| table.options(id).len() as u32).collect();
        Self {
            table,
            live,
            available,
            entries: Vec::new(),
            slots: vec![None; table.count()],
            stats: ResolutionStats::new(table.total_options()),
        }
    }

    /// Runs to the fixed point and returns the plan.
    pub fn run(mut self) -> ResolutionPlan<S> {
        while let Some((id, priority)) = self.next_match() {
            self.accept(id, priority);
        }

        let unresolved: Vec<String> = self
            .table
            .ids()
            .filter(|id| self.slots[id.index()].is_none() && !self.table.options(*id).is_empty())
            .map(|id| self.table.name(id).to_string())
            .collect();

        debug!(
            steps = self.entries.len(),
            unresolved = unresolved.len(),
            matches = self.stats.matches,
            upgrades = self.stats.upgrades,
            scans = self.stats.scans,
            "resolution finished"
        );
        ResolutionPlan::new(self.entries, unresolved, self.stats)
    }

    /// One scan from the first parameter. Returns the first parameter with a
    /// satisfiable live option, and the index of its highest-priority such option.
    fn next_match(&mut self) -> Option<(ParamId, usize)> {
        self.stats.scans += 1;
        let table = self.table;

        for id in table.ids() {
            let live = self.live[id.index()] as usize;
            let options = &table.options(id)[..live];
            if let Some(i) = options.iter().position(|o| self.available.satisfies(&o.requires)) {
                return Some((id, i));
            }
        }
        None
    }

    fn accept(&mut self, id: ParamId, priority: usize) {
        let table = self.table;
        let option = &table.options(id)[priority];
        let name = table.name(id);

        // Drop the matched option and everything below it.
        self.live[id.index()] = priority as u32;
        self.stats.matches += 1;

        let entry = ResolvedEntry {
            parameter: name.to_string(),
            requires: option.requires.clone(),
            strategy: option.strategy.clone(),
            priority,
        };

        match self.slots[id.index()] {
            Some(pos) => {
                trace!(parameter = name, from = self.entries[pos].priority, to = priority, "upgraded");
                self.stats.upgrades += 1;
                self.entries[pos] = entry;
            }
            None => {
                trace!(parameter = name, priority, "resolved");
                self.slots[id.index()] = Some(self.entries.len());
                self.entries.push(entry);
            }
        }

        self.available.insert(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CalculationOption;

    /// Each entry is (parameter, [(requirement string, strategy)]).
    fn make_table(rows: &[(&str, &[(&str, &'static str)])]) -> StrategyTable<&'static str> {
        let mut table = StrategyTable::new();
        for (name, options) in rows {
            let options = options
                .iter()
                .map(|(deps, f)| CalculationOption { requires: Requirements::parse(deps), strategy: *f })
                .collect();
            table.push_param(name, options);
        }
        table
    }

    fn run(table: &StrategyTable<&'static str>, inputs: &[&str]) -> ResolutionPlan<&'static str> {
        Resolver::new(table, Availability::seeded(inputs.iter().copied())).run()
    }

    fn summary(plan: &ResolutionPlan<&'static str>) -> Vec<(String, Vec<String>, &'static str)> {
        plan.iter()
            .map(|e| (e.parameter.clone(), e.requires.to_vec(), e.strategy))
            .collect()
    }

    #[test]
    fn test_chain_through_sentinel() {
        let table = make_table(&[("B", &[("A", "b_fn")]), ("A", &[("", "a_fn")])]);
        let plan = run(&table, &[]);
        assert_eq!(
            summary(&plan),
            vec![
                ("A".to_string(), vec![], "a_fn"),
                ("B".to_string(), vec!["A".to_string()], "b_fn"),
            ]
        );
    }

    #[test]
    fn test_explicit_none_sentinel() {
        let table = make_table(&[("CO2air", &[("none", "default_co2")])]);
        let plan = run(&table, &[]);
        assert_eq!(plan.get("CO2air").map(|e| &e.requires), Some(&Requirements::none()));
    }

    #[test]
    fn test_third_option_selected_when_first_two_unsatisfiable() {
        let table = make_table(&[(
            "Qair",
            &[("vp,vpd,tair", "vp_vpd_tair_sh"), ("vp,tair", "vp_tair_sh"), ("vpd,tair", "vpd_tair_sh")],
        )]);
        let plan = run(&table, &["vpd", "tair"]);
        let entry = plan.get("Qair").unwrap();
        assert_eq!(entry.strategy, "vpd_tair_sh");
        assert_eq!(entry.priority, 2);
        assert_eq!(entry.requires.names(), ["vpd", "tair"]);
    }

    #[test]
    fn test_highest_priority_satisfiable_option_wins() {
        let table = make_table(&[(
            "Qair",
            &[("vp,vpd,tair", "vp_vpd_tair_sh"), ("vp,tair", "vp_tair_sh"), ("vpd,tair", "vpd_tair_sh")],
        )]);
        let plan = run(&table, &["vp", "vpd", "tair"]);
        assert_eq!(plan.get("Qair").unwrap().strategy, "vp_vpd_tair_sh");
        assert_eq!(plan.stats().matches, 1);
    }

    #[test]
    fn test_priority_upgrade_replaces_entry_in_place() {
        // Q first resolves via its fallback; once Y is derived, Q upgrades.
        let table = make_table(&[
            ("Q", &[("x,Y", "q_best"), ("x", "q_fallback")]),
            ("Y", &[("x", "y_fn")]),
        ]);
        let plan = run(&table, &["x"]);

        assert_eq!(
            summary(&plan),
            vec![
                ("Q".to_string(), vec!["x".to_string(), "Y".to_string()], "q_best"),
                ("Y".to_string(), vec!["x".to_string()], "y_fn"),
            ]
        );
        assert_eq!(plan.get("Q").unwrap().priority, 0);
        assert_eq!(plan.stats().matches, 3);
        assert_eq!(plan.stats().upgrades, 1);
        assert_eq!(plan.stats().first_resolutions(), 2);
    }

    #[test]
    fn test_scan_restarts_from_first_parameter_after_each_match() {
        // After P resolves, R (earlier in the table) must be picked before Q.
        let table = make_table(&[
            ("R", &[("P", "r_fn")]),
            ("P", &[("", "p_fn")]),
            ("Q", &[("", "q_fn")]),
        ]);
        let plan = run(&table, &[]);
        assert_eq!(plan.parameters().collect::<Vec<_>>(), ["P", "R", "Q"]);
    }

    #[test]
    fn test_unresolvable_parameter_is_omitted() {
        let table = make_table(&[
            ("Wind", &[("wind_e,wind_n", "wind_speed")]),
            ("LWdown", &[("Tair", "swinbank")]),
            ("Tair", &[]),
        ]);
        let plan = run(&table, &["Tair"]);
        assert_eq!(plan.parameters().collect::<Vec<_>>(), ["LWdown"]);
        assert_eq!(plan.unresolved(), ["Wind"]);
    }

    #[test]
    fn test_parameters_without_options_are_neither_planned_nor_unresolved() {
        let table = make_table(&[("Tair", &[])]);
        let plan = run(&table, &[]);
        assert!(plan.is_empty());
        assert!(plan.unresolved().is_empty());
        assert_eq!(plan.stats().scans, 1);
    }

    #[test]
    fn test_supplied_input_with_options_is_still_planned() {
        // Parameters already present are not special-cased: a satisfiable option still applies.
        let table = make_table(&[("LWdown", &[("Tair", "swinbank")])]);
        let plan = run(&table, &["LWdown", "Tair"]);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_matches_bounded_by_total_options() {
        // A ladder where every parameter upgrades as many times as it can.
        let table = make_table(&[
            ("A", &[("B,C", "a0"), ("B", "a1"), ("", "a2")]),
            ("B", &[("C", "b0"), ("", "b1")]),
            ("C", &[("", "c0")]),
        ]);
        let plan = run(&table, &[]);
        let stats = plan.stats();

        assert_eq!(stats.options_total, 6);
        assert!(stats.matches <= stats.options_total);
        assert_eq!(plan.get("A").unwrap().strategy, "a0");
        assert_eq!(plan.get("B").unwrap().strategy, "b0");
        assert_eq!(plan.parameters().collect::<Vec<_>>(), ["A", "B", "C"]);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let table = make_table(&[
            ("A", &[("B,C", "a0"), ("", "a1")]),
            ("B", &[("x", "b0"), ("", "b1")]),
            ("C", &[("B", "c0")]),
        ]);
        let first = run(&table, &["x"]);
        for _ in 0..10 {
            assert_eq!(run(&table, &["x"]), first);
        }
    }

    #[test]
    fn test_table_is_untouched_by_resolution() {
        let table = make_table(&[("Q", &[("x,Y", "q_best"), ("x", "q_fallback")]), ("Y", &[("x", "y_fn")])]);
        let before = table.clone();
        let _ = run(&table, &["x"]);
        for id in table.ids() {
            assert_eq!(table.options(id), before.options(id));
        }
    }

    #[test]
    fn test_repeated_parameter_is_planned_once() {
        let mut table = make_table(&[("LWdown", &[("Tair", "swinbank")]), ("Tair", &[])]);
        table.push_param(
            "LWdown",
            vec![CalculationOption { requires: Requirements::parse("Tair"), strategy: "brutsaert" }],
        );
        let plan = run(&table, &["Tair"]);
        assert_eq!(summary(&plan), vec![("LWdown".to_string(), vec!["Tair".to_string()], "brutsaert")]);
        assert_eq!(plan.stats().options_total, 1);
    }

    #[test]
    fn test_availability_seeded_with_sentinel() {
        let available = Availability::seeded(["Tair"]);
        assert!(available.contains("Tair"));
        assert!(available.contains(NO_REQUIREMENTS));
        assert_eq!(available.len(), 2);
    }
}
