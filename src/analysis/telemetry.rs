use serde::Serialize;

/// Counters collected by one resolver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionStats {
    /// Options in the table when resolution started. Upper bound on `matches`.
    pub options_total: usize,
    /// Full or partial passes over the table, including the final empty one.
    pub scans: usize,
    /// Successful option matches.
    pub matches: usize,
    /// Matches that replaced an existing plan entry with a higher-priority option.
    pub upgrades: usize,
}

impl ResolutionStats {
    pub fn new(options_total: usize) -> Self {
        Self { options_total, ..Default::default() }
    }

    /// Matches that added a new parameter to the plan.
    pub fn first_resolutions(&self) -> usize {
        self.matches - self.upgrades
    }
}
