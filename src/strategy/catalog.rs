//! Built-in catalog of the meteorological strategy identifiers.
//!
//! Handles are symbolic: the numeric implementations live with the dataset
//! layer, which dispatches on `StrategyRef`.
use super::namespace::{Namespace, StrategyNamespace};
use serde::Serialize;
use std::fmt;

const STANDARD: &[&str] = &[
    "vp_vpd_tair_sh", // specific humidity from vapour pressure, VPD and air temperature
    "vp_tair_sh",
    "vpd_tair_sh",
    "sp_dewp_sh",     // specific humidity from surface pressure and dewpoint
    "wind_speed",
];

const OPTIONAL: &[&str] = &[
    "calc_lwdown_swinbank",
    "calc_psurf",
    "calc_snow",
    "default_co2",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StrategyRef {
    pub namespace: Namespace,
    pub id: &'static str,
}

impl fmt::Display for StrategyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    pub fn ids(namespace: Namespace) -> &'static [&'static str] {
        match namespace {
            Namespace::Standard => STANDARD,
            Namespace::Optional => OPTIONAL,
        }
    }
}

impl StrategyNamespace for Catalog {
    type Strategy = StrategyRef;

    fn lookup(&self, namespace: Namespace, id: &str) -> Option<StrategyRef> {
        Self::ids(namespace)
            .iter()
            .find(|&&known| known == id)
            .map(|&id| StrategyRef { namespace, id })
    }
}
