//! Cost records: per-category purchase costs, cost index and installed factors.

use crate::common::{check_finite, require_positive};
use crate::error::{DesignError, DesignResult};
use crate::lifecycle::ConsumableReplacement;
use crate::vessel_cost::VesselOrientation;
use std::collections::BTreeMap;

/// Fixed category keys shared with the external cost aggregators.
pub mod categories {
    pub const PRESSURE_VESSEL: &str = "Pressure vessel";
    pub const PLATFORM_AND_LADDERS: &str = "Platform and ladders";
    pub const CATALYST_LOADING: &str = "Catalyst loading cost";
    pub const ADSORBENT: &str = "Adsorbent cost";
    pub const STORAGE_TANK: &str = "Storage tank";
    pub const ADDITIONAL_OPEX: &str = "Additional OPEX";
}

/// CEPCI the vessel correlations are expressed in.
pub const VESSEL_CORRELATION_CEPCI: f64 = 567.0;

/// Cost-escalation index of the target cost year.
///
/// Each correlation carries the CEPCI of its own basis year; escalation
/// multiplies by `cepci / base`. The default equals the vessel basis so the
/// vessel coefficients are reproduced unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostIndex {
    cepci: f64,
}

impl Default for CostIndex {
    fn default() -> Self {
        Self {
            cepci: VESSEL_CORRELATION_CEPCI,
        }
    }
}

impl CostIndex {
    pub fn new(cepci: f64) -> DesignResult<Self> {
        require_positive(cepci, "CEPCI")?;
        Ok(Self { cepci })
    }

    pub fn cepci(&self) -> f64 {
        self.cepci
    }

    /// Escalate a cost quoted at `base_cepci` to this index.
    pub fn escalate(&self, cost: f64, base_cepci: f64) -> f64 {
        cost * (self.cepci / base_cepci)
    }
}

/// Purchase cost per category [USD].
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// is sorted by key so totals are summed in a fixed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    items: BTreeMap<String, f64>,
}

impl CostBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a category, replacing any previous value.
    pub fn insert(&mut self, category: impl Into<String>, usd: f64) -> DesignResult<()> {
        let category = category.into();
        check_finite(usd, "cost")?;
        if usd < 0.0 {
            return Err(DesignError::config("cost", usd, "must be non-negative"));
        }
        self.items.insert(category, usd);
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.items.get(category).copied()
    }

    pub fn total(&self) -> f64 {
        self.items.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Bare-module (installation) factors per cost category. Missing keys are 1.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BareModuleFactors {
    factors: BTreeMap<String, f64>,
}

impl BareModuleFactors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vessel factors: 3.05 horizontal, 4.16 vertical, 1.0 for platforms.
    pub fn for_vessel(orientation: VesselOrientation) -> Self {
        let vessel = match orientation {
            VesselOrientation::Horizontal => 3.05,
            VesselOrientation::Vertical => 4.16,
        };
        Self::new()
            .with(categories::PRESSURE_VESSEL, vessel)
            .with(categories::PLATFORM_AND_LADDERS, 1.0)
    }

    pub fn with(mut self, category: impl Into<String>, factor: f64) -> Self {
        self.factors.insert(category.into(), factor);
        self
    }

    pub fn factor(&self, category: &str) -> f64 {
        self.factors.get(category).copied().unwrap_or(1.0)
    }

    /// Installed cost of a breakdown.
    pub fn installed(&self, breakdown: &CostBreakdown) -> f64 {
        breakdown
            .iter()
            .map(|(category, usd)| usd * self.factor(category))
            .sum()
    }
}

/// Costing result of one unit.
///
/// `per_copy` is the purchase cost of a single vessel/bed and is repeated
/// `parallel` times; `shared` holds unit-wide items bought once (for example a
/// catalyst charge sized on the whole feed).
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCost {
    pub per_copy: CostBreakdown,
    pub shared: CostBreakdown,
    pub parallel: u32,
    pub bare_module: BareModuleFactors,
    pub replacement: Option<ConsumableReplacement>,
}

impl UnitCost {
    pub fn new(parallel: u32, bare_module: BareModuleFactors) -> Self {
        Self {
            per_copy: CostBreakdown::new(),
            shared: CostBreakdown::new(),
            parallel,
            bare_module,
            replacement: None,
        }
    }

    /// Total purchase cost [USD].
    pub fn purchase_total(&self) -> f64 {
        self.per_copy.total() * f64::from(self.parallel) + self.shared.total()
    }

    /// Total installed (bare-module) cost [USD].
    pub fn installed_total(&self) -> f64 {
        self.bare_module.installed(&self.per_copy) * f64::from(self.parallel)
            + self.bare_module.installed(&self.shared)
    }

    /// Operating-cost entries for the external OPEX aggregator.
    pub fn additional_opex(&self) -> DesignResult<CostBreakdown> {
        let mut opex = CostBreakdown::new();
        if let Some(r) = &self.replacement {
            opex.insert(categories::ADDITIONAL_OPEX, r.levelized_cost)?;
        }
        Ok(opex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_replaces_existing_keys() {
        let mut b = CostBreakdown::new();
        b.insert(categories::PRESSURE_VESSEL, 100.0).unwrap();
        b.insert(categories::PRESSURE_VESSEL, 250.0).unwrap();
        b.insert(categories::PLATFORM_AND_LADDERS, 50.0).unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(b.get(categories::PRESSURE_VESSEL), Some(250.0));
        assert_eq!(b.total(), 300.0);
    }

    #[test]
    fn breakdown_rejects_negative_and_nan() {
        let mut b = CostBreakdown::new();
        assert!(b.insert("x", -1.0).unwrap_err().is_configuration());
        assert!(b.insert("x", f64::NAN).is_err());
        assert!(b.is_empty());
    }

    #[test]
    fn default_index_is_identity_for_vessels() {
        let index = CostIndex::default();
        assert_eq!(index.escalate(12345.678, VESSEL_CORRELATION_CEPCI), 12345.678);
        let doubled = CostIndex::new(2.0 * VESSEL_CORRELATION_CEPCI).unwrap();
        assert_eq!(doubled.escalate(10.0, VESSEL_CORRELATION_CEPCI), 20.0);
        assert!(CostIndex::new(0.0).is_err());
    }

    #[test]
    fn installed_cost_uses_category_factors() {
        let mut cost = UnitCost::new(3, BareModuleFactors::for_vessel(VesselOrientation::Vertical));
        cost.per_copy
            .insert(categories::PRESSURE_VESSEL, 1000.0)
            .unwrap();
        cost.per_copy
            .insert(categories::PLATFORM_AND_LADDERS, 100.0)
            .unwrap();
        cost.shared.insert(categories::CATALYST_LOADING, 500.0).unwrap();

        assert_eq!(cost.purchase_total(), 3.0 * 1100.0 + 500.0);
        assert!((cost.installed_total() - (3.0 * (4160.0 + 100.0) + 500.0)).abs() < 1e-9);
        assert!(cost.additional_opex().unwrap().is_empty());
    }
}
