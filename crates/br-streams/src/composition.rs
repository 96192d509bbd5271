//! Molar flow of named species.

use crate::error::{StreamError, StreamResult};
use std::collections::BTreeMap;

/// Species molar flows [kmol/hr], keyed by the framework's species name.
///
/// Species names are opaque identifiers; no formula parsing happens here.
/// A `BTreeMap` keeps iteration order stable so every pass over the flows is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolarFlows {
    items: BTreeMap<String, f64>,
}

impl MolarFlows {
    /// Empty set of flows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (species, kmol/hr) pairs.
    ///
    /// Flows must be finite and non-negative. Repeated species are summed.
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, f64)>,
    ) -> StreamResult<Self> {
        let mut flows = Self::new();
        for (name, flow) in pairs {
            flows.add(name, flow)?;
        }
        Ok(flows)
    }

    /// Add flow of a species.
    pub fn add<S: Into<String>>(&mut self, species: S, flow: f64) -> StreamResult<()> {
        let name = species.into();
        if name.is_empty() {
            return Err(StreamError::InvalidArg {
                what: "empty species name",
            });
        }
        if !flow.is_finite() || flow < 0.0 {
            return Err(StreamError::NonPhysical {
                what: "species molar flow",
                value: flow,
            });
        }
        *self.items.entry(name).or_insert(0.0) += flow;
        Ok(())
    }

    /// Molar flow of a species (0.0 if not present).
    pub fn get(&self, species: &str) -> f64 {
        self.items.get(species).copied().unwrap_or(0.0)
    }

    /// Total molar flow [kmol/hr].
    pub fn total(&self) -> f64 {
        self.items.values().sum()
    }

    /// Mole fraction of a species. Zero for an empty stream.
    pub fn mole_fraction(&self, species: &str) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.get(species) / total
        } else {
            0.0
        }
    }

    /// Iterate over species in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use br_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fractions_sum_to_one(flows in prop::collection::vec(0.01_f64..100.0_f64, 1..5)) {
            let names = ["Hydrogen", "Methane", "CO", "Water", "Ethanol"];
            let pairs: Vec<(&str, f64)> = flows
                .iter()
                .enumerate()
                .map(|(i, &f)| (names[i % names.len()], f))
                .collect();

            let flows = MolarFlows::from_pairs(pairs).unwrap();
            let sum: f64 = flows.iter().map(|(n, _)| flows.mole_fraction(n)).sum();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(sum, 1.0, tol));
        }
    }
}
