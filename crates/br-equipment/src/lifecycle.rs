//! Catalyst and adsorbent replacement costing.

use crate::common::{require_non_negative, require_open_fraction, require_positive};
use crate::error::DesignResult;
use br_core::constants::HOURS_PER_YEAR;

/// Periodic replacement of a consumable charge (catalyst or adsorbent).
///
/// ## Model
///
/// ```text
/// replacement_rate = W / lifetime                          [kg/yr]
/// levelized_cost   = W * price / (8760 * uptime * lifetime) [USD/operating hr]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumableReplacement {
    /// Charge mass [kg]
    pub mass: f64,
    /// Service life [yr]
    pub lifetime_years: f64,
    /// Mass replaced per year [kg/yr]
    pub replacement_rate: f64,
    /// Contribution to operating cost [USD/hr of operation]
    pub levelized_cost: f64,
}

impl ConsumableReplacement {
    /// # Errors
    /// Configuration error for a non-positive lifetime, uptime outside (0, 1],
    /// or a negative mass or price.
    pub fn new(
        mass: f64,
        lifetime_years: f64,
        unit_price: f64,
        uptime: f64,
    ) -> DesignResult<Self> {
        require_non_negative(mass, "consumable mass")?;
        require_positive(lifetime_years, "consumable lifetime")?;
        require_non_negative(unit_price, "consumable unit price")?;
        require_open_fraction(uptime, "uptime")?;

        Ok(Self {
            mass,
            lifetime_years,
            replacement_rate: mass / lifetime_years,
            levelized_cost: mass * unit_price / (HOURS_PER_YEAR * uptime * lifetime_years),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dehydration_catalyst_replacement() {
        let r = ConsumableReplacement::new(1000.0, 2.0, 36.81, 0.9).unwrap();
        let expected = 1000.0 * 36.81 / (8760.0 * 0.9 * 2.0);
        assert!((r.levelized_cost - expected).abs() < 1e-12);
        assert!((r.levelized_cost - 2.3345).abs() < 1e-4);
        assert_eq!(r.replacement_rate, 500.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(ConsumableReplacement::new(1000.0, 0.0, 1.0, 0.9).is_err());
        assert!(ConsumableReplacement::new(1000.0, 1.0, 1.0, 0.0).is_err());
        assert!(ConsumableReplacement::new(1000.0, 1.0, 1.0, 1.1).is_err());
        assert!(ConsumableReplacement::new(-1.0, 1.0, 1.0, 0.9).is_err());
        assert!(ConsumableReplacement::new(1.0, 1.0, -1.0, 0.9).is_err());
    }

    #[test]
    fn zero_mass_costs_nothing() {
        let r = ConsumableReplacement::new(0.0, 3.0, 59.12, 0.9).unwrap();
        assert_eq!(r.levelized_cost, 0.0);
        assert_eq!(r.replacement_rate, 0.0);
    }

    proptest! {
        #[test]
        fn levelized_cost_scales(
            mass in 1.0f64..1e6,
            lifetime in 0.1f64..20.0,
            price in 0.1f64..500.0,
            uptime in 0.1f64..1.0,
            factor in 1.0f64..10.0,
        ) {
            let base = ConsumableReplacement::new(mass, lifetime, price, uptime).unwrap();
            let heavier = ConsumableReplacement::new(mass * factor, lifetime, price, uptime).unwrap();
            let longer = ConsumableReplacement::new(mass, lifetime * factor, price, uptime).unwrap();

            let tol = 1e-9 * base.levelized_cost * factor;
            prop_assert!((heavier.levelized_cost - factor * base.levelized_cost).abs() <= tol);
            prop_assert!((longer.levelized_cost * factor - base.levelized_cost).abs() <= tol);
        }
    }
}
