//! Multi-bed scheduling for continuous throughput over batch-cycled beds.
//!
//! Beds cycle between a reaction period τ and a turnaround period τ₀
//! (unloading, cleaning, reloading). Enough beds are kept online at any time
//! to carry the whole feed, and enough spare beds are kept to cover the ones
//! being turned around.

use crate::common::{require_non_negative, require_open_fraction, require_positive};
use crate::error::{DesignError, DesignResult};
use br_core::constants::SECONDS_PER_HOUR;
use br_core::units::{Area, Length, Time, Velocity, Volume, VolumeRate, hr, m, m2, m3, mps};
use std::f64::consts::PI;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedScheduleSpec {
    /// Reaction residence time τ
    pub residence_time: Time,
    /// Offline time per cycle τ₀
    pub turnaround_time: Time,
    /// Largest volume a single vessel may have
    pub max_vessel_volume: Volume,
    /// Bed void fraction ε, in (0, 1]
    pub void_fraction: f64,
    /// Fraction of the vessel volume in contact with the fluid, in (0, 1]
    pub working_fraction: f64,
    pub superficial_velocity: Velocity,
}

impl Default for BedScheduleSpec {
    /// τ = 2 h, τ₀ = 1 h, V_max = 600 m³, ε = 0.5, wf = 0.8, u = 1 m/s.
    fn default() -> Self {
        Self {
            residence_time: hr(2.0),
            turnaround_time: hr(1.0),
            max_vessel_volume: m3(600.0),
            void_fraction: 0.5,
            working_fraction: 0.8,
            superficial_velocity: mps(1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedScheduleResult {
    pub working: u32,
    pub offline: u32,
    pub total: u32,
    pub required_volume: Volume,
    pub vessel_area: Area,
    pub vessel_diameter: Length,
    pub vessel_length: Length,
    pub installed_volume: Volume,
}

fn count(value: f64, what: &'static str) -> DesignResult<u32> {
    let n = value.ceil();
    if !n.is_finite() || n > f64::from(u32::MAX) {
        return Err(DesignError::config(what, value, "vessel count overflows"));
    }
    Ok(n as u32)
}

impl BedScheduleSpec {
    /// Plan the beds for a throughput.
    ///
    /// ## Model
    ///
    /// ```text
    /// V_req     = Q τ / (wf ε)
    /// N_working = ceil(V_req / V_max)
    /// N_offline = ceil(N_working τ₀ / (τ + τ₀))
    /// A = (Q / N_working) / (u 3600),  D = 2 √(A/π),  L = V_max / A
    /// ```
    ///
    /// Volumes in m³, flows in m³/h and times in hours.
    ///
    /// # Errors
    /// Configuration error for non-positive flow, times, volume or velocity,
    /// fractions outside (0, 1], or when `τ₀ ≥ τ` with a single working vessel
    /// (one spare bed cannot cover the turnaround).
    pub fn schedule(&self, throughput: VolumeRate) -> DesignResult<BedScheduleResult> {
        let q = require_positive(throughput.value * SECONDS_PER_HOUR, "throughput")?;
        let tau = require_positive(self.residence_time.value / SECONDS_PER_HOUR, "residence time")?;
        let tau0 =
            require_non_negative(self.turnaround_time.value / SECONDS_PER_HOUR, "turnaround time")?;
        let v_max = require_positive(self.max_vessel_volume.value, "max vessel volume")?;
        let eps = require_open_fraction(self.void_fraction, "void fraction")?;
        let wf = require_open_fraction(self.working_fraction, "working volume fraction")?;
        let u = require_positive(self.superficial_velocity.value, "superficial velocity")?;

        let required = q * tau / (wf * eps);
        let working = count(required / v_max, "working vessels")?;
        if tau0 >= tau && working == 1 {
            return Err(DesignError::config(
                "turnaround time",
                tau0,
                "must be shorter than the residence time with a single working vessel",
            ));
        }
        let offline = count(f64::from(working) * tau0 / (tau + tau0), "offline vessels")?;
        let total = working.checked_add(offline).ok_or_else(|| {
            DesignError::config(
                "vessel count",
                f64::from(working) + f64::from(offline),
                "vessel count overflows",
            )
        })?;

        let area = (q / f64::from(working)) / (u * SECONDS_PER_HOUR);
        let diameter = 2.0 * (area / PI).sqrt();
        let length = v_max / area;

        debug!(
            working,
            offline,
            required_volume_m3 = required,
            diameter_m = diameter,
            length_m = length,
            "bed schedule"
        );

        Ok(BedScheduleResult {
            working,
            offline,
            total,
            required_volume: m3(required),
            vessel_area: m2(area),
            vessel_diameter: m(diameter),
            vessel_length: m(length),
            installed_volume: m3(f64::from(total) * v_max),
        })
    }
}
