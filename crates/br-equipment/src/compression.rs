//! Ideal-gas isentropic compression duty for auxiliary compressors.

use crate::common::{require_non_negative, require_open_fraction, require_positive};
use crate::error::{DesignError, DesignResult};
use br_core::constants::{R_GAS_J, SECONDS_PER_HOUR};
use br_core::units::{Power, Pressure, Temperature, w};

/// Compressor model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorSpec {
    /// Heat capacity ratio k = cp/cv
    pub heat_capacity_ratio: f64,
    /// Isentropic efficiency, in (0, 1]
    pub efficiency: f64,
}

impl Default for CompressorSpec {
    /// Diatomic ideal gas (k = 1.4), η = 0.7.
    fn default() -> Self {
        Self {
            heat_capacity_ratio: 1.4,
            efficiency: 0.7,
        }
    }
}

/// Shaft power to compress a gas flow from `p_in` to `p_out`.
///
/// ```text
/// W = ṅ R T k/(k-1) ((P2/P1)^((k-1)/k) - 1) / η
/// ```
///
/// `molar_flow` is in kmol/h. Returns zero when `p_out ≤ p_in`.
pub fn isentropic_power(
    molar_flow: f64,
    temperature: Temperature,
    p_in: Pressure,
    p_out: Pressure,
    spec: &CompressorSpec,
) -> DesignResult<Power> {
    require_non_negative(molar_flow, "compressor molar flow")?;
    let t = require_positive(temperature.value, "compressor inlet temperature")?;
    let p1 = require_positive(p_in.value, "compressor inlet pressure")?;
    let p2 = require_positive(p_out.value, "compressor outlet pressure")?;
    let eta = require_open_fraction(spec.efficiency, "compressor efficiency")?;
    let k = spec.heat_capacity_ratio;
    if !(k.is_finite() && k > 1.0) {
        return Err(DesignError::config(
            "heat capacity ratio",
            k,
            "must be greater than 1",
        ));
    }
    if p2 <= p1 {
        return Ok(w(0.0));
    }

    let n_dot = molar_flow * 1000.0 / SECONDS_PER_HOUR;
    let exponent = (k - 1.0) / k;
    let work = n_dot * R_GAS_J * t * (k / (k - 1.0)) * ((p2 / p1).powf(exponent) - 1.0) / eta;
    Ok(w(work))
}

/// Auxiliary compression attached to a PSA train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionDuty {
    /// Raises the feed to the adsorption pressure; `None` when the feed
    /// already arrives at that pressure.
    pub feed_compressor: Option<Power>,
    /// Returns the extract from a sub-atmospheric purge to 101325 Pa.
    pub vacuum_pump: Option<Power>,
}

impl CompressionDuty {
    pub fn total(&self) -> Power {
        let zero = w(0.0);
        self.feed_compressor.unwrap_or(zero) + self.vacuum_pump.unwrap_or(zero)
    }
}
