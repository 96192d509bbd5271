//! Frictional pressure drop through a packed bed.

use crate::common::{check_finite, require_positive};
use crate::error::{DesignError, DesignResult};
use br_core::constants::PA_PER_BAR;
use br_core::units::{Density, DynVisc, Length, Pressure, Velocity, pa};
use tracing::{debug, warn};

/// Friction correlation selected from the modified Reynolds number `Re/(1-ε)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    /// Ergun, `Re/(1-ε) < 500`
    Ergun,
    /// Handley–Heggs, `1000 ≤ Re/(1-ε) < 5000`
    HandleyHeggs,
    /// Hicks, `Re/(1-ε) ≥ 5000`
    Hicks,
}

/// Packed-bed geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedBed {
    pub particle_diameter: Length,
    /// External void fraction ε, in (0, 1)
    pub void_fraction: f64,
    pub length: Length,
}

/// Fluid flowing through the bed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedFlow {
    pub density: Density,
    pub viscosity: DynVisc,
    pub superficial_velocity: Velocity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureDrop {
    /// Particle Reynolds number `D ρ u / μ`
    pub reynolds: f64,
    /// `Re / (1 - ε)`
    pub modified_reynolds: f64,
    pub regime: FlowRegime,
    pub friction_factor: f64,
    pub delta_p: Pressure,
}

impl PressureDrop {
    /// Pressure drop [bar].
    pub fn bar(&self) -> f64 {
        self.delta_p.value / PA_PER_BAR
    }
}

/// Select the correlation for a modified Reynolds number.
///
/// # Errors
/// `CorrelationGap` for `500 ≤ Re/(1-ε) < 1000`, where none of the three
/// correlations applies.
pub fn classify_regime(modified_reynolds: f64) -> DesignResult<FlowRegime> {
    check_finite(modified_reynolds, "modified Reynolds number")?;
    if modified_reynolds < 500.0 {
        Ok(FlowRegime::Ergun)
    } else if modified_reynolds < 1000.0 {
        warn!(modified_reynolds, "packed-bed flow falls in the correlation gap");
        Err(DesignError::CorrelationGap { modified_reynolds })
    } else if modified_reynolds < 5000.0 {
        Ok(FlowRegime::HandleyHeggs)
    } else {
        Ok(FlowRegime::Hicks)
    }
}

/// Friction factor for a regime.
///
/// ```text
/// Ergun:         f = (1-ε)/ε³ (1.75 + 150 (1-ε)/Re)
/// Handley–Heggs: f = (1-ε)/ε³ (1.24 + 368 (1-ε)/Re)
/// Hicks:         f = 6.8 (1-ε)^1.2 / ε³ Re^-0.2
/// ```
pub fn friction_factor(regime: FlowRegime, reynolds: f64, void_fraction: f64) -> f64 {
    let eps = void_fraction;
    let solid = 1.0 - eps;
    let eps3 = eps * eps * eps;
    match regime {
        FlowRegime::Ergun => solid / eps3 * (1.75 + 150.0 * solid / reynolds),
        FlowRegime::HandleyHeggs => solid / eps3 * (1.24 + 368.0 * solid / reynolds),
        FlowRegime::Hicks => 6.8 * solid.powf(1.2) / eps3 * reynolds.powf(-0.2),
    }
}

/// Pressure drop across a packed bed: `ΔP = f ρ u² / D · L`.
///
/// # Errors
/// Configuration error for non-positive geometry or properties, or a void
/// fraction outside (0, 1); `CorrelationGap` from [`classify_regime`].
pub fn packed_bed_pressure_drop(bed: &PackedBed, flow: &BedFlow) -> DesignResult<PressureDrop> {
    let d = require_positive(bed.particle_diameter.value, "particle diameter")?;
    let l = require_positive(bed.length.value, "bed length")?;
    let rho = require_positive(flow.density.value, "density")?;
    let mu = require_positive(flow.viscosity.value, "viscosity")?;
    let u = require_positive(flow.superficial_velocity.value, "superficial velocity")?;
    let eps = bed.void_fraction;
    if !(eps > 0.0 && eps < 1.0) {
        return Err(DesignError::config(
            "void fraction",
            eps,
            "must lie in (0, 1)",
        ));
    }

    let reynolds = d * rho * u / mu;
    let modified_reynolds = reynolds / (1.0 - eps);
    let regime = classify_regime(modified_reynolds)?;
    let f = friction_factor(regime, reynolds, eps);
    let dp = f * (rho * u * u / d) * l;
    check_finite(dp, "pressure drop")?;

    debug!(reynolds, modified_reynolds, ?regime, delta_p_pa = dp, "packed-bed pressure drop");

    Ok(PressureDrop {
        reynolds,
        modified_reynolds,
        regime,
        friction_factor: f,
        delta_p: pa(dp),
    })
}
