//! Cylindrical pressure-vessel mechanical design.
//!
//! Works in the imperial design basis of the cost correlations (psi, ft, in,
//! lb). `design_vessel_si` is the entry point for uom quantities.

use crate::common::{check_finite, require_positive};
use crate::error::{DesignError, DesignResult};
use br_core::constants::{ATM_PSI, IN_PER_FT};
use br_core::imperial;
use br_core::units::{Length, Pressure, ft};
use std::f64::consts::PI;
use tracing::debug;

/// Closure style selected from diameter and design pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadType {
    Elliptical,
    Hemispherical,
    Dished,
}

/// Material and fabrication constants of the vessel shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselMaterialConstants {
    /// Maximum allowable stress [psi]
    pub allowable_stress: f64,
    /// Weld joint efficiency [-]
    pub weld_efficiency: f64,
    /// Corrosion allowance [in]
    pub corrosion_allowance: f64,
    /// Metal density [lb/ft³]
    pub density: f64,
}

impl Default for VesselMaterialConstants {
    /// Carbon steel: S = 15000 psi, E = 0.85, Ca = 1/8 in, ρ = 490 lb/ft³.
    fn default() -> Self {
        Self {
            allowable_stress: 15_000.0,
            weld_efficiency: 0.85,
            corrosion_allowance: 1.0 / 8.0,
            density: 490.0,
        }
    }
}

/// Result of one vessel sizing call. Imperial units throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselDesign {
    pub diameter_ft: f64,
    pub length_ft: f64,
    /// Design pressure PT [psig]
    pub design_pressure_psig: f64,
    pub shell_thickness_in: f64,
    pub head_thickness_in: f64,
    /// Governing wall thickness after the rigidity floor [in]
    pub wall_thickness_in: f64,
    pub shell_weight_lb: f64,
    pub head_weight_lb: f64,
    pub weight_lb: f64,
    pub head_type: HeadType,
}

impl VesselDesign {
    pub fn diameter(&self) -> Length {
        ft(self.diameter_ft)
    }

    pub fn length(&self) -> Length {
        ft(self.length_ft)
    }
}

/// Design pressure from absolute operating pressure [psia].
///
/// ```text
/// Pg = |P - 14.7|
/// PT = max(Pg + 30, 1.1 Pg)
/// ```
pub fn design_pressure_psig(p_psia: f64) -> f64 {
    let p_gauge = (p_psia - ATM_PSI).abs();
    (p_gauge + 30.0).max(1.1 * p_gauge)
}

/// Minimum wall thickness for rigidity [in]; `None` from 12 ft upward.
pub fn minimum_wall_thickness_in(diameter_ft: f64) -> Option<f64> {
    if diameter_ft < 4.0 {
        Some(0.25)
    } else if diameter_ft < 6.0 {
        Some(5.0 / 16.0)
    } else if diameter_ft < 8.0 {
        Some(0.375)
    } else if diameter_ft < 10.0 {
        Some(7.0 / 16.0)
    } else if diameter_ft < 12.0 {
        Some(0.5)
    } else {
        None
    }
}

/// Wall thickness [in] = numerator / denominator + Ca, rejecting designs whose
/// pressure exceeds what the stress term can carry.
fn thickness(
    numerator: f64,
    denominator: f64,
    material: &VesselMaterialConstants,
    what: &'static str,
) -> DesignResult<f64> {
    if denominator <= 0.0 {
        return Err(DesignError::config(
            what,
            denominator,
            "design pressure exceeds the allowable stress",
        ));
    }
    Ok(numerator / denominator + material.corrosion_allowance)
}

/// Size a vessel from absolute pressure [psia], diameter [ft] and length [ft].
///
/// ## Model
///
/// ```text
/// SWT = PT D 12 / (2 S E - 1.2 PT) + Ca           SSA = π D L
/// Elliptical    (D < 15, PT > 85.3): HWT = PT D 12 / (2SE - 0.2PT) + Ca,  HSA = 1.09 D²
/// Hemispherical (D > 15):            HWT = PT D 12 / (4SE - 0.4PT) + Ca,  HSA = 1.571 D²
/// Dished        (otherwise):         HWT = 0.885 PT D 12 / (SE - 0.1PT) + Ca, HSA = 0.842 D²
/// ts = max(max(SWT, HWT), floor(D))
/// W  = ρ (ts/12) (SSA + 2 HSA)
/// ```
///
/// # Errors
/// Configuration error for non-positive or non-finite inputs, or when the
/// pressure is too high for the material stress.
pub fn design_vessel(
    p_psia: f64,
    diameter_ft: f64,
    length_ft: f64,
    material: &VesselMaterialConstants,
) -> DesignResult<VesselDesign> {
    require_positive(p_psia, "vessel pressure")?;
    require_positive(diameter_ft, "vessel diameter")?;
    require_positive(length_ft, "vessel length")?;
    require_positive(material.allowable_stress, "allowable stress")?;
    require_positive(material.weld_efficiency, "weld efficiency")?;
    require_positive(material.density, "vessel material density")?;

    let d = diameter_ft;
    let pt = design_pressure_psig(p_psia);
    let se = material.allowable_stress * material.weld_efficiency;
    let hoop = pt * d * IN_PER_FT;

    let shell_thickness = thickness(hoop, 2.0 * se - 1.2 * pt, material, "shell thickness")?;
    let shell_area = PI * d * length_ft;

    let (head_type, head_thickness, head_area) = if d < 15.0 && pt > 85.3 {
        (
            HeadType::Elliptical,
            thickness(hoop, 2.0 * se - 0.2 * pt, material, "head thickness")?,
            1.09 * d * d,
        )
    } else if d > 15.0 {
        (
            HeadType::Hemispherical,
            thickness(hoop, 4.0 * se - 0.4 * pt, material, "head thickness")?,
            1.571 * d * d,
        )
    } else {
        (
            HeadType::Dished,
            thickness(0.885 * hoop, se - 0.1 * pt, material, "head thickness")?,
            0.842 * d * d,
        )
    };

    let mut ts = shell_thickness.max(head_thickness);
    if let Some(floor) = minimum_wall_thickness_in(d) {
        ts = ts.max(floor);
    }

    let lb_per_ft2 = material.density * (ts / IN_PER_FT);
    let shell_weight = lb_per_ft2 * shell_area;
    let head_weight = lb_per_ft2 * 2.0 * head_area;
    let weight = lb_per_ft2 * (shell_area + 2.0 * head_area);
    check_finite(weight, "vessel weight")?;

    debug!(
        diameter_ft = d,
        length_ft,
        design_pressure_psig = pt,
        wall_thickness_in = ts,
        weight_lb = weight,
        ?head_type,
        "vessel sized"
    );

    Ok(VesselDesign {
        diameter_ft: d,
        length_ft,
        design_pressure_psig: pt,
        shell_thickness_in: shell_thickness,
        head_thickness_in: head_thickness,
        wall_thickness_in: ts,
        shell_weight_lb: shell_weight,
        head_weight_lb: head_weight,
        weight_lb: weight,
        head_type,
    })
}

/// SI entry point: Pa → psi via 1/6894.76, m → ft via 3.28084.
pub fn design_vessel_si(
    pressure: Pressure,
    diameter: Length,
    length: Length,
    material: &VesselMaterialConstants,
) -> DesignResult<VesselDesign> {
    design_vessel(
        imperial::psi(pressure),
        imperial::feet(diameter),
        imperial::feet(length),
        material,
    )
}
