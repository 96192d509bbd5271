//! Vessel purchase-cost correlations.

use crate::common::{check_finite, require_positive};
use crate::cost::{CostBreakdown, CostIndex, VESSEL_CORRELATION_CEPCI, categories};
use crate::error::DesignResult;
use crate::vessel::VesselDesign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VesselOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Construction material, applied as a factor on the vessel term only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VesselMaterial {
    #[default]
    CarbonSteel,
    LowAlloySteel,
    StainlessSteel304,
    StainlessSteel316,
    Carpenter20Cb3,
    Nickel200,
    Monel400,
    Inconel600,
    Incoloy825,
    Titanium,
    /// Explicit factor for materials outside the table.
    Custom(f64),
}

impl VesselMaterial {
    pub fn factor(&self) -> f64 {
        match self {
            VesselMaterial::CarbonSteel => 1.0,
            VesselMaterial::LowAlloySteel => 1.2,
            VesselMaterial::StainlessSteel304 => 1.7,
            VesselMaterial::StainlessSteel316 => 2.1,
            VesselMaterial::Carpenter20Cb3 => 3.2,
            VesselMaterial::Nickel200 => 5.4,
            VesselMaterial::Monel400 => 3.6,
            VesselMaterial::Inconel600 => 3.9,
            VesselMaterial::Incoloy825 => 3.7,
            VesselMaterial::Titanium => 7.7,
            VesselMaterial::Custom(f) => *f,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VesselCostOptions {
    pub orientation: VesselOrientation,
    pub material: VesselMaterial,
}

impl VesselCostOptions {
    pub fn new(orientation: VesselOrientation, material: VesselMaterial) -> Self {
        Self {
            orientation,
            material,
        }
    }
}

/// Purchase cost of one vessel [USD].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselPurchaseCost {
    pub vessel: f64,
    pub platform: f64,
}

impl VesselPurchaseCost {
    pub fn total(&self) -> f64 {
        self.vessel + self.platform
    }

    /// Record under "Pressure vessel" and "Platform and ladders".
    pub fn add_to(&self, breakdown: &mut CostBreakdown) -> DesignResult<()> {
        breakdown.insert(categories::PRESSURE_VESSEL, self.vessel)?;
        breakdown.insert(categories::PLATFORM_AND_LADDERS, self.platform)?;
        Ok(())
    }
}

/// Horizontal vessel at the correlation basis, carbon steel.
///
/// ```text
/// C_v  = exp(5.6336 + 0.4599 ln W + 0.00582 (ln W)²)
/// C_pl = 2275 D^0.20294
/// ```
pub fn horizontal_vessel_cost(weight_lb: f64, diameter_ft: f64) -> DesignResult<VesselPurchaseCost> {
    require_positive(weight_lb, "vessel weight")?;
    require_positive(diameter_ft, "vessel diameter")?;
    let ln_w = weight_lb.ln();
    Ok(VesselPurchaseCost {
        vessel: (5.6336 + 0.4599 * ln_w + 0.00582 * ln_w * ln_w).exp(),
        platform: 2275.0 * diameter_ft.powf(0.20294),
    })
}

/// Vertical vessel at the correlation basis, carbon steel.
///
/// ```text
/// C_v  = exp(7.1390 + 0.18255 ln W + 0.02297 (ln W)²)
/// C_pl = 361.8 D^0.73960 L^0.70684
/// ```
pub fn vertical_vessel_cost(
    weight_lb: f64,
    diameter_ft: f64,
    length_ft: f64,
) -> DesignResult<VesselPurchaseCost> {
    require_positive(weight_lb, "vessel weight")?;
    require_positive(diameter_ft, "vessel diameter")?;
    require_positive(length_ft, "vessel length")?;
    let ln_w = weight_lb.ln();
    Ok(VesselPurchaseCost {
        vessel: (7.1390 + 0.18255 * ln_w + 0.02297 * ln_w * ln_w).exp(),
        platform: 361.8 * diameter_ft.powf(0.73960) * length_ft.powf(0.70684),
    })
}

/// Cost a designed vessel with material and cost-index factors applied.
pub fn vessel_purchase_cost(
    design: &VesselDesign,
    options: VesselCostOptions,
    index: CostIndex,
) -> DesignResult<VesselPurchaseCost> {
    let material = require_positive(options.material.factor(), "material factor")?;
    let base = match options.orientation {
        VesselOrientation::Horizontal => {
            horizontal_vessel_cost(design.weight_lb, design.diameter_ft)?
        }
        VesselOrientation::Vertical => {
            vertical_vessel_cost(design.weight_lb, design.diameter_ft, design.length_ft)?
        }
    };
    let cost = VesselPurchaseCost {
        vessel: index.escalate(material * base.vessel, VESSEL_CORRELATION_CEPCI),
        platform: index.escalate(base.platform, VESSEL_CORRELATION_CEPCI),
    };
    check_finite(cost.vessel, "vessel cost")?;
    check_finite(cost.platform, "platform cost")?;
    Ok(cost)
}
