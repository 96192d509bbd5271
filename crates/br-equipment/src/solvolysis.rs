//! Flow-through solvolysis over packed biomass beds.
//!
//! Solvent is pumped through a rotating set of biomass beds: some beds are in
//! service while the rest are unloaded and refilled, so the solvent flow is
//! continuous even though each bed runs in batches.

use crate::common::{require_fraction, require_positive};
use crate::cost::{BareModuleFactors, CostIndex, UnitCost};
use crate::error::DesignResult;
use crate::pressure_drop::{BedFlow, PackedBed, PressureDrop, packed_bed_pressure_drop};
use crate::schedule::{BedScheduleResult, BedScheduleSpec};
use crate::traits::{ConversionFraction, Equipment, UnitStreams};
use crate::vessel::{VesselDesign, VesselMaterialConstants, design_vessel_si};
use crate::vessel_cost::{VesselCostOptions, VesselMaterial, VesselOrientation, vessel_purchase_cost};
use br_core::units::{Length, Pressure, Temperature, k, m, pa};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvolysisConfig {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub schedule: BedScheduleSpec,
    /// Biomass particle diameter in the bed
    pub particle_diameter: Length,
    delignification: f64,
    methanol_decomposition: f64,
    pub material: VesselMaterialConstants,
    pub vessel: VesselCostOptions,
}

impl Default for SolvolysisConfig {
    /// 6 MPa, 190 °C, default bed schedule, 4 mm poplar chips, 70 %
    /// delignification, 0.5 % methanol decomposition, vertical SS316 beds.
    fn default() -> Self {
        Self {
            pressure: pa(6e6),
            temperature: k(463.15),
            schedule: BedScheduleSpec::default(),
            particle_diameter: m(0.004),
            delignification: 0.7,
            methanol_decomposition: 0.005,
            material: VesselMaterialConstants::default(),
            vessel: VesselCostOptions::new(
                VesselOrientation::Vertical,
                VesselMaterial::StainlessSteel316,
            ),
        }
    }
}

impl SolvolysisConfig {
    /// Fraction of the lignin solubilized.
    pub fn delignification(&self) -> f64 {
        self.delignification
    }

    pub fn set_delignification(&mut self, fraction: f64) -> DesignResult<()> {
        self.delignification = require_fraction(fraction, "delignification")?;
        Ok(())
    }

    /// Fraction of the methanol solvent decomposed per pass.
    pub fn methanol_decomposition(&self) -> f64 {
        self.methanol_decomposition
    }

    pub fn set_methanol_decomposition(&mut self, fraction: f64) -> DesignResult<()> {
        self.methanol_decomposition = require_fraction(fraction, "methanol decomposition")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvolysisDesign {
    pub schedule: BedScheduleResult,
    /// One bed vessel
    pub vessel: VesselDesign,
    pub pressure_drop: PressureDrop,
    /// Pressure the solvent pump must add, never negative
    pub pump_pressure_rise: Pressure,
}

/// Solvolysis reactor.
///
/// Inlets: `[biomass, solvent]`. The solvent must carry volumetric flow,
/// density and viscosity.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvolysisReactor {
    pub name: String,
    pub config: SolvolysisConfig,
}

impl SolvolysisReactor {
    pub fn new(name: impl Into<String>, config: SolvolysisConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

impl ConversionFraction for SolvolysisReactor {
    fn conversion(&self) -> f64 {
        self.config.delignification()
    }

    fn set_conversion(&mut self, conversion: f64) -> DesignResult<()> {
        self.config.set_delignification(conversion)
    }
}

impl Equipment for SolvolysisReactor {
    type Design = SolvolysisDesign;

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self, streams: UnitStreams<'_>) -> DesignResult<SolvolysisDesign> {
        let cfg = &self.config;
        let solvent = streams.inlet(1, "solvolysis solvent stream")?;
        require_positive(cfg.pressure.value, "reactor pressure")?;

        let schedule = cfg.schedule.schedule(solvent.volumetric_flow())?;
        let vessel = design_vessel_si(
            cfg.pressure,
            schedule.vessel_diameter,
            schedule.vessel_length,
            &cfg.material,
        )?;

        let bed = PackedBed {
            particle_diameter: cfg.particle_diameter,
            void_fraction: cfg.schedule.void_fraction,
            length: schedule.vessel_length,
        };
        let flow = BedFlow {
            density: solvent.density()?,
            viscosity: solvent.viscosity()?,
            superficial_velocity: cfg.schedule.superficial_velocity,
        };
        let pressure_drop = packed_bed_pressure_drop(&bed, &flow)?;

        let rise = (cfg.pressure.value - solvent.pressure().value) + pressure_drop.delta_p.value;
        let pump_pressure_rise = pa(rise.max(0.0));

        debug!(
            unit = %self.name,
            beds = schedule.total,
            pressure_drop_bar = pressure_drop.bar(),
            pump_rise_pa = pump_pressure_rise.value,
            "solvolysis reactor sized"
        );

        Ok(SolvolysisDesign {
            schedule,
            vessel,
            pressure_drop,
            pump_pressure_rise,
        })
    }

    fn cost(&self, design: &SolvolysisDesign, index: CostIndex) -> DesignResult<UnitCost> {
        let orientation = self.config.vessel.orientation;
        let mut cost = UnitCost::new(design.schedule.total, BareModuleFactors::for_vessel(orientation));
        vessel_purchase_cost(&design.vessel, self.config.vessel, index)?
            .add_to(&mut cost.per_copy)?;
        Ok(cost)
    }
}
