//! Fixed-bed catalytic reactors sized on weight hourly space velocity.

use crate::common::{require_fraction, require_open_fraction, require_positive};
use crate::cost::{BareModuleFactors, CostIndex, UnitCost, categories};
use crate::error::{DesignError, DesignResult};
use crate::lifecycle::ConsumableReplacement;
use crate::traits::{ConversionFraction, Equipment, UnitStreams};
use crate::vessel::{VesselDesign, VesselMaterialConstants, design_vessel};
use crate::vessel_cost::{VesselCostOptions, VesselMaterial, VesselOrientation, vessel_purchase_cost};
use br_core::constants::M3_PER_FT3;
use br_core::imperial;
use br_core::numeric::{Tolerances, nearly_equal};
use br_core::units::{Mass, Pressure, Temperature, Volume, k, kg, m3, pa};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Declared energy behaviour of a reactor, checked against its duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalMode {
    /// Duty must vanish.
    Adiabatic,
    /// Any duty; heat is removed or supplied to hold temperature.
    Isothermal,
    /// Heat is supplied; a negative duty means the reactor would need cooling.
    Heated,
}

/// Catalyst properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalystSpec {
    /// Bulk density [kg/L]
    pub density_kg_per_l: f64,
    /// Price [USD/kg]
    pub price_per_kg: f64,
    /// Service life [yr]
    pub lifetime_years: f64,
}

/// Operating data of a catalytic reactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalyticReactorConfig {
    pub temperature: Temperature,
    pub pressure: Pressure,
    conversion: f64,
    /// Feed mass flow per catalyst mass [1/h]
    pub whsv: f64,
    pub catalyst: CatalystSpec,
    pub thermal_mode: ThermalMode,
    /// Operating fraction of the year
    pub uptime: f64,
    /// Length over diameter
    pub aspect_ratio: f64,
    /// Extra reactor volume over the catalyst volume
    pub volume_margin: f64,
    pub material: VesselMaterialConstants,
    pub vessel: VesselCostOptions,
}

impl Default for CatalyticReactorConfig {
    /// Generic adiabatic bed at 300 K and 1 bar, WHSV = 1/h, full
    /// conversion, 100 USD/kg catalyst at 0.72 kg/L lasting one year.
    fn default() -> Self {
        Self {
            temperature: k(300.0),
            pressure: pa(1e5),
            conversion: 1.0,
            whsv: 1.0,
            catalyst: CatalystSpec {
                density_kg_per_l: 0.72,
                price_per_kg: 100.0,
                lifetime_years: 1.0,
            },
            thermal_mode: ThermalMode::Adiabatic,
            uptime: 0.9,
            aspect_ratio: 3.0,
            volume_margin: 1.15,
            material: VesselMaterialConstants::default(),
            vessel: VesselCostOptions::default(),
        }
    }
}

impl CatalyticReactorConfig {
    /// Ethanol dehydration to ethylene over HZSM-5, heated.
    pub fn dehydration() -> Self {
        Self {
            temperature: k(754.15),
            pressure: pa(1.063e6),
            conversion: 0.995,
            whsv: 0.3,
            catalyst: CatalystSpec {
                density_kg_per_l: 0.72,
                price_per_kg: 36.81,
                lifetime_years: 2.0,
            },
            thermal_mode: ThermalMode::Heated,
            vessel: VesselCostOptions::new(VesselOrientation::Horizontal, VesselMaterial::CarbonSteel),
            ..Self::default()
        }
    }

    /// Ethylene oligomerization, isothermal, in a horizontal vessel costed at
    /// twice carbon steel.
    pub fn oligomerization() -> Self {
        Self {
            temperature: k(393.15),
            pressure: pa(3.5e6),
            conversion: 0.993,
            whsv: 1.5,
            catalyst: CatalystSpec {
                density_kg_per_l: 0.4,
                price_per_kg: 158.4,
                lifetime_years: 1.0,
            },
            thermal_mode: ThermalMode::Isothermal,
            vessel: VesselCostOptions::new(VesselOrientation::Horizontal, VesselMaterial::Custom(2.0)),
            ..Self::default()
        }
    }

    /// Olefin hydrogenation, adiabatic, vertical stainless-steel 316.
    pub fn hydrogenation() -> Self {
        Self {
            temperature: k(623.15),
            pressure: pa(3.5e6),
            conversion: 1.0,
            whsv: 3.0,
            catalyst: CatalystSpec {
                density_kg_per_l: 0.72,
                price_per_kg: 59.12,
                lifetime_years: 3.0,
            },
            thermal_mode: ThermalMode::Adiabatic,
            vessel: VesselCostOptions::new(
                VesselOrientation::Vertical,
                VesselMaterial::StainlessSteel316,
            ),
            ..Self::default()
        }
    }

    pub fn conversion(&self) -> f64 {
        self.conversion
    }

    pub fn set_conversion(&mut self, conversion: f64) -> DesignResult<()> {
        self.conversion = require_fraction(conversion, "conversion")?;
        Ok(())
    }

    pub fn with_conversion(mut self, conversion: f64) -> DesignResult<Self> {
        self.set_conversion(conversion)?;
        Ok(self)
    }
}

/// Sized catalytic reactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalyticDesign {
    pub catalyst_mass: Mass,
    /// Reactor volume including the margin
    pub reactor_volume: Volume,
    pub vessel: VesselDesign,
    /// `H_out - H_in` [kJ/h]; `None` until the outlet has been simulated
    pub duty: Option<f64>,
}

/// Catalytic reactor.
///
/// Inlets: `[feed]`. Outlets: `[effluent]` (optional, needed for the duty).
///
/// ## Model
///
/// ```text
/// W   = F_mass / WHSV                     [kg]
/// V   = W / ρ_cat · 1.15                  [L]
/// D   = (4 V_ft³ / (π AR))^(1/3),  L = AR D  [ft]
/// duty = H_out - H_in                     [kJ/h]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CatalyticReactor {
    pub name: String,
    pub config: CatalyticReactorConfig,
}

impl CatalyticReactor {
    pub fn new(name: impl Into<String>, config: CatalyticReactorConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    fn check_duty(&self, duty: f64) -> DesignResult<()> {
        match self.config.thermal_mode {
            ThermalMode::Adiabatic => {
                let tol = Tolerances {
                    abs: 1e-6,
                    rel: 1e-9,
                };
                if !nearly_equal(duty, 0.0, tol) {
                    warn!(unit = %self.name, duty, "adiabatic reactor has a duty");
                    return Err(DesignError::ThermalInconsistency {
                        unit: self.name.clone(),
                        duty,
                        reason: "adiabatic reactor must have zero duty",
                    });
                }
            }
            ThermalMode::Heated if duty < 0.0 => {
                warn!(unit = %self.name, duty, "heated reactor is cooling");
                return Err(DesignError::ThermalInconsistency {
                    unit: self.name.clone(),
                    duty,
                    reason: "heated reactor would need cooling",
                });
            }
            _ => {}
        }
        Ok(())
    }
}

impl ConversionFraction for CatalyticReactor {
    fn conversion(&self) -> f64 {
        self.config.conversion()
    }

    fn set_conversion(&mut self, conversion: f64) -> DesignResult<()> {
        self.config.set_conversion(conversion)
    }
}

impl Equipment for CatalyticReactor {
    type Design = CatalyticDesign;

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self, streams: UnitStreams<'_>) -> DesignResult<CatalyticDesign> {
        let cfg = &self.config;
        let feed = streams.inlet(0, "reactor feed stream")?;
        let feed_kgph = require_positive(feed.mass_flow_kgph(), "feed mass flow")?;
        let whsv = require_positive(cfg.whsv, "WHSV")?;
        let rho_cat = require_positive(cfg.catalyst.density_kg_per_l, "catalyst density")?;
        let ar = require_positive(cfg.aspect_ratio, "aspect ratio")?;
        let margin = require_positive(cfg.volume_margin, "volume margin")?;

        let catalyst = feed_kgph / whsv;
        let volume_l = catalyst / rho_cat * margin;
        let volume_m3 = volume_l * 0.001;
        let volume_ft3 = volume_m3 / M3_PER_FT3;
        let diameter = (4.0 * volume_ft3 / (PI * ar)).cbrt();
        let length = ar * diameter;

        let vessel = design_vessel(imperial::psi(cfg.pressure), diameter, length, &cfg.material)?;

        let duty = streams
            .outlet(0)
            .map(|out| out.enthalpy_flow() - feed.enthalpy_flow());
        if let Some(duty) = duty {
            self.check_duty(duty)?;
        }

        debug!(
            unit = %self.name,
            catalyst_kg = catalyst,
            volume_l,
            diameter_ft = diameter,
            ?duty,
            "catalytic reactor sized"
        );

        Ok(CatalyticDesign {
            catalyst_mass: kg(catalyst),
            reactor_volume: m3(volume_m3),
            vessel,
            duty,
        })
    }

    fn cost(&self, design: &CatalyticDesign, index: CostIndex) -> DesignResult<UnitCost> {
        let cfg = &self.config;
        let mut cost = UnitCost::new(1, BareModuleFactors::for_vessel(cfg.vessel.orientation));
        vessel_purchase_cost(&design.vessel, cfg.vessel, index)?.add_to(&mut cost.per_copy)?;

        let catalyst = design.catalyst_mass.value;
        cost.shared
            .insert(categories::CATALYST_LOADING, catalyst * cfg.catalyst.price_per_kg)?;
        require_open_fraction(cfg.uptime, "uptime")?;
        cost.replacement = Some(ConsumableReplacement::new(
            catalyst,
            cfg.catalyst.lifetime_years,
            cfg.catalyst.price_per_kg,
            cfg.uptime,
        )?);
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use br_core::units::kgph;
    use br_streams::StreamState;

    fn stream(h: f64) -> StreamState {
        StreamState::from_pt(pa(1.063e6), k(754.15))
            .unwrap()
            .with_mass_flow(kgph(30_000.0))
            .unwrap()
            .with_enthalpy_flow(h)
            .unwrap()
    }

    #[test]
    fn sizing_follows_space_velocity() {
        let reactor = CatalyticReactor::new("R101", CatalyticReactorConfig::dehydration());
        let ins = [stream(0.0)];
        let design = reactor.size(UnitStreams::feeds(&ins)).unwrap();

        assert!((design.catalyst_mass.value - 100_000.0).abs() < 1e-6);
        let volume_l = 100_000.0 / 0.72 * 1.15;
        assert!((design.reactor_volume.value - volume_l * 0.001).abs() < 1e-9);

        let v_ft3 = volume_l * 0.001 / 0.0283168;
        let d = (4.0 * v_ft3 / (PI * 3.0)).cbrt();
        assert!((design.vessel.diameter_ft - d).abs() < 1e-9);
        assert!((design.vessel.length_ft - 3.0 * d).abs() < 1e-9);
        assert!(design.duty.is_none());
    }

    #[test]
    fn heated_reactor_rejects_cooling() {
        let reactor = CatalyticReactor::new("R101", CatalyticReactorConfig::dehydration());
        let ins = [stream(-1.0e6)];
        let outs = [stream(-2.0e6)];
        let err = reactor.size(UnitStreams::new(&ins, &outs)).unwrap_err();
        assert!(matches!(err, DesignError::ThermalInconsistency { .. }));

        let outs = [stream(-0.5e6)];
        let design = reactor.size(UnitStreams::new(&ins, &outs)).unwrap();
        assert!((design.duty.unwrap() - 0.5e6).abs() < 1e-6);
    }

    #[test]
    fn adiabatic_reactor_rejects_duty() {
        let reactor = CatalyticReactor::new("R301", CatalyticReactorConfig::hydrogenation());
        let ins = [stream(1.0e6)];
        assert!(reactor
            .size(UnitStreams::new(&ins, &[stream(1.0e6)]))
            .is_ok());
        let err = reactor
            .size(UnitStreams::new(&ins, &[stream(1.1e6)]))
            .unwrap_err();
        assert!(matches!(err, DesignError::ThermalInconsistency { .. }));
        assert!(!err.is_configuration());
    }

    #[test]
    fn isothermal_reactor_accepts_any_duty() {
        let reactor = CatalyticReactor::new("R201", CatalyticReactorConfig::oligomerization());
        let ins = [stream(1.0e6)];
        assert!(reactor
            .size(UnitStreams::new(&ins, &[stream(-3.0e6)]))
            .is_ok());
    }

    #[test]
    fn costs_catalyst_once_and_levelizes_replacement() {
        let reactor = CatalyticReactor::new("R101", CatalyticReactorConfig::dehydration());
        let ins = [stream(0.0)];
        let (design, cost) = reactor
            .evaluate(UnitStreams::feeds(&ins), CostIndex::default())
            .unwrap();

        let catalyst = design.catalyst_mass.value;
        assert_eq!(
            cost.shared.get(categories::CATALYST_LOADING),
            Some(catalyst * 36.81)
        );
        let replacement = cost.replacement.unwrap();
        let expected = catalyst * 36.81 / (8760.0 * 0.9 * 2.0);
        assert!((replacement.levelized_cost - expected).abs() < 1e-9 * expected);
        assert_eq!(
            cost.additional_opex().unwrap().get(categories::ADDITIONAL_OPEX),
            Some(replacement.levelized_cost)
        );
        assert!(cost.per_copy.get(categories::PRESSURE_VESSEL).unwrap() > 0.0);
    }

    #[test]
    fn conversion_setter_validates() {
        let mut reactor = CatalyticReactor::new("R", CatalyticReactorConfig::default());
        assert!(reactor.set_conversion(1.2).unwrap_err().is_configuration());
        assert!(reactor.set_conversion(-0.1).unwrap_err().is_configuration());
        assert_eq!(reactor.conversion(), 1.0);
        reactor.set_conversion(0.5).unwrap();
        assert_eq!(reactor.conversion(), 0.5);
        assert!(CatalyticReactorConfig::default().with_conversion(2.0).is_err());
    }

    #[test]
    fn missing_feed_is_invalid() {
        let reactor = CatalyticReactor::new("R", CatalyticReactorConfig::default());
        let err = reactor.size(UnitStreams::feeds(&[])).unwrap_err();
        assert!(matches!(err, DesignError::InvalidArg { .. }));
    }
}
