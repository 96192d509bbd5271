//! Pressure-swing adsorption (PSA) bed sizing and costing.
//!
//! Four-step cycle (pressurization, feed, blowdown, purge) with linear
//! isotherms, isothermal beds and no axial pressure gradient. Equalization
//! steps of multi-bed trains are not modeled; the bed count only multiplies
//! the cost.

use crate::common::{check_finite, require_fraction, require_open_fraction, require_positive};
use crate::compression::{CompressionDuty, CompressorSpec, isentropic_power};
use crate::cost::{BareModuleFactors, CostIndex, UnitCost, categories};
use crate::error::{DesignError, DesignResult};
use crate::traits::{Equipment, UnitStreams};
use crate::vessel::{VesselDesign, VesselMaterialConstants, design_vessel_si};
use crate::vessel_cost::{VesselCostOptions, VesselMaterial, VesselOrientation, vessel_purchase_cost};
use br_core::constants::{ATM_PA, PA_PER_BAR, R_GAS_M3_ATM, SECONDS_PER_HOUR};
use br_core::units::{Density, Length, Mass, Pressure, Time, Volume, kg, kg_per_m3, m, m3, pa, s};
use br_streams::{MolarFlows, StreamState};
use std::f64::consts::PI;
use tracing::debug;

/// PSA cycle parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PsaCycleSpec {
    /// Adsorption (high) pressure
    pub feed_pressure: Pressure,
    /// Purge (low) pressure
    pub purge_pressure: Pressure,
    recovery: f64,
    pub n_beds: u32,
    /// Pellet diameter [mm]
    pub pellet_diameter_mm: f64,
    pub bed_density: Density,
    /// External void fraction ε, in (0, 1]
    pub void_fraction: f64,
    /// Adsorbent price [USD/kg]
    pub adsorbent_price: f64,
    /// Isotherm slope of the strongly adsorbed component
    pub k_a: f64,
    /// Isotherm slope of the weakly adsorbed component
    pub k_b: f64,
    /// Cross-section heuristic `A_cs = Re / area_to_reynolds` [m²]
    pub area_to_reynolds: f64,
    /// Species recovered in the raffinate
    pub target_species: String,
    pub compressor: CompressorSpec,
}

impl Default for PsaCycleSpec {
    /// Hydrogen purification on zeolite 5A: 5 bar feed, 0.25 bar purge,
    /// R = 0.85, 12 beds, 1.57 mm pellets, 795 kg/m³ bed, ε = 0.315,
    /// 5 USD/kg, k_A = 0.2, k_B = 0.01.
    fn default() -> Self {
        Self {
            feed_pressure: pa(5e5),
            purge_pressure: pa(0.25e5),
            recovery: 0.85,
            n_beds: 12,
            pellet_diameter_mm: 1.57,
            bed_density: kg_per_m3(795.0),
            void_fraction: 0.315,
            adsorbent_price: 5.0,
            k_a: 0.2,
            k_b: 0.01,
            area_to_reynolds: 15.0,
            target_species: "Hydrogen".to_string(),
            compressor: CompressorSpec::default(),
        }
    }
}

/// Sized PSA bed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsaCycleResult {
    pub reynolds: f64,
    pub cross_section: f64,
    pub bed_diameter: Length,
    pub bed_length: Length,
    pub feed_step_time: Time,
    pub bed_volume: Volume,
    pub adsorbent_mass_per_bed: Mass,
    pub adsorbent_cost_per_bed: f64,
    pub adsorbent_cost_total: f64,
    pub beta_a: f64,
    pub beta: f64,
    pub cycle_pressure_ratio: f64,
}

/// Product split of the PSA [kmol/h].
#[derive(Debug, Clone, PartialEq)]
pub struct PsaStreams {
    /// High-pressure product
    pub raffinate: MolarFlows,
    /// Equal to the PSA feed pressure
    pub raffinate_pressure: Pressure,
    /// Everything else
    pub extract: MolarFlows,
    /// Equal to the PSA purge pressure
    pub extract_pressure: Pressure,
}

impl PsaCycleSpec {
    /// Fixed recovery of the target species, assumed rather than computed
    /// from the equilibrium theory.
    pub fn recovery(&self) -> f64 {
        self.recovery
    }

    pub fn set_recovery(&mut self, recovery: f64) -> DesignResult<()> {
        self.recovery = require_fraction(recovery, "PSA recovery")?;
        Ok(())
    }

    /// Selectivity parameters `(β_A, β)`.
    ///
    /// ```text
    /// β_A = ε + (1-ε) k_A
    /// β   = (ε + (1-ε) k_B) / (ε + (1-ε) k_A)
    /// ```
    pub fn selectivity(&self) -> (f64, f64) {
        let eps = self.void_fraction;
        let beta_a = eps + (1.0 - eps) * self.k_a;
        let beta_b = eps + (1.0 - eps) * self.k_b;
        (beta_a, beta_b / beta_a)
    }

    /// `(P_high, P_low, P_high / P_low)` with pressures in bar.
    pub fn cycle_pressure(&self) -> DesignResult<(f64, f64, f64)> {
        let p_high = require_positive(self.feed_pressure.value, "PSA feed pressure")? / PA_PER_BAR;
        let p_low = require_positive(self.purge_pressure.value, "PSA purge pressure")? / PA_PER_BAR;
        if p_low >= p_high {
            return Err(DesignError::config(
                "PSA purge pressure",
                self.purge_pressure.value,
                "must be below the feed pressure",
            ));
        }
        Ok((p_high, p_low, p_high / p_low))
    }

    fn validate(&self) -> DesignResult<()> {
        require_positive(self.pellet_diameter_mm, "pellet diameter")?;
        require_positive(self.bed_density.value, "bed density")?;
        require_open_fraction(self.void_fraction, "PSA void fraction")?;
        require_positive(self.area_to_reynolds, "area-to-Reynolds ratio")?;
        require_positive(self.k_a, "isotherm slope k_A")?;
        if self.n_beds == 0 {
            return Err(DesignError::config("PSA bed count", 0.0, "must be at least 1"));
        }
        if !(self.adsorbent_price.is_finite() && self.adsorbent_price >= 0.0) {
            return Err(DesignError::config(
                "adsorbent price",
                self.adsorbent_price,
                "must be non-negative and finite",
            ));
        }
        Ok(())
    }

    /// Size one bed for a feed.
    ///
    /// ## Model
    ///
    /// ```text
    /// ṅ     = F 1000 / 3600                       [mol/s]
    /// Re    = (ṅ 2e-3)(d_p[mm] 1e-4) / μ
    /// A_cs  = Re / 15,  D = 2 √(A_cs/π),  L = 2 D
    /// θ     = ε P_L / (β_A R T)
    /// V_tf  = (ṅ / P_cycle) / θ,  L_tf = V_tf / A_cs
    /// t_f   = L / L_tf,  V_ads = V_tf t_f,  m = V_ads ρ_bed
    /// ```
    pub fn size_cycle(&self, feed: &StreamState) -> DesignResult<PsaCycleResult> {
        self.validate()?;
        let f_mol = require_positive(feed.molar_flow(), "PSA feed molar flow")?;
        let mu = feed.viscosity()?.value;
        let t = feed.temperature().value;

        let (beta_a, beta) = self.selectivity();
        let (_, p_low, p_cycle) = self.cycle_pressure()?;

        let n_dot = f_mol * 1000.0 / SECONDS_PER_HOUR;
        let reynolds = (n_dot * 2e-3) * (self.pellet_diameter_mm * 1e-4) / mu;
        let area = reynolds / self.area_to_reynolds;
        let diameter = 2.0 * (area / PI).sqrt();

        let theta = self.void_fraction * p_low / (beta_a * R_GAS_M3_ATM * t);
        let v_ads_tf = (n_dot / p_cycle) / theta;
        let l_tf = v_ads_tf / area;
        let length = 2.0 * diameter;
        let t_feed = length / l_tf;
        let volume = v_ads_tf * t_feed;
        let mass = volume * self.bed_density.value;
        check_finite(mass, "adsorbent mass")?;

        let cost_per_bed = mass * self.adsorbent_price;
        debug!(
            reynolds,
            bed_diameter_m = diameter,
            feed_step_s = t_feed,
            adsorbent_kg = mass,
            "PSA bed sized"
        );

        Ok(PsaCycleResult {
            reynolds,
            cross_section: area,
            bed_diameter: m(diameter),
            bed_length: m(length),
            feed_step_time: s(t_feed),
            bed_volume: m3(volume),
            adsorbent_mass_per_bed: kg(mass),
            adsorbent_cost_per_bed: cost_per_bed,
            adsorbent_cost_total: cost_per_bed * f64::from(self.n_beds),
            beta_a,
            beta,
            cycle_pressure_ratio: p_cycle,
        })
    }

    /// Split the feed: `F y R` of the target species to the raffinate, the
    /// remainder of every species to the extract.
    pub fn mole_balance(&self, feed: &StreamState) -> DesignResult<PsaStreams> {
        let flows = feed.molar_flows();
        let target = self.target_species.as_str();
        let y = flows.mole_fraction(target);
        let recovered = flows.total() * y * self.recovery;

        let mut raffinate = MolarFlows::new();
        raffinate.add(target, recovered)?;
        let mut extract = MolarFlows::new();
        for (species, flow) in flows.iter() {
            let remaining = if species == target {
                (flow - recovered).max(0.0)
            } else {
                flow
            };
            extract.add(species, remaining)?;
        }
        Ok(PsaStreams {
            raffinate,
            raffinate_pressure: self.feed_pressure,
            extract,
            extract_pressure: self.purge_pressure,
        })
    }

    /// Feed compressor (inlet below feed pressure) and vacuum pump (purge
    /// below atmospheric).
    pub fn compression(
        &self,
        feed: &StreamState,
        streams: &PsaStreams,
    ) -> DesignResult<CompressionDuty> {
        let t = feed.temperature();
        let p_in = feed.pressure();
        let feed_compressor = if p_in < self.feed_pressure {
            Some(isentropic_power(
                feed.molar_flow(),
                t,
                p_in,
                self.feed_pressure,
                &self.compressor,
            )?)
        } else {
            None
        };
        let atm = pa(ATM_PA);
        let vacuum_pump = if streams.extract_pressure < atm {
            Some(isentropic_power(
                streams.extract.total(),
                t,
                streams.extract_pressure,
                atm,
                &self.compressor,
            )?)
        } else {
            None
        };
        Ok(CompressionDuty {
            feed_compressor,
            vacuum_pump,
        })
    }
}

/// PSA train of identical vertical beds.
///
/// Inlets: `[feed gas]`. The feed must carry molar flows and viscosity.
#[derive(Debug, Clone, PartialEq)]
pub struct PsaUnit {
    pub name: String,
    pub cycle: PsaCycleSpec,
    pub material: VesselMaterialConstants,
    pub vessel: VesselCostOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PsaDesign {
    pub cycle: PsaCycleResult,
    pub vessel: VesselDesign,
    pub streams: PsaStreams,
    pub compression: CompressionDuty,
}

impl PsaUnit {
    /// Vertical stainless-steel 316 beds.
    pub fn new(name: impl Into<String>, cycle: PsaCycleSpec) -> Self {
        Self {
            name: name.into(),
            cycle,
            material: VesselMaterialConstants::default(),
            vessel: VesselCostOptions::new(
                VesselOrientation::Vertical,
                VesselMaterial::StainlessSteel316,
            ),
        }
    }
}

impl Equipment for PsaUnit {
    type Design = PsaDesign;

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self, streams: UnitStreams<'_>) -> DesignResult<PsaDesign> {
        let feed = streams.inlet(0, "PSA feed stream")?;
        if feed.pressure() > self.cycle.feed_pressure {
            return Err(DesignError::config(
                "PSA inlet pressure",
                feed.pressure().value,
                format!(
                    "must not exceed the PSA feed pressure of {} Pa",
                    self.cycle.feed_pressure.value
                ),
            ));
        }

        let cycle = self.cycle.size_cycle(feed)?;
        let split = self.cycle.mole_balance(feed)?;
        let compression = self.cycle.compression(feed, &split)?;
        let vessel = design_vessel_si(
            self.cycle.feed_pressure,
            cycle.bed_diameter,
            cycle.bed_length,
            &self.material,
        )?;

        Ok(PsaDesign {
            cycle,
            vessel,
            streams: split,
            compression,
        })
    }

    fn cost(&self, design: &PsaDesign, index: CostIndex) -> DesignResult<UnitCost> {
        let mut cost = UnitCost::new(
            self.cycle.n_beds,
            BareModuleFactors::for_vessel(self.vessel.orientation),
        );
        vessel_purchase_cost(&design.vessel, self.vessel, index)?.add_to(&mut cost.per_copy)?;
        cost.per_copy
            .insert(categories::ADSORBENT, design.cycle.adsorbent_cost_per_bed)?;
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use br_core::units::{k, pa_s};

    fn feed(p: f64) -> StreamState {
        StreamState::from_pt(pa(p), k(300.0))
            .unwrap()
            .with_viscosity(pa_s(1e-5))
            .unwrap()
            .with_molar_flows(
                MolarFlows::from_pairs([("Hydrogen", 80.0), ("Methane", 15.0), ("CO", 5.0)])
                    .unwrap(),
            )
    }

    #[test]
    fn bed_sizing_closed_form() {
        let spec = PsaCycleSpec::default();
        let r = spec.size_cycle(&feed(2e5)).unwrap();

        let n = 100.0 * 1000.0 / 3600.0;
        let re = n * 2e-3 * 1.57e-4 / 1e-5;
        let area = re / 15.0;
        let d = 2.0 * (area / PI).sqrt();
        let beta_a = 0.315 + 0.685 * 0.2;
        let theta = 0.315 * 0.25 / (beta_a * 8.205e-5 * 300.0);
        let v_tf = (n / 20.0) / theta;
        let t_f = 2.0 * d / (v_tf / area);
        let mass = v_tf * t_f * 795.0;

        assert!((r.reynolds - re).abs() < 1e-9 * re);
        assert!((r.bed_diameter.value - d).abs() < 1e-9 * d);
        assert!((r.bed_length.value - 2.0 * d).abs() < 1e-9 * d);
        assert!((r.cycle_pressure_ratio - 20.0).abs() < 1e-12);
        assert!((r.feed_step_time.value - t_f).abs() < 1e-9 * t_f);
        assert!((r.adsorbent_mass_per_bed.value - mass).abs() < 1e-9 * mass);
        assert!((r.adsorbent_cost_total - 12.0 * 5.0 * r.adsorbent_mass_per_bed.value).abs() < 1e-6);
        assert!(r.beta < 1.0);
    }

    #[test]
    fn mole_balance_conserves_species() {
        let spec = PsaCycleSpec::default();
        let f = feed(2e5);
        let split = spec.mole_balance(&f).unwrap();
        assert!((split.raffinate.get("Hydrogen") - 80.0 * 0.85).abs() < 1e-9);
        assert!((split.extract.get("Hydrogen") - 80.0 * 0.15).abs() < 1e-9);
        assert_eq!(split.extract.get("Methane"), 15.0);
        let total = split.raffinate.total() + split.extract.total();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn products_leave_at_cycle_pressures() {
        let spec = PsaCycleSpec {
            feed_pressure: pa(8e5),
            purge_pressure: pa(0.5e5),
            ..PsaCycleSpec::default()
        };
        let split = spec.mole_balance(&feed(2e5)).unwrap();
        assert_eq!(split.raffinate_pressure, pa(8e5));
        assert_eq!(split.extract_pressure, pa(0.5e5));
    }

    #[test]
    fn recovery_setter_validates() {
        let mut spec = PsaCycleSpec::default();
        assert!(spec.set_recovery(1.2).unwrap_err().is_configuration());
        assert!(spec.set_recovery(-0.1).is_err());
        assert_eq!(spec.recovery(), 0.85);
        spec.set_recovery(0.9).unwrap();
        assert_eq!(spec.recovery(), 0.9);
    }

    #[test]
    fn inlet_above_feed_pressure_is_rejected() {
        let unit = PsaUnit::new("PSA", PsaCycleSpec::default());
        let ins = [feed(6e5)];
        let err = unit.size(UnitStreams::feeds(&ins)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn compression_duties() {
        let spec = PsaCycleSpec::default();
        let low = feed(2e5);
        let split = spec.mole_balance(&low).unwrap();
        let duty = spec.compression(&low, &split).unwrap();
        assert!(duty.feed_compressor.unwrap().value > 0.0);
        assert!(duty.vacuum_pump.unwrap().value > 0.0);

        let at_feed = feed(5e5);
        let duty = spec.compression(&at_feed, &split).unwrap();
        assert!(duty.feed_compressor.is_none());
    }

    #[test]
    fn costs_every_bed() {
        let unit = PsaUnit::new("PSA", PsaCycleSpec::default());
        let ins = [feed(2e5)];
        let (design, cost) = unit
            .evaluate(UnitStreams::feeds(&ins), CostIndex::default())
            .unwrap();
        assert_eq!(cost.parallel, 12);
        assert_eq!(
            cost.per_copy.get(categories::ADSORBENT),
            Some(design.cycle.adsorbent_cost_per_bed)
        );
        assert!(cost.per_copy.get(categories::PRESSURE_VESSEL).unwrap() > 0.0);
        assert!(cost.purchase_total() > 12.0 * design.cycle.adsorbent_cost_per_bed);
    }

    #[test]
    fn missing_viscosity_is_reported() {
        let spec = PsaCycleSpec::default();
        let f = StreamState::from_pt(pa(2e5), k(300.0))
            .unwrap()
            .with_molar_flows(MolarFlows::from_pairs([("Hydrogen", 10.0)]).unwrap());
        assert!(matches!(spec.size_cycle(&f), Err(DesignError::Stream(_))));
    }
}
