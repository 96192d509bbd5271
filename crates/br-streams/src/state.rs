//! Read-only stream snapshot supplied by the flowsheet framework.

use crate::composition::MolarFlows;
use crate::error::{StreamError, StreamResult};
use br_core::constants::SECONDS_PER_HOUR;
use br_core::units::{Density, DynVisc, MassRate, Pressure, Temperature, VolumeRate, kgps, m3ph};

/// Enthalpy flow [kJ/hr], including formation enthalpy.
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type EnthalpyFlow = f64;

/// One stream as seen by a unit at a single flowsheet iteration.
///
/// Pressure and temperature are always present. Flows default to zero.
/// Density and viscosity are only reported by the framework when a property
/// package computed them, so reading them can fail with `MissingProperty`.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState {
    p: Pressure,
    t: Temperature,
    mass_flow: MassRate,
    vol_flow: VolumeRate,
    rho: Option<Density>,
    mu: Option<DynVisc>,
    enthalpy_flow: EnthalpyFlow,
    molar: MolarFlows,
}

fn check_non_negative(value: f64, what: &'static str) -> StreamResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(StreamError::NonPhysical { what, value });
    }
    Ok(())
}

fn check_positive(value: f64, what: &'static str) -> StreamResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StreamError::NonPhysical { what, value });
    }
    Ok(())
}

impl StreamState {
    /// Create an empty-flow snapshot from pressure and temperature.
    ///
    /// Validates that pressure and temperature are positive and finite.
    pub fn from_pt(p: Pressure, t: Temperature) -> StreamResult<Self> {
        check_positive(p.value, "pressure")?;
        check_positive(t.value, "temperature")?;

        Ok(Self {
            p,
            t,
            mass_flow: kgps(0.0),
            vol_flow: m3ph(0.0),
            rho: None,
            mu: None,
            enthalpy_flow: 0.0,
            molar: MolarFlows::new(),
        })
    }

    pub fn with_mass_flow(mut self, mass_flow: MassRate) -> StreamResult<Self> {
        check_non_negative(mass_flow.value, "mass flow")?;
        self.mass_flow = mass_flow;
        Ok(self)
    }

    pub fn with_volumetric_flow(mut self, vol_flow: VolumeRate) -> StreamResult<Self> {
        check_non_negative(vol_flow.value, "volumetric flow")?;
        self.vol_flow = vol_flow;
        Ok(self)
    }

    pub fn with_density(mut self, rho: Density) -> StreamResult<Self> {
        check_positive(rho.value, "density")?;
        self.rho = Some(rho);
        Ok(self)
    }

    pub fn with_viscosity(mut self, mu: DynVisc) -> StreamResult<Self> {
        check_positive(mu.value, "viscosity")?;
        self.mu = Some(mu);
        Ok(self)
    }

    /// Enthalpy flow may be negative (formation enthalpy dominates).
    pub fn with_enthalpy_flow(mut self, h: EnthalpyFlow) -> StreamResult<Self> {
        if !h.is_finite() {
            return Err(StreamError::NonPhysical {
                what: "enthalpy flow",
                value: h,
            });
        }
        self.enthalpy_flow = h;
        Ok(self)
    }

    pub fn with_molar_flows(mut self, molar: MolarFlows) -> Self {
        self.molar = molar;
        self
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn mass_flow(&self) -> MassRate {
        self.mass_flow
    }

    /// Mass flow [kg/hr].
    pub fn mass_flow_kgph(&self) -> f64 {
        self.mass_flow.value * SECONDS_PER_HOUR
    }

    pub fn volumetric_flow(&self) -> VolumeRate {
        self.vol_flow
    }

    /// Volumetric flow [m³/hr].
    pub fn volumetric_flow_m3ph(&self) -> f64 {
        self.vol_flow.value * SECONDS_PER_HOUR
    }

    pub fn density(&self) -> StreamResult<Density> {
        self.rho
            .ok_or(StreamError::MissingProperty { what: "density" })
    }

    pub fn viscosity(&self) -> StreamResult<DynVisc> {
        self.mu
            .ok_or(StreamError::MissingProperty { what: "viscosity" })
    }

    pub fn enthalpy_flow(&self) -> EnthalpyFlow {
        self.enthalpy_flow
    }

    pub fn molar_flows(&self) -> &MolarFlows {
        &self.molar
    }

    /// Total molar flow [kmol/hr].
    pub fn molar_flow(&self) -> f64 {
        self.molar.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use br_core::units::{k, kg_per_m3, kgph, m3ph, pa};

    #[test]
    fn create_valid_state() {
        let state = StreamState::from_pt(pa(101325.0), k(300.0)).unwrap();
        assert_eq!(state.pressure().value, 101325.0);
        assert_eq!(state.temperature().value, 300.0);
        assert_eq!(state.mass_flow_kgph(), 0.0);
    }

    #[test]
    fn hourly_flows_round_trip() {
        let state = StreamState::from_pt(pa(101325.0), k(300.0))
            .unwrap()
            .with_mass_flow(kgph(7200.0))
            .unwrap()
            .with_volumetric_flow(m3ph(100.0))
            .unwrap();
        assert!((state.mass_flow_kgph() - 7200.0).abs() < 1e-9);
        assert!((state.volumetric_flow_m3ph() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn reject_negative_pressure() {
        assert!(StreamState::from_pt(pa(-100.0), k(300.0)).is_err());
    }

    #[test]
    fn reject_zero_temperature() {
        assert!(StreamState::from_pt(pa(101325.0), k(0.0)).is_err());
    }

    #[test]
    fn reject_non_finite() {
        assert!(StreamState::from_pt(pa(f64::NAN), k(300.0)).is_err());
        let state = StreamState::from_pt(pa(101325.0), k(300.0)).unwrap();
        assert!(state.with_enthalpy_flow(f64::INFINITY).is_err());
    }

    #[test]
    fn missing_properties_are_reported() {
        let state = StreamState::from_pt(pa(101325.0), k(300.0)).unwrap();
        assert_eq!(
            state.viscosity(),
            Err(StreamError::MissingProperty { what: "viscosity" })
        );
        let state = state.with_density(kg_per_m3(800.0)).unwrap();
        assert_eq!(state.density().unwrap().value, 800.0);
    }
}
