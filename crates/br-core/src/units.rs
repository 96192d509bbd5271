// br-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength, Mass as UomMass,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Power as UomPower,
    Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Velocity as UomVelocity, Volume as UomVolume, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    pa(v * constants::PA_PER_BAR)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

/// Mass flow given in kg/hr, the flowsheet's native rate unit.
#[inline]
pub fn kgph(v: f64) -> MassRate {
    kgps(v / constants::SECONDS_PER_HOUR)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Length given in feet, converted with the historical `3.28084 ft/m` factor.
#[inline]
pub fn ft(v: f64) -> Length {
    m(v / constants::FT_PER_M)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

/// Volumetric flow given in m³/hr.
#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v / constants::SECONDS_PER_HOUR)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hr(v: f64) -> Time {
    s(v * constants::SECONDS_PER_HOUR)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Conversions into the imperial design basis used by the vessel correlations.
///
/// These multiply by the exact historical factors rather than going through
/// uom's own unit definitions, so costing baselines reproduce bit-for-bit.
pub mod imperial {
    use super::constants::{FT3_PER_M3, FT_PER_M, PA_PER_PSI};
    use super::{Length, Pressure, Volume};

    #[inline]
    pub fn psi(p: Pressure) -> f64 {
        p.value * (1.0 / PA_PER_PSI)
    }

    #[inline]
    pub fn feet(l: Length) -> f64 {
        l.value * FT_PER_M
    }

    #[inline]
    pub fn cubic_feet(v: Volume) -> f64 {
        v.value * FT3_PER_M3
    }
}

pub mod constants {
    /// Pa per psi.
    pub const PA_PER_PSI: f64 = 6894.76;
    /// Atmospheric pressure in psi, as used for gauge conversion.
    pub const ATM_PSI: f64 = 14.7;
    /// Atmospheric pressure in Pa.
    pub const ATM_PA: f64 = 101_325.0;
    pub const PA_PER_BAR: f64 = 1e5;

    pub const FT_PER_M: f64 = 3.28084;
    pub const IN_PER_FT: f64 = 12.0;
    pub const M3_PER_FT3: f64 = 0.0283168;
    pub const FT3_PER_M3: f64 = 35.3147;
    pub const GAL_PER_M3: f64 = 264.172;
    pub const LB_PER_KG: f64 = 2.2;

    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    pub const HOURS_PER_DAY: f64 = 24.0;
    pub const HOURS_PER_YEAR: f64 = 8760.0;

    /// Universal gas constant [m³·atm/(K·mol)].
    pub const R_GAS_M3_ATM: f64 = 8.205e-5;
    /// Universal gas constant [J/(K·mol)].
    pub const R_GAS_J: f64 = 8.314;
}
