//! Case file validation logic.

use crate::schema::{CaseFile, StreamDef, UnitDef, UnitKind};
use std::collections::HashSet;

/// Case file format version written by this crate.
pub const CASE_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: String, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: impl FnOnce() -> String, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(field(), value, "must be positive and finite"));
    }
    Ok(())
}

fn non_negative(field: impl FnOnce() -> String, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(invalid(field(), value, "must be non-negative and finite"));
    }
    Ok(())
}

fn fraction(field: impl FnOnce() -> String, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(0.0..=1.0).contains(&v) => Err(invalid(field(), v, "must lie in [0, 1]")),
        _ => Ok(()),
    }
}

fn optional_positive(field: impl FnOnce() -> String, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) => positive(field, v),
        None => Ok(()),
    }
}

fn count(field: impl FnOnce() -> String, value: Option<u32>) -> Result<(), ValidationError> {
    match value {
        Some(0) => Err(invalid(field(), 0, "must be at least 1")),
        _ => Ok(()),
    }
}

pub fn validate_case(case: &CaseFile) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > CASE_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }
    positive(|| "cepci".to_string(), case.cepci)?;

    let mut stream_ids = HashSet::new();
    for stream in &case.streams {
        if !stream_ids.insert(stream.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: stream.id.clone(),
                context: "streams".to_string(),
            });
        }
        validate_stream(stream)?;
    }

    let mut unit_ids = HashSet::new();
    for unit in &case.units {
        if !unit_ids.insert(unit.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: unit.id.clone(),
                context: "units".to_string(),
            });
        }
        validate_unit(unit, &stream_ids)?;
    }

    Ok(())
}

fn validate_stream(stream: &StreamDef) -> Result<(), ValidationError> {
    let id = &stream.id;
    positive(|| format!("stream '{id}' pressure_pa"), stream.pressure_pa)?;
    positive(|| format!("stream '{id}' temperature_k"), stream.temperature_k)?;
    non_negative(
        || format!("stream '{id}' mass_flow_kg_per_h"),
        stream.mass_flow_kg_per_h,
    )?;
    non_negative(
        || format!("stream '{id}' volumetric_flow_m3_per_h"),
        stream.volumetric_flow_m3_per_h,
    )?;
    optional_positive(
        || format!("stream '{id}' density_kg_per_m3"),
        stream.density_kg_per_m3,
    )?;
    optional_positive(|| format!("stream '{id}' viscosity_pa_s"), stream.viscosity_pa_s)?;
    if !stream.enthalpy_flow_kj_per_h.is_finite() {
        return Err(invalid(
            format!("stream '{id}' enthalpy_flow_kj_per_h"),
            stream.enthalpy_flow_kj_per_h,
            "must be finite",
        ));
    }
    for (species, flow) in &stream.molar_flows {
        non_negative(|| format!("stream '{id}' molar flow of '{species}'"), *flow)?;
    }
    Ok(())
}

fn validate_unit(unit: &UnitDef, stream_ids: &HashSet<&str>) -> Result<(), ValidationError> {
    let id = &unit.id;
    for stream in unit.ins.iter().chain(&unit.outs) {
        if !stream_ids.contains(stream.as_str()) {
            return Err(ValidationError::MissingReference {
                id: stream.clone(),
                context: format!("unit '{id}' streams"),
            });
        }
    }

    let expected = unit.kind.inlet_count();
    if unit.ins.len() != expected {
        return Err(invalid(
            format!("unit '{id}' ins"),
            unit.ins.len(),
            &format!("{} expects {expected} inlet(s)", unit.kind.label()),
        ));
    }

    match &unit.kind {
        UnitKind::CatalyticReactor {
            conversion,
            whsv_per_h,
            pressure_pa,
            ..
        } => {
            fraction(|| format!("unit '{id}' conversion"), *conversion)?;
            optional_positive(|| format!("unit '{id}' whsv_per_h"), *whsv_per_h)?;
            optional_positive(|| format!("unit '{id}' pressure_pa"), *pressure_pa)?;
        }
        UnitKind::Solvolysis {
            delignification,
            pressure_pa,
            residence_time_h,
            turnaround_time_h,
            max_vessel_volume_m3,
        } => {
            fraction(|| format!("unit '{id}' delignification"), *delignification)?;
            optional_positive(|| format!("unit '{id}' pressure_pa"), *pressure_pa)?;
            optional_positive(|| format!("unit '{id}' residence_time_h"), *residence_time_h)?;
            if let Some(t) = turnaround_time_h {
                non_negative(|| format!("unit '{id}' turnaround_time_h"), *t)?;
            }
            optional_positive(
                || format!("unit '{id}' max_vessel_volume_m3"),
                *max_vessel_volume_m3,
            )?;
        }
        UnitKind::Hydrogenolysis {
            n_reactors,
            conversion,
            monomer_yield,
            pressure_pa,
        } => {
            count(|| format!("unit '{id}' n_reactors"), *n_reactors)?;
            fraction(|| format!("unit '{id}' conversion"), *conversion)?;
            fraction(|| format!("unit '{id}' monomer_yield"), *monomer_yield)?;
            optional_positive(|| format!("unit '{id}' pressure_pa"), *pressure_pa)?;
        }
        UnitKind::Psa {
            n_beds,
            recovery,
            feed_pressure_pa,
            purge_pressure_pa,
            target_species,
        } => {
            count(|| format!("unit '{id}' n_beds"), *n_beds)?;
            fraction(|| format!("unit '{id}' recovery"), *recovery)?;
            optional_positive(|| format!("unit '{id}' feed_pressure_pa"), *feed_pressure_pa)?;
            optional_positive(|| format!("unit '{id}' purge_pressure_pa"), *purge_pressure_pa)?;
            if let Some(species) = target_species {
                if species.trim().is_empty() {
                    return Err(invalid(
                        format!("unit '{id}' target_species"),
                        species,
                        "must name a species",
                    ));
                }
            }
        }
        UnitKind::StorageTank { storage_days, .. } => {
            optional_positive(|| format!("unit '{id}' storage_days"), *storage_days)?;
        }
    }

    Ok(())
}
