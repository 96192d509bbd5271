//! Case file schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vessel correlation basis, so a case without an index costs at par.
fn default_cepci() -> f64 {
    567.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    pub version: u32,
    pub name: String,
    /// Chemical Engineering Plant Cost Index of the costing year
    #[serde(default = "default_cepci")]
    pub cepci: f64,
    #[serde(default)]
    pub streams: Vec<StreamDef>,
    #[serde(default)]
    pub units: Vec<UnitDef>,
}

/// Stream snapshot as reported by the flowsheet framework.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamDef {
    pub id: String,
    pub pressure_pa: f64,
    pub temperature_k: f64,
    #[serde(default)]
    pub mass_flow_kg_per_h: f64,
    #[serde(default)]
    pub volumetric_flow_m3_per_h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_per_m3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity_pa_s: Option<f64>,
    #[serde(default)]
    pub enthalpy_flow_kj_per_h: f64,
    /// Species flows [kmol/h]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub molar_flows: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitDef {
    pub id: String,
    pub name: String,
    /// Inlet stream ids, in the order the unit type expects
    #[serde(default)]
    pub ins: Vec<String>,
    #[serde(default)]
    pub outs: Vec<String>,
    pub kind: UnitKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatalyticPreset {
    Dehydration,
    Oligomerization,
    Hydrogenation,
    Generic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TankServiceDef {
    Ethanol,
    Hydrocarbon,
    Hydrogen,
}

/// Unit type and the settings that override its defaults. Absent fields keep
/// the engine default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum UnitKind {
    CatalyticReactor {
        preset: CatalyticPreset,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        conversion: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        whsv_per_h: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pressure_pa: Option<f64>,
    },
    Solvolysis {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delignification: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pressure_pa: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        residence_time_h: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        turnaround_time_h: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_vessel_volume_m3: Option<f64>,
    },
    Hydrogenolysis {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        n_reactors: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        conversion: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        monomer_yield: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pressure_pa: Option<f64>,
    },
    Psa {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        n_beds: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recovery: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feed_pressure_pa: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        purge_pressure_pa: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_species: Option<String>,
    },
    StorageTank {
        service: TankServiceDef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        storage_days: Option<f64>,
    },
}

impl UnitKind {
    pub fn label(&self) -> &'static str {
        match self {
            UnitKind::CatalyticReactor { .. } => "CatalyticReactor",
            UnitKind::Solvolysis { .. } => "Solvolysis",
            UnitKind::Hydrogenolysis { .. } => "Hydrogenolysis",
            UnitKind::Psa { .. } => "Psa",
            UnitKind::StorageTank { .. } => "StorageTank",
        }
    }

    /// Number of inlet streams the unit reads.
    pub fn inlet_count(&self) -> usize {
        match self {
            UnitKind::Solvolysis { .. } | UnitKind::Hydrogenolysis { .. } => 2,
            _ => 1,
        }
    }
}
