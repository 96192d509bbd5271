//! Size and cost every unit of a case file.

use crate::schema::{CaseFile, CatalyticPreset, StreamDef, TankServiceDef, UnitDef, UnitKind};
use crate::validate::validate_case;
use crate::{ProjectError, ProjectResult};
use br_core::units::{hr, k, kg_per_m3, kgph, m3, m3ph, pa, pa_s};
use br_equipment::{
    CatalyticReactor, CatalyticReactorConfig, CostIndex, DesignError, DesignResult, Equipment,
    HydrogenolysisConfig, HydrogenolysisReactor, PsaCycleSpec, PsaUnit, SolvolysisConfig,
    SolvolysisReactor, StorageTank, UnitCost, UnitStreams, categories,
};
use br_streams::{MolarFlows, StreamResult, StreamState};
use std::collections::HashMap;
use tracing::{debug, info};

/// Costing summary of one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitReport {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    pub cost: UnitCost,
    /// Levelized consumable replacement [USD/hr of operation]
    pub additional_opex: f64,
}

impl UnitReport {
    pub fn purchase_cost(&self) -> f64 {
        self.cost.purchase_total()
    }

    pub fn installed_cost(&self) -> f64 {
        self.cost.installed_total()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub name: String,
    pub cepci: f64,
    pub units: Vec<UnitReport>,
}

impl CaseReport {
    pub fn unit(&self, id: &str) -> Option<&UnitReport> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn total_purchase_cost(&self) -> f64 {
        self.units.iter().map(UnitReport::purchase_cost).sum()
    }

    pub fn total_installed_cost(&self) -> f64 {
        self.units.iter().map(UnitReport::installed_cost).sum()
    }

    pub fn total_additional_opex(&self) -> f64 {
        self.units.iter().map(|u| u.additional_opex).sum()
    }
}

/// Build a stream snapshot from its definition.
pub fn stream_state(def: &StreamDef) -> StreamResult<StreamState> {
    let mut state = StreamState::from_pt(pa(def.pressure_pa), k(def.temperature_k))?
        .with_mass_flow(kgph(def.mass_flow_kg_per_h))?
        .with_volumetric_flow(m3ph(def.volumetric_flow_m3_per_h))?
        .with_enthalpy_flow(def.enthalpy_flow_kj_per_h)?;
    if let Some(rho) = def.density_kg_per_m3 {
        state = state.with_density(kg_per_m3(rho))?;
    }
    if let Some(mu) = def.viscosity_pa_s {
        state = state.with_viscosity(pa_s(mu))?;
    }
    if !def.molar_flows.is_empty() {
        let flows = MolarFlows::from_pairs(def.molar_flows.iter().map(|(s, f)| (s.as_str(), *f)))?;
        state = state.with_molar_flows(flows);
    }
    Ok(state)
}

fn run<E: Equipment>(unit: &E, streams: UnitStreams<'_>, index: CostIndex) -> DesignResult<UnitCost> {
    let (_, cost) = unit.evaluate(streams, index)?;
    Ok(cost)
}

fn catalytic_config(
    preset: CatalyticPreset,
    conversion: Option<f64>,
    whsv_per_h: Option<f64>,
    pressure_pa: Option<f64>,
) -> DesignResult<CatalyticReactorConfig> {
    let mut config = match preset {
        CatalyticPreset::Dehydration => CatalyticReactorConfig::dehydration(),
        CatalyticPreset::Oligomerization => CatalyticReactorConfig::oligomerization(),
        CatalyticPreset::Hydrogenation => CatalyticReactorConfig::hydrogenation(),
        CatalyticPreset::Generic => CatalyticReactorConfig::default(),
    };
    if let Some(x) = conversion {
        config.set_conversion(x)?;
    }
    if let Some(whsv) = whsv_per_h {
        config.whsv = whsv;
    }
    if let Some(p) = pressure_pa {
        config.pressure = pa(p);
    }
    Ok(config)
}

fn cost_unit(def: &UnitDef, streams: UnitStreams<'_>, index: CostIndex) -> DesignResult<UnitCost> {
    match &def.kind {
        UnitKind::CatalyticReactor {
            preset,
            conversion,
            whsv_per_h,
            pressure_pa,
        } => {
            let config = catalytic_config(*preset, *conversion, *whsv_per_h, *pressure_pa)?;
            run(&CatalyticReactor::new(&def.name, config), streams, index)
        }
        UnitKind::Solvolysis {
            delignification,
            pressure_pa,
            residence_time_h,
            turnaround_time_h,
            max_vessel_volume_m3,
        } => {
            let mut config = SolvolysisConfig::default();
            if let Some(x) = delignification {
                config.set_delignification(*x)?;
            }
            if let Some(p) = pressure_pa {
                config.pressure = pa(*p);
            }
            if let Some(t) = residence_time_h {
                config.schedule.residence_time = hr(*t);
            }
            if let Some(t) = turnaround_time_h {
                config.schedule.turnaround_time = hr(*t);
            }
            if let Some(v) = max_vessel_volume_m3 {
                config.schedule.max_vessel_volume = m3(*v);
            }
            run(&SolvolysisReactor::new(&def.name, config), streams, index)
        }
        UnitKind::Hydrogenolysis {
            n_reactors,
            conversion,
            monomer_yield,
            pressure_pa,
        } => {
            let mut config = HydrogenolysisConfig::default();
            if let Some(n) = n_reactors {
                config.n_reactors = *n;
            }
            if let Some(x) = conversion {
                config.set_conversion(*x)?;
            }
            if let Some(y) = monomer_yield {
                config.set_monomer_yield(*y)?;
            }
            if let Some(p) = pressure_pa {
                config.pressure = pa(*p);
            }
            run(&HydrogenolysisReactor::new(&def.name, config), streams, index)
        }
        UnitKind::Psa {
            n_beds,
            recovery,
            feed_pressure_pa,
            purge_pressure_pa,
            target_species,
        } => {
            let mut cycle = PsaCycleSpec::default();
            if let Some(n) = n_beds {
                cycle.n_beds = *n;
            }
            if let Some(r) = recovery {
                cycle.set_recovery(*r)?;
            }
            if let Some(p) = feed_pressure_pa {
                cycle.feed_pressure = pa(*p);
            }
            if let Some(p) = purge_pressure_pa {
                cycle.purge_pressure = pa(*p);
            }
            if let Some(species) = target_species {
                cycle.target_species = species.clone();
            }
            run(&PsaUnit::new(&def.name, cycle), streams, index)
        }
        UnitKind::StorageTank {
            service,
            storage_days,
        } => {
            let mut tank = match service {
                TankServiceDef::Ethanol => StorageTank::ethanol(&def.name),
                TankServiceDef::Hydrocarbon => StorageTank::hydrocarbon(&def.name),
                TankServiceDef::Hydrogen => StorageTank::hydrogen(&def.name),
            };
            if let Some(days) = storage_days {
                tank = tank.with_storage_days(*days);
            }
            run(&tank, streams, index)
        }
    }
}

fn collect(
    ids: &[String],
    states: &HashMap<&str, StreamState>,
    unit: &str,
) -> ProjectResult<Vec<StreamState>> {
    ids.iter()
        .map(|id| {
            states.get(id.as_str()).cloned().ok_or_else(|| ProjectError::Evaluation {
                unit: unit.to_string(),
                source: DesignError::InvalidArg {
                    what: "unit references an undefined stream",
                },
            })
        })
        .collect()
}

/// Validate a case, then size and cost every unit in file order.
///
/// # Errors
/// Validation errors, stream construction errors, or the first unit whose
/// design fails, tagged with that unit's id.
pub fn evaluate_case(case: &CaseFile) -> ProjectResult<CaseReport> {
    validate_case(case)?;
    let index = CostIndex::new(case.cepci).map_err(|source| ProjectError::Evaluation {
        unit: "<case>".to_string(),
        source,
    })?;

    let mut states = HashMap::new();
    for def in &case.streams {
        let state = stream_state(def).map_err(|source| ProjectError::Stream {
            id: def.id.clone(),
            source,
        })?;
        states.insert(def.id.as_str(), state);
    }

    let mut units = Vec::with_capacity(case.units.len());
    for def in &case.units {
        let ins = collect(&def.ins, &states, &def.id)?;
        let outs = collect(&def.outs, &states, &def.id)?;
        let streams = UnitStreams::new(&ins, &outs);

        let evaluated = cost_unit(def, streams, index).and_then(|cost| {
            let opex = cost
                .additional_opex()?
                .get(categories::ADDITIONAL_OPEX)
                .unwrap_or(0.0);
            Ok((cost, opex))
        });
        let (cost, additional_opex) = evaluated.map_err(|source| ProjectError::Evaluation {
            unit: def.id.clone(),
            source,
        })?;

        debug!(
            unit = %def.id,
            kind = def.kind.label(),
            purchase_usd = cost.purchase_total(),
            installed_usd = cost.installed_total(),
            "unit costed"
        );
        units.push(UnitReport {
            id: def.id.clone(),
            name: def.name.clone(),
            kind: def.kind.label(),
            cost,
            additional_opex,
        });
    }

    let report = CaseReport {
        name: case.name.clone(),
        cepci: case.cepci,
        units,
    };
    info!(
        case = %report.name,
        units = report.units.len(),
        purchase_usd = report.total_purchase_cost(),
        installed_usd = report.total_installed_cost(),
        "case evaluated"
    );
    Ok(report)
}
