//! br-equipment: sizing, scheduling and costing of biorefinery equipment.
//!
//! Provides:
//! - Pressure-vessel mechanical design and purchase-cost correlations
//! - Packed-bed pressure drop (Ergun, Handley–Heggs, Hicks)
//! - Multi-bed scheduling for continuous throughput
//! - PSA bed sizing with compression duties
//! - Catalyst and adsorbent replacement costing
//! - Unit models: catalytic reactors, solvolysis, hydrogenolysis, PSA and
//!   storage tanks
//!
//! All units implement the `Equipment` trait. They read stream snapshots
//! supplied by the flowsheet framework and are deterministic functions of
//! those snapshots and their configuration.
//!
//! # Example
//!
//! ```
//! use br_equipment::{CatalyticReactor, CatalyticReactorConfig, CostIndex, Equipment, UnitStreams};
//! use br_streams::StreamState;
//! use br_core::units::{k, kgph, pa};
//!
//! let feed = StreamState::from_pt(pa(1.063e6), k(754.15))
//!     .unwrap()
//!     .with_mass_flow(kgph(25_000.0))
//!     .unwrap();
//!
//! let reactor = CatalyticReactor::new("R101", CatalyticReactorConfig::dehydration());
//! let ins = [feed];
//! let (design, cost) = reactor
//!     .evaluate(UnitStreams::feeds(&ins), CostIndex::default())
//!     .unwrap();
//!
//! assert!(design.vessel.weight_lb > 0.0);
//! assert!(cost.purchase_total() > 0.0);
//! ```

pub mod catalytic;
pub mod common;
pub mod compression;
pub mod cost;
pub mod error;
pub mod hydrogenolysis;
pub mod lifecycle;
pub mod pressure_drop;
pub mod psa;
pub mod schedule;
pub mod solvolysis;
pub mod tanks;
pub mod traits;
pub mod vessel;
pub mod vessel_cost;

// Re-exports
pub use catalytic::{CatalystSpec, CatalyticDesign, CatalyticReactor, CatalyticReactorConfig, ThermalMode};
pub use compression::{CompressionDuty, CompressorSpec};
pub use cost::{BareModuleFactors, CostBreakdown, CostIndex, UnitCost, categories};
pub use error::{DesignError, DesignResult};
pub use hydrogenolysis::{HydrogenolysisConfig, HydrogenolysisDesign, HydrogenolysisReactor};
pub use lifecycle::ConsumableReplacement;
pub use pressure_drop::{BedFlow, FlowRegime, PackedBed, PressureDrop, packed_bed_pressure_drop};
pub use psa::{PsaCycleResult, PsaCycleSpec, PsaDesign, PsaStreams, PsaUnit};
pub use schedule::{BedScheduleResult, BedScheduleSpec};
pub use solvolysis::{SolvolysisConfig, SolvolysisDesign, SolvolysisReactor};
pub use tanks::{StorageTank, TankCapacity, TankDesign, TankService};
pub use traits::{ConversionFraction, Equipment, UnitStreams};
pub use vessel::{HeadType, VesselDesign, VesselMaterialConstants, design_vessel, design_vessel_si};
pub use vessel_cost::{
    VesselCostOptions, VesselMaterial, VesselOrientation, VesselPurchaseCost, vessel_purchase_cost,
};
