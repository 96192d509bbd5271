//! br-streams: read-only stream snapshots handed to equipment models.
//!
//! Provides:
//! - `StreamState`: pressure, temperature, flows, density, viscosity and
//!   enthalpy flow of one stream at one flowsheet iteration
//! - `MolarFlows`: molar flow of named species
//!
//! # Architecture
//!
//! Thermodynamics, phase equilibrium and reaction conversion belong to the
//! surrounding process-simulation framework. This crate only carries the
//! values that framework computed, validated once on construction, so the
//! equipment crate never has to re-check them.
//!
//! # Example
//!
//! ```
//! use br_streams::{MolarFlows, StreamState};
//! use br_core::units::{k, kgph, pa};
//!
//! let feed = StreamState::from_pt(pa(1.063e6), k(754.15))
//!     .unwrap()
//!     .with_mass_flow(kgph(25_000.0))
//!     .unwrap()
//!     .with_molar_flows(MolarFlows::from_pairs([("Ethanol", 540.0), ("Water", 3.0)]).unwrap());
//!
//! assert!(feed.molar_flows().mole_fraction("Ethanol") > 0.99);
//! ```

pub mod composition;
pub mod error;
pub mod state;

// Re-exports for ergonomics
pub use composition::MolarFlows;
pub use error::{StreamError, StreamResult};
pub use state::{EnthalpyFlow, StreamState};
