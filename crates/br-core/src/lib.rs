//! br-core: stable foundation for the biorefinery equipment engine.
//!
//! Contains:
//! - units (uom SI types, constructors and the historical conversion constants)
//! - numeric (Real + tolerances + float and range checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{BrError, BrResult};
pub use numeric::*;
pub use units::*;
