//! Error types for sizing and costing.

use br_core::error::BrError;
use br_streams::StreamError;
use thiserror::Error;

/// Errors that can occur while sizing or costing equipment.
///
/// Every variant is a caller setup problem: the engine is a set of closed-form
/// evaluations, so nothing here is worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// Invalid model setup: an input violated a bound.
    #[error("Configuration error: {what} = {value} ({reason})")]
    Configuration {
        what: &'static str,
        value: f64,
        reason: String,
    },

    /// Energy balance contradicts the unit's declared thermal mode.
    #[error("Thermal inconsistency in '{unit}': {reason} (duty = {duty} kJ/hr)")]
    ThermalInconsistency {
        unit: String,
        duty: f64,
        reason: &'static str,
    },

    /// No packed-bed friction correlation covers this Reynolds number.
    #[error(
        "No pressure-drop correlation for Re/(1-eps) = {modified_reynolds}: band [500, 1000) is undefined"
    )]
    CorrelationGap { modified_reynolds: f64 },

    /// Stream or unit wiring is missing something a model needs.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),
}

pub type DesignResult<T> = Result<T, DesignError>;

impl DesignError {
    pub fn config(what: &'static str, value: f64, reason: impl Into<String>) -> Self {
        DesignError::Configuration {
            what,
            value,
            reason: reason.into(),
        }
    }

    /// True for setup errors (bad fractions, geometry, pressures, wiring).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DesignError::Configuration { .. } | DesignError::InvalidArg { .. }
        )
    }
}

impl From<BrError> for DesignError {
    fn from(e: BrError) -> Self {
        match e {
            BrError::OutOfRange {
                what,
                value,
                min,
                max,
            } => DesignError::config(what, value, format!("must lie in [{min}, {max}]")),
            BrError::NonFinite { what, value } => {
                DesignError::config(what, value, "must be finite")
            }
            BrError::InvalidArg { what } => DesignError::InvalidArg { what },
            BrError::Invariant { what } => DesignError::NonPhysical { what },
        }
    }
}

impl From<DesignError> for BrError {
    fn from(e: DesignError) -> Self {
        match e {
            DesignError::Configuration { what, .. } => BrError::InvalidArg { what },
            DesignError::ThermalInconsistency { .. } => BrError::Invariant {
                what: "thermal inconsistency",
            },
            DesignError::CorrelationGap { .. } => BrError::InvalidArg {
                what: "pressure-drop correlation gap",
            },
            DesignError::InvalidArg { what } => BrError::InvalidArg { what },
            DesignError::NonPhysical { what } => BrError::Invariant { what },
            DesignError::Stream(s) => s.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DesignError::config("diameter", -1.0, "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("diameter"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn out_of_range_becomes_configuration() {
        let err: DesignError = BrError::OutOfRange {
            what: "conversion",
            value: 1.2,
            min: 0.0,
            max: 1.0,
        }
        .into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("[0, 1]"));
    }

    #[test]
    fn error_conversion() {
        let err = DesignError::CorrelationGap {
            modified_reynolds: 700.0,
        };
        assert!(!err.is_configuration());
        let br: BrError = err.into();
        assert!(matches!(br, BrError::InvalidArg { .. }));
    }
}
