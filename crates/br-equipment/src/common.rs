//! Common input checks for sizing calculations.

use crate::error::{DesignError, DesignResult};
use br_core::numeric::{ensure_finite, ensure_fraction, ensure_positive};

/// Ensure an intermediate result is finite.
pub fn check_finite(value: f64, what: &'static str) -> DesignResult<()> {
    ensure_finite(value, what).map_err(|_| DesignError::NonPhysical { what })?;
    Ok(())
}

/// Geometry, flows, times and prices that must be strictly positive.
pub fn require_positive(value: f64, what: &'static str) -> DesignResult<f64> {
    ensure_positive(value, what)
        .map_err(|_| DesignError::config(what, value, "must be positive and finite"))
}

pub fn require_non_negative(value: f64, what: &'static str) -> DesignResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DesignError::config(
            what,
            value,
            "must be non-negative and finite",
        ))
    }
}

/// Conversion, recovery, uptime and similar fractions in [0, 1].
pub fn require_fraction(value: f64, what: &'static str) -> DesignResult<f64> {
    Ok(ensure_fraction(value, what)?)
}

/// Fractions that divide something (void or working-volume fraction): (0, 1].
pub fn require_open_fraction(value: f64, what: &'static str) -> DesignResult<f64> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(DesignError::config(what, value, "must lie in (0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_require_fraction() {
        assert_eq!(require_fraction(0.85, "recovery").unwrap(), 0.85);
        let err = require_fraction(1.2, "conversion").unwrap_err();
        assert!(err.is_configuration());
        assert!(require_fraction(-0.1, "conversion").is_err());
    }

    #[test]
    fn test_require_open_fraction() {
        assert!(require_open_fraction(0.0, "void fraction").is_err());
        assert!(require_open_fraction(1.0, "void fraction").is_ok());
        assert!(require_open_fraction(1.01, "void fraction").is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(0.0, "length").is_err());
        assert!(require_positive(f64::NAN, "length").is_err());
        assert!(require_non_negative(0.0, "price").is_ok());
        assert!(require_non_negative(-1.0, "price").is_err());
    }
}
