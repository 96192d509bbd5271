use crate::BrError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, BrError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BrError::NonFinite { what, value: v })
    }
}

/// Strictly positive and finite.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, BrError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(BrError::OutOfRange {
            what,
            value: v,
            min: 0.0,
            max: Real::INFINITY,
        })
    }
}

/// Inclusive range check. Never clamps.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, BrError> {
    ensure_finite(v, what)?;
    if (min..=max).contains(&v) {
        Ok(v)
    } else {
        Err(BrError::OutOfRange {
            what,
            value: v,
            min,
            max,
        })
    }
}

/// Fractions (conversion, recovery, uptime, ...) live in [0, 1].
pub fn ensure_fraction(v: Real, what: &'static str) -> Result<Real, BrError> {
    ensure_in_range(v, 0.0, 1.0, what)
}
