//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use hf_core::numeric::ensure_finite;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}
