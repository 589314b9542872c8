//! Input contract checks
//!
//! Shared by the estimators and the composer. Every check names the field
//! it rejects so the caller can map the failure back to its own record.

use types::errors::EngineError;

/// Reject NaN and infinities.
pub fn require_finite(field: &str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(field, format!("must be finite, got {value}")))
    }
}

/// Require `value >= 0`.
pub fn require_non_negative(field: &str, value: f64) -> Result<f64, EngineError> {
    let value = require_finite(field, value)?;
    if value < 0.0 {
        return Err(EngineError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(value)
}

/// Require `value > 0`.
pub fn require_positive(field: &str, value: f64) -> Result<f64, EngineError> {
    let value = require_finite(field, value)?;
    if value <= 0.0 {
        return Err(EngineError::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(value)
}

/// Require a usable divisor: finite and non-zero.
///
/// Zero maps to `DivisionByZero` rather than `InvalidInput`.
pub fn require_divisor(field: &str, value: f64) -> Result<f64, EngineError> {
    let value = require_finite(field, value)?;
    if value == 0.0 {
        return Err(EngineError::division_by_zero(field));
    }
    Ok(value)
}
