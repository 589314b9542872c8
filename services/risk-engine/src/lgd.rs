//! Loss given default
//!
//! Uncollateralized share of the exposure plus recovery cost, scaled by a
//! lending-type multiplier. No floor or ceiling is applied.

use types::errors::EngineError;
use types::profile::ExposureProfile;
use types::result::LgdBreakdown;

use crate::validator::{require_non_negative, require_positive};

/// Compute the LGD and every component that went into it.
///
/// ```text
/// collateral_ratio = collateral_value / outstanding_balance
/// base_lgd         = 1 - min(1, collateral_ratio)
/// recovery_ratio   = recovery_cost / outstanding_balance
/// lgd = (base_lgd + recovery_ratio) * lending_type_lgd_factor
/// ```
pub fn lgd_breakdown(exposure: &ExposureProfile) -> Result<LgdBreakdown, EngineError> {
    let outstanding = require_positive("outstanding_balance", exposure.outstanding_balance)?;
    let collateral = require_non_negative("collateral_value", exposure.collateral_value)?;
    let recovery_cost = require_non_negative("recovery_cost", exposure.recovery_cost)?;
    let multiplier =
        require_positive("lending_type_lgd_factor", exposure.lending_type_lgd_factor)?;

    let collateral_ratio = collateral / outstanding;
    let base_lgd = 1.0 - collateral_ratio.min(1.0);
    let recovery_ratio = recovery_cost / outstanding;
    let value = (base_lgd + recovery_ratio) * multiplier;

    Ok(LgdBreakdown {
        collateral_ratio,
        base_lgd,
        recovery_ratio,
        lending_type_factor: multiplier,
        value,
    })
}

/// Estimate the raw, unclamped loss given default.
pub fn estimate_lgd(exposure: &ExposureProfile) -> Result<f64, EngineError> {
    lgd_breakdown(exposure).map(|breakdown| breakdown.value)
}
