//! Evaluation report
//!
//! Full record of one evaluation as handed to the host for persistence or
//! serialization. Money-facing figures are converted to `Decimal` and
//! rounded HALF_UP so every consumer sees the same digits.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::errors::EngineError;
use types::ids::{BorrowerId, LoanId};
use types::result::{EclResult, LgdBreakdown, PdBreakdown};

use crate::decision::Recommendation;
use crate::ecl::ReportingBase;
use crate::validator::require_divisor;

/// One evaluated loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EclReport {
    pub loan_id: LoanId,
    pub borrower_id: BorrowerId,
    pub reporting_base: ReportingBase,
    pub result: EclResult,
    pub pd_breakdown: PdBreakdown,
    pub lgd_breakdown: LgdBreakdown,
    /// PD or LGD was clamped into [0, 1] before composition
    pub clamped: bool,
    /// `result.ecl_amount`, rounded; `None` when outside the Decimal range
    pub ecl_amount: Option<Decimal>,
    /// `ecl_amount / loan_amount * 100`, rounded; `None` when outside the
    /// Decimal range
    pub ecl_percentage_of_principal: Option<Decimal>,
    pub recommendation: Recommendation,
}

/// `ecl_amount / loan_amount * 100`.
pub fn percentage_of_principal(ecl_amount: f64, loan_amount: f64) -> Result<f64, EngineError> {
    let loan_amount = require_divisor("loan_amount", loan_amount)?;
    Ok(ecl_amount / loan_amount * 100.0)
}

/// Convert to `Decimal` and round HALF_UP to `dp` places.
///
/// `None` for NaN, infinities and magnitudes beyond the Decimal range.
pub fn to_reported_decimal(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value).map(|decimal| round_half_up(decimal, dp))
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_principal() {
        let pct = percentage_of_principal(1_000.0, 50_000.0).unwrap();
        assert!((pct - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentage_of_zero_principal() {
        let err = percentage_of_principal(1_000.0, 0.0).unwrap_err();
        assert_eq!(err, EngineError::division_by_zero("loan_amount"));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(
            to_reported_decimal(10_727.272_727, 2),
            Some(Decimal::from_str_exact("10727.27").unwrap())
        );
        assert_eq!(to_reported_decimal(2.5, 0), Some(Decimal::from(3)));
        assert_eq!(to_reported_decimal(-2.5, 0), Some(Decimal::from(-3)));
    }

    #[test]
    fn test_unrepresentable_values() {
        assert_eq!(to_reported_decimal(f64::NAN, 2), None);
        assert_eq!(to_reported_decimal(f64::INFINITY, 2), None);
        assert_eq!(to_reported_decimal(1e35, 2), None);
    }
}
