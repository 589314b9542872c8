//! Expected credit loss composition
//!
//! `ECL = PD × LGD × EAD`, turned into a ratio against an explicit
//! reporting base and classified against a threshold table.

use serde::{Deserialize, Serialize};
use types::errors::EngineError;
use types::profile::LoanContext;
use types::result::EclResult;
use types::threshold::{RiskLabel, RiskThreshold};

use crate::classify::try_classify;
use crate::validator::{require_divisor, require_finite};

/// Divisor convention for the ECL ratio
///
/// Both conventions appear in practice; neither is assumed. The threshold
/// table must be expressed in the units the chosen base produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingBase {
    /// Divide by the outstanding balance (EAD)
    #[default]
    ExposureAtDefault,
    /// Divide by the original principal
    LoanAmount,
}

impl ReportingBase {
    /// Divisor this convention selects for a loan.
    pub fn resolve(self, loan: &LoanContext) -> f64 {
        match self {
            ReportingBase::ExposureAtDefault => loan.exposure.exposure_at_default(),
            ReportingBase::LoanAmount => loan.loan_amount,
        }
    }
}

/// Combine PD, LGD and EAD into an [`EclResult`].
///
/// ```text
/// ecl_amount = pd * lgd * ead
/// ecl_ratio  = ecl_amount / reporting_base
/// risk_label = try_classify(ecl_ratio, bands), or "unknown"
/// ```
///
/// A zero `reporting_base` fails with `DivisionByZero` whatever the other
/// inputs are. Non-finite inputs fail with `InvalidInput`. An unmatched ratio
/// is labelled `"unknown"`.
pub fn compose(
    pd: f64,
    lgd: f64,
    ead: f64,
    reporting_base: f64,
    bands: &[RiskThreshold],
) -> Result<EclResult, EngineError> {
    let reporting_base = require_divisor("reporting_base", reporting_base)?;
    let pd = require_finite("pd", pd)?;
    let lgd = require_finite("lgd", lgd)?;
    let ead = require_finite("ead", ead)?;

    let ecl_amount = pd * lgd * ead;
    let ecl_ratio = ecl_amount / reporting_base;
    let (risk_label, classified) = match try_classify(ecl_ratio, bands) {
        Ok(label) => (label.clone(), true),
        Err(_) => (RiskLabel::unknown(), false),
    };

    Ok(EclResult {
        ecl_amount,
        ecl_ratio,
        pd,
        lgd,
        ead,
        risk_label,
        classified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{BorrowerId, LoanId};
    use types::profile::{BorrowerRiskProfile, ExposureProfile};
    use types::threshold::ThresholdTable;

    const REF_PD: f64 = 0.429_090_909_090_909;
    const REF_LGD: f64 = 5.0 / 9.0;

    #[test]
    fn test_reference_composition() {
        let table = ThresholdTable::default_percentage();
        let result = compose(REF_PD, REF_LGD, 45_000.0, 45_000.0, table.bands()).unwrap();
        assert!((result.ecl_amount - 10_727.27).abs() < 0.01);
        assert!((result.ecl_ratio - 0.238_383).abs() < 1e-6);
        assert_eq!(result.ead, 45_000.0);
        // Fractional ratio against percentage bands
        assert_eq!(result.risk_label.as_str(), "low");
    }

    #[test]
    fn test_reference_composition_fraction_bands() {
        let table = ThresholdTable::default_fraction();
        let result = compose(REF_PD, REF_LGD, 45_000.0, 45_000.0, table.bands()).unwrap();
        assert_eq!(result.risk_label.as_str(), "high");
    }

    #[test]
    fn test_zero_reporting_base_for_any_inputs() {
        for (pd, lgd, ead) in [(0.5, 0.5, 100.0), (0.0, 0.0, 0.0), (f64::NAN, 1.0, 1.0)] {
            let err = compose(pd, lgd, ead, 0.0, &[]).unwrap_err();
            assert_eq!(err, EngineError::division_by_zero("reporting_base"));
        }
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let err = compose(f64::INFINITY, 0.5, 100.0, 100.0, &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "pd"));
    }

    #[test]
    fn test_unmatched_ratio_is_unknown() {
        let result = compose(0.1, 0.5, 1_000.0, 1_000.0, &[]).unwrap();
        assert!(result.is_unclassified());
        assert!((result.ecl_amount - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_labelled_unknown_is_still_a_match() {
        let bands = vec![
            RiskThreshold::below(0.02, "low"),
            RiskThreshold::at_least(0.02, "unknown"),
        ];
        let result = compose(0.5, 0.5, 1_000.0, 1_000.0, &bands).unwrap();
        assert_eq!(result.risk_label.as_str(), "unknown");
        assert!(result.classified);
        assert!(!result.is_unclassified());
    }

    #[test]
    fn test_negative_pd_passes_through() {
        let result = compose(-0.1, 0.5, 1_000.0, 1_000.0, &[]).unwrap();
        assert!(result.ecl_amount < 0.0);
        assert_eq!(result.pd, -0.1);
    }

    #[test]
    fn test_reporting_base_resolution() {
        let loan = LoanContext::new(
            LoanId::new(),
            BorrowerId::new(),
            50_000.0,
            BorrowerRiskProfile::new(680.0),
            ExposureProfile::new(20_000.0, 45_000.0),
        );
        assert_eq!(ReportingBase::ExposureAtDefault.resolve(&loan), 45_000.0);
        assert_eq!(ReportingBase::LoanAmount.resolve(&loan), 50_000.0);
        assert_eq!(ReportingBase::default(), ReportingBase::ExposureAtDefault);
    }

    #[test]
    fn test_reporting_base_serde() {
        let base: ReportingBase = serde_json::from_str("\"loan_amount\"").unwrap();
        assert_eq!(base, ReportingBase::LoanAmount);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_zero_base_always_divides_by_zero(
            pd in proptest::num::f64::ANY,
            lgd in proptest::num::f64::ANY,
            ead in proptest::num::f64::ANY,
        ) {
            let err = compose(pd, lgd, ead, 0.0, &[]).unwrap_err();
            prop_assert_eq!(err, EngineError::division_by_zero("reporting_base"));
        }

        #[test]
        fn prop_ratio_against_ead_is_pd_times_lgd(
            pd in 0.0f64..2.0,
            lgd in 0.0f64..2.0,
            ead in 1.0f64..1e7,
        ) {
            let result = compose(pd, lgd, ead, ead, &[]).unwrap();
            prop_assert!((result.ecl_ratio - pd * lgd).abs() <= 1e-9 * (1.0 + pd * lgd));
        }
    }
}
