//! Probability of default
//!
//! Linear scorecard over credit score, payment history, days late,
//! industry risk and business tenure, scaled by a lending-type multiplier.
//! The result is not clamped: PD above 1 or below 0 is passed through and
//! the clamp policy is left to the caller.

use types::errors::EngineError;
use types::profile::{BorrowerRiskProfile, MAX_CREDIT_SCORE};
use types::result::PdBreakdown;

use crate::validator::{require_non_negative, require_positive};

// ── Scorecard weights ────────────────────────────────────────────────────

/// Score span mapped onto the [0, 1] base: 850 → 0, 300 → 1.
pub const CREDIT_SCORE_SPAN: f64 = 550.0;
/// Penalty per missed payment
pub const MISSED_PAYMENT_WEIGHT: f64 = 0.15;
/// Penalty per late payment
pub const LATE_PAYMENT_WEIGHT: f64 = 0.05;
/// Days late at which the due-days factor reaches its weight
pub const DUE_DAYS_HORIZON: f64 = 90.0;
pub const DUE_DAYS_WEIGHT: f64 = 0.3;
/// Tenure credit for a brand-new business
pub const EXPERIENCE_CREDIT: f64 = 0.1;
/// Tenure credit decays by 1/100 per year and vanishes at 10 years
pub const EXPERIENCE_DECAY_YEARS: f64 = 100.0;

/// Compute the PD and every component that went into it.
///
/// ```text
/// base_score        = (850 - credit_score) / 550
/// history_factor    = missed * 0.15 + late * 0.05
/// due_days_factor   = (days_late / 90) * 0.3
/// experience_factor = max(0, 0.1 - years_in_business / 100)
/// pd = (base_score + history_factor + due_days_factor
///       + industry_risk - experience_factor) * lending_type_pd_factor
/// ```
pub fn pd_breakdown(profile: &BorrowerRiskProfile) -> Result<PdBreakdown, EngineError> {
    let credit_score = require_non_negative("credit_score", profile.credit_score)?;
    let industry_risk =
        require_non_negative("industry_risk_factor", profile.industry_risk_factor)?;
    let years = require_non_negative("years_in_business", profile.years_in_business)?;
    let multiplier = require_positive("lending_type_pd_factor", profile.lending_type_pd_factor)?;

    let base_score = (MAX_CREDIT_SCORE - credit_score) / CREDIT_SCORE_SPAN;
    let history_factor = f64::from(profile.missed_payment_count) * MISSED_PAYMENT_WEIGHT
        + f64::from(profile.late_payment_count) * LATE_PAYMENT_WEIGHT;
    let due_days_factor = (f64::from(profile.days_late) / DUE_DAYS_HORIZON) * DUE_DAYS_WEIGHT;
    let experience_factor = (EXPERIENCE_CREDIT - years / EXPERIENCE_DECAY_YEARS).max(0.0);

    let value = (base_score + history_factor + due_days_factor + industry_risk
        - experience_factor)
        * multiplier;

    Ok(PdBreakdown {
        base_score,
        history_factor,
        due_days_factor,
        industry_risk,
        experience_factor,
        lending_type_factor: multiplier,
        value,
    })
}

/// Estimate the raw, unclamped probability of default.
pub fn estimate_pd(profile: &BorrowerRiskProfile) -> Result<f64, EngineError> {
    pd_breakdown(profile).map(|breakdown| breakdown.value)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_profile() -> impl Strategy<Value = BorrowerRiskProfile> {
        (
            0.0f64..=900.0,
            0u32..50,
            0u32..50,
            0u32..1_000,
            0.0f64..1.0,
            0.0f64..60.0,
            0.01f64..5.0,
        )
            .prop_map(
                |(score, missed, late, days, industry, years, factor)| BorrowerRiskProfile {
                    credit_score: score,
                    missed_payment_count: missed,
                    late_payment_count: late,
                    days_late: days,
                    industry_risk_factor: industry,
                    years_in_business: years,
                    lending_type_pd_factor: factor,
                },
            )
    }

    proptest! {
        #[test]
        fn prop_pd_is_bitwise_deterministic(profile in valid_profile()) {
            let first = estimate_pd(&profile).unwrap();
            let second = estimate_pd(&profile).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }

        #[test]
        fn prop_experience_factor_never_negative(profile in valid_profile()) {
            let b = pd_breakdown(&profile).unwrap();
            prop_assert!(b.experience_factor >= 0.0);
            prop_assert!(b.experience_factor <= EXPERIENCE_CREDIT);
        }

        #[test]
        fn prop_more_missed_payments_never_lower_pd(profile in valid_profile()) {
            let mut worse = profile;
            worse.missed_payment_count += 1;
            prop_assert!(estimate_pd(&worse).unwrap() > estimate_pd(&profile).unwrap());
        }
    }
}
