//! Evaluation outputs
//!
//! Immutable value objects produced fresh per evaluation.

use serde::{Deserialize, Serialize};

use crate::threshold::RiskLabel;

/// Component values behind one PD estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdBreakdown {
    pub base_score: f64,
    pub history_factor: f64,
    pub due_days_factor: f64,
    pub industry_risk: f64,
    pub experience_factor: f64,
    pub lending_type_factor: f64,
    /// Final, unclamped PD
    pub value: f64,
}

/// Component values behind one LGD estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LgdBreakdown {
    pub collateral_ratio: f64,
    pub base_lgd: f64,
    pub recovery_ratio: f64,
    pub lending_type_factor: f64,
    /// Final, unclamped LGD
    pub value: f64,
}

/// Expected credit loss for one loan
///
/// `ecl_ratio` is `ecl_amount` divided by whichever reporting base the
/// caller passed to the composer; its units must match the threshold table.
/// `classified` is false when no band matched and `risk_label` holds the
/// `"unknown"` fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EclResult {
    /// Absolute expected loss, same currency unit as the exposure
    pub ecl_amount: f64,
    pub ecl_ratio: f64,
    pub pd: f64,
    pub lgd: f64,
    pub ead: f64,
    pub risk_label: RiskLabel,
    pub classified: bool,
}

impl EclResult {
    /// True when no threshold band matched the ratio.
    pub fn is_unclassified(&self) -> bool {
        !self.classified
    }
}
