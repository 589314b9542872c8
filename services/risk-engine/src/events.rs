//! Risk event definitions
//!
//! Events emitted by the engine for loan monitoring: early warnings on
//! deteriorating loans and evaluations that fell outside every risk band.

use serde::{Deserialize, Serialize};
use types::ids::LoanId;
use uuid::Uuid;

/// Early-warning trigger levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarlyWarningLimits {
    /// Alert when days late exceeds this
    pub max_days_late: u32,
    /// Alert when ECL as a percentage of principal exceeds this
    pub max_ecl_percentage: f64,
}

impl Default for EarlyWarningLimits {
    fn default() -> Self {
        Self {
            max_days_late: 10,
            max_ecl_percentage: 5.0,
        }
    }
}

/// Why an early warning fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningReason {
    DaysLate { days: u32, limit: u32 },
    EclPercentage { percentage: f64, limit: f64 },
}

/// Risk event emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEvent {
    pub event_id: Uuid,
    pub loan_id: LoanId,
    pub event_type: RiskEventType,
    pub ecl_ratio: f64,
    pub ecl_percentage: f64,
    pub days_late: u32,
    pub timestamp: i64,
}

/// Risk event type classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RiskEventType {
    /// Loan crossed one or more early-warning limits
    EarlyWarning { reasons: Vec<WarningReason> },
    /// No threshold band matched; the loan was labelled "unknown"
    Unclassified,
}

impl RiskEvent {
    pub fn new(
        loan_id: LoanId,
        event_type: RiskEventType,
        ecl_ratio: f64,
        ecl_percentage: f64,
        days_late: u32,
        timestamp: i64,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            loan_id,
            event_type,
            ecl_ratio,
            ecl_percentage,
            days_late,
            timestamp,
        }
    }
}

/// Early-warning limits breached by a loan, in a fixed order.
///
/// Both comparisons are strict: a loan exactly at a limit does not alert.
pub fn early_warning_reasons(
    limits: &EarlyWarningLimits,
    days_late: u32,
    ecl_percentage: f64,
) -> Vec<WarningReason> {
    let mut reasons = Vec::new();
    if days_late > limits.max_days_late {
        reasons.push(WarningReason::DaysLate {
            days: days_late,
            limit: limits.max_days_late,
        });
    }
    if ecl_percentage > limits.max_ecl_percentage {
        reasons.push(WarningReason::EclPercentage {
            percentage: ecl_percentage,
            limit: limits.max_ecl_percentage,
        });
    }
    reasons
}

/// Generate monitoring events for one evaluation.
pub fn events_for_evaluation(
    loan_id: LoanId,
    limits: &EarlyWarningLimits,
    unclassified: bool,
    ecl_ratio: f64,
    ecl_percentage: f64,
    days_late: u32,
    timestamp: i64,
) -> Vec<RiskEvent> {
    let mut events = Vec::new();

    let reasons = early_warning_reasons(limits, days_late, ecl_percentage);
    if !reasons.is_empty() {
        events.push(RiskEvent::new(
            loan_id,
            RiskEventType::EarlyWarning { reasons },
            ecl_ratio,
            ecl_percentage,
            days_late,
            timestamp,
        ));
    }

    if unclassified {
        events.push(RiskEvent::new(
            loan_id,
            RiskEventType::Unclassified,
            ecl_ratio,
            ecl_percentage,
            days_late,
            timestamp,
        ));
    }

    events
}
