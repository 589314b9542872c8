//! Evaluation inputs
//!
//! Snapshots supplied by the loan data source. Counts and day totals are
//! unsigned so negative values are rejected at the deserialization boundary;
//! the remaining numeric contracts are checked by the estimators.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::LendingType;
use crate::errors::EngineError;
use crate::ids::{BorrowerId, LoanId};

/// Upper end of the credit score scale.
pub const MAX_CREDIT_SCORE: f64 = 850.0;

/// A late payment more than this many days overdue counts as missed.
pub const MISSED_PAYMENT_DAYS: u32 = 90;

/// Settlement state of one scheduled payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Late,
}

/// One payment from the borrower's repayment history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub status: PaymentStatus,
    /// Days overdue; only meaningful for late payments
    #[serde(default)]
    pub days_late: u32,
}

impl PaymentRecord {
    pub fn paid() -> Self {
        Self {
            status: PaymentStatus::Paid,
            days_late: 0,
        }
    }

    pub fn late(days_late: u32) -> Self {
        Self {
            status: PaymentStatus::Late,
            days_late,
        }
    }

    pub fn is_late(&self) -> bool {
        self.status == PaymentStatus::Late
    }

    /// Late by more than [`MISSED_PAYMENT_DAYS`].
    pub fn is_missed(&self) -> bool {
        self.is_late() && self.days_late > MISSED_PAYMENT_DAYS
    }
}

/// Borrower attributes that drive probability of default
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorrowerRiskProfile {
    /// Bureau score, nominally 0–850. Scores above 850 are accepted.
    pub credit_score: f64,
    /// Payments missed outright
    pub missed_payment_count: u32,
    /// Payments made late
    pub late_payment_count: u32,
    /// Days since the oldest unresolved late payment, or the total days
    /// overdue when built with [`Self::with_payment_records`]
    pub days_late: u32,
    /// External industry risk rate
    pub industry_risk_factor: f64,
    pub years_in_business: f64,
    /// Lending-type PD multiplier, must be > 0
    pub lending_type_pd_factor: f64,
}

impl BorrowerRiskProfile {
    /// Profile with no payment history, no industry risk and a unit multiplier.
    pub fn new(credit_score: f64) -> Self {
        Self {
            credit_score,
            missed_payment_count: 0,
            late_payment_count: 0,
            days_late: 0,
            industry_risk_factor: 0.0,
            years_in_business: 0.0,
            lending_type_pd_factor: 1.0,
        }
    }

    pub fn with_payment_history(mut self, missed: u32, late: u32, days_late: u32) -> Self {
        self.missed_payment_count = missed;
        self.late_payment_count = late;
        self.days_late = days_late;
        self
    }

    /// Derive payment history from repayment records.
    ///
    /// Only late payments count. `late_payment_count` is the number of late
    /// payments, `missed_payment_count` the subset more than
    /// [`MISSED_PAYMENT_DAYS`] overdue, and `days_late` the total of their
    /// days overdue (saturating). Missed payments are counted in both
    /// totals. Paid records are ignored.
    pub fn with_payment_records(self, records: &[PaymentRecord]) -> Self {
        let late = records.iter().filter(|record| record.is_late());
        let late_count = late.clone().count();
        let missed_count = late.clone().filter(|record| record.is_missed()).count();
        let days_late = late.fold(0u32, |total, record| total.saturating_add(record.days_late));

        self.with_payment_history(
            u32::try_from(missed_count).unwrap_or(u32::MAX),
            u32::try_from(late_count).unwrap_or(u32::MAX),
            days_late,
        )
    }

    pub fn with_industry_risk(mut self, industry_risk_factor: f64) -> Self {
        self.industry_risk_factor = industry_risk_factor;
        self
    }

    pub fn with_years_in_business(mut self, years: f64) -> Self {
        self.years_in_business = years;
        self
    }

    /// Take the PD multiplier from a lending type.
    pub fn with_lending_type(mut self, lending_type: &LendingType) -> Self {
        self.lending_type_pd_factor = lending_type.pd_factor;
        self
    }
}

/// Loan exposure attributes that drive loss given default
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureProfile {
    pub collateral_value: f64,
    /// Current exposure; also the EAD. Must be > 0.
    pub outstanding_balance: f64,
    pub recovery_cost: f64,
    /// Lending-type LGD multiplier, must be > 0
    pub lending_type_lgd_factor: f64,
}

impl ExposureProfile {
    pub fn new(collateral_value: f64, outstanding_balance: f64) -> Self {
        Self {
            collateral_value,
            outstanding_balance,
            recovery_cost: 0.0,
            lending_type_lgd_factor: 1.0,
        }
    }

    pub fn with_recovery_cost(mut self, recovery_cost: f64) -> Self {
        self.recovery_cost = recovery_cost;
        self
    }

    /// Take the LGD multiplier from a lending type.
    pub fn with_lending_type(mut self, lending_type: &LendingType) -> Self {
        self.lending_type_lgd_factor = lending_type.lgd_factor;
        self
    }

    /// Exposure at default is the outstanding balance.
    pub fn exposure_at_default(&self) -> f64 {
        self.outstanding_balance
    }
}

/// Everything needed to evaluate one loan
///
/// `loan_amount` is the original principal and `exposure.outstanding_balance`
/// the current exposure; they are supplied independently and may differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanContext {
    pub loan_id: LoanId,
    pub borrower_id: BorrowerId,
    /// Original principal, must be > 0
    pub loan_amount: f64,
    pub borrower: BorrowerRiskProfile,
    pub exposure: ExposureProfile,
}

impl LoanContext {
    pub fn new(
        loan_id: LoanId,
        borrower_id: BorrowerId,
        loan_amount: f64,
        borrower: BorrowerRiskProfile,
        exposure: ExposureProfile,
    ) -> Self {
        Self {
            loan_id,
            borrower_id,
            loan_amount,
            borrower,
            exposure,
        }
    }
}

/// Complete calendar years between an establishment date and `as_of`.
///
/// A year only counts once its anniversary has been reached.
/// Fails with `InvalidInput` when `as_of` precedes `established`.
pub fn years_in_business(established: NaiveDate, as_of: NaiveDate) -> Result<f64, EngineError> {
    if as_of < established {
        return Err(EngineError::invalid(
            "established",
            format!("establishment date {established} is after {as_of}"),
        ));
    }

    let mut years = as_of.year() - established.year();
    if (as_of.month(), as_of.day()) < (established.month(), established.day()) {
        years -= 1;
    }
    Ok(f64::from(years))
}
