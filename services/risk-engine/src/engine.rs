//! ECL engine orchestrator
//!
//! Ties together the estimators, the composer, the shared threshold table,
//! decisioning and monitoring events. The engine holds no per-loan state;
//! one instance can be shared across threads and evaluate loans in parallel.

use std::sync::Arc;

use tracing::{debug, warn};
use types::errors::{EngineError, ThresholdError};
use types::profile::LoanContext;
use types::result::EclResult;
use types::threshold::ThresholdTable;

use crate::config::EngineConfig;
use crate::decision::Recommendation;
use crate::ecl;
use crate::events::{self, RiskEvent};
use crate::lgd;
use crate::pd;
use crate::portfolio::{self, BorrowerSummary, PortfolioSummary};
use crate::report::{self, EclReport};
use crate::store::ThresholdStore;
use crate::validator::require_positive;

/// ECL engine service
#[derive(Debug)]
pub struct EclEngine {
    config: EngineConfig,
    thresholds: ThresholdStore,
}

impl EclEngine {
    /// Create a new engine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new engine with custom configuration
    ///
    /// `config.thresholds` becomes the initial table of the store.
    pub fn with_config(config: EngineConfig) -> Self {
        let thresholds = ThresholdStore::new(config.thresholds.clone());
        Self { config, thresholds }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Threshold table currently in effect.
    pub fn thresholds(&self) -> Arc<ThresholdTable> {
        self.thresholds.snapshot()
    }

    /// Swap in a new threshold table, unchecked.
    pub fn replace_thresholds(&self, table: ThresholdTable) -> Arc<ThresholdTable> {
        self.thresholds.replace(table)
    }

    /// Swap in a new threshold table if it is well-formed and exhaustive.
    pub fn replace_thresholds_validated(
        &self,
        table: ThresholdTable,
    ) -> Result<Arc<ThresholdTable>, ThresholdError> {
        self.thresholds.replace_validated(table)
    }

    /// Compose against the current threshold table.
    pub fn compose(
        &self,
        pd: f64,
        lgd: f64,
        ead: f64,
        reporting_base: f64,
    ) -> Result<EclResult, EngineError> {
        let table = self.thresholds.snapshot();
        ecl::compose(pd, lgd, ead, reporting_base, table.bands())
    }

    /// Full evaluation of one loan.
    ///
    /// The configured clamp policy applies between estimation and
    /// composition; the breakdowns in the report always hold the raw values.
    pub fn evaluate(&self, loan: &LoanContext) -> Result<EclReport, EngineError> {
        self.evaluate_loan(loan).map(|(report, _)| report)
    }

    /// Evaluate and generate monitoring events.
    pub fn evaluate_with_events(
        &self,
        loan: &LoanContext,
        timestamp: i64,
    ) -> Result<(EclReport, Vec<RiskEvent>), EngineError> {
        let (report, percentage) = self.evaluate_loan(loan)?;

        let risk_events = events::events_for_evaluation(
            loan.loan_id,
            &self.config.early_warning,
            report.result.is_unclassified(),
            report.result.ecl_ratio,
            percentage,
            loan.borrower.days_late,
            timestamp,
        );
        for event in &risk_events {
            if let events::RiskEventType::EarlyWarning { reasons } = &event.event_type {
                warn!(loan_id = %loan.loan_id, ?reasons, "early warning raised");
            }
        }

        Ok((report, risk_events))
    }

    /// Report plus the unrounded percentage of principal.
    fn evaluate_loan(&self, loan: &LoanContext) -> Result<(EclReport, f64), EngineError> {
        let loan_amount = require_positive("loan_amount", loan.loan_amount)?;
        let pd_breakdown = pd::pd_breakdown(&loan.borrower)?;
        let lgd_breakdown = lgd::lgd_breakdown(&loan.exposure)?;

        let (pd, pd_clamped) = self.config.clamp_policy.apply(pd_breakdown.value);
        let (lgd, lgd_clamped) = self.config.clamp_policy.apply(lgd_breakdown.value);

        let ead = loan.exposure.exposure_at_default();
        let reporting_base = self.config.reporting_base.resolve(loan);

        let table = self.thresholds.snapshot();
        let result = ecl::compose(pd, lgd, ead, reporting_base, table.bands())?;

        let percentage = report::percentage_of_principal(result.ecl_amount, loan_amount)?;
        let dp = self.config.report_decimal_places;
        let ecl_amount = report::to_reported_decimal(result.ecl_amount, dp);
        let ecl_percentage_of_principal = report::to_reported_decimal(percentage, dp);
        if ecl_amount.is_none() || ecl_percentage_of_principal.is_none() {
            warn!(
                loan_id = %loan.loan_id,
                ecl_amount = result.ecl_amount,
                percentage,
                "figure outside decimal range, reported as null"
            );
        }

        let recommendation = if result.classified {
            Recommendation::for_label(&result.risk_label)
        } else {
            Recommendation::ManualReview
        };

        debug!(
            loan_id = %loan.loan_id,
            borrower_id = %loan.borrower_id,
            pd,
            lgd,
            ead,
            ecl_ratio = result.ecl_ratio,
            risk_label = %result.risk_label,
            "loan evaluated"
        );
        if result.is_unclassified() {
            warn!(
                loan_id = %loan.loan_id,
                ecl_ratio = result.ecl_ratio,
                bands = table.len(),
                "no risk band matched, labelled unknown"
            );
        }

        let report = EclReport {
            loan_id: loan.loan_id,
            borrower_id: loan.borrower_id,
            reporting_base: self.config.reporting_base,
            result,
            pd_breakdown,
            lgd_breakdown,
            clamped: pd_clamped || lgd_clamped,
            ecl_amount,
            ecl_percentage_of_principal,
            recommendation,
        };
        Ok((report, percentage))
    }

    /// Evaluate many loans; one failure does not stop the rest.
    pub fn evaluate_batch(&self, loans: &[LoanContext]) -> Vec<Result<EclReport, EngineError>> {
        loans.iter().map(|loan| self.evaluate(loan)).collect()
    }

    /// Book-level summary of successful evaluations.
    pub fn summarize<'a, I>(reports: I) -> PortfolioSummary
    where
        I: IntoIterator<Item = &'a EclReport>,
    {
        PortfolioSummary::from_results(reports.into_iter().map(|report| &report.result))
    }

    /// Per-borrower loan counts and average ECL.
    pub fn summarize_by_borrower<'a, I>(reports: I) -> Vec<BorrowerSummary>
    where
        I: IntoIterator<Item = &'a EclReport>,
    {
        portfolio::borrower_summaries(reports)
    }
}

impl Default for EclEngine {
    fn default() -> Self {
        Self::new()
    }
}
