//! Portfolio aggregation
//!
//! Roll-up of many evaluations into book-level and per-borrower figures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use types::ids::BorrowerId;
use types::result::EclResult;

use crate::report::EclReport;

/// Book-level ECL figures
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub loan_count: usize,
    /// Σ ecl_amount
    pub total_ecl: f64,
    /// Σ ead
    pub total_ead: f64,
    /// Unweighted mean of ecl_ratio; `None` for an empty book
    pub average_ecl_ratio: Option<f64>,
    /// total_ecl / total_ead; `None` when total_ead is zero
    pub exposure_weighted_ratio: Option<f64>,
    /// Loans per risk label
    pub label_counts: BTreeMap<String, usize>,
}

impl PortfolioSummary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a EclResult>,
    {
        let mut summary = Self::default();
        let mut ratio_sum = 0.0;

        for result in results {
            summary.loan_count += 1;
            summary.total_ecl += result.ecl_amount;
            summary.total_ead += result.ead;
            ratio_sum += result.ecl_ratio;
            *summary
                .label_counts
                .entry(result.risk_label.as_str().to_string())
                .or_insert(0) += 1;
        }

        if summary.loan_count > 0 {
            summary.average_ecl_ratio = Some(ratio_sum / summary.loan_count as f64);
        }
        if summary.total_ead != 0.0 {
            summary.exposure_weighted_ratio = Some(summary.total_ecl / summary.total_ead);
        }
        summary
    }

    pub fn count_for(&self, label: &str) -> usize {
        self.label_counts.get(label).copied().unwrap_or(0)
    }
}

/// ECL figures for one borrower's loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerSummary {
    pub borrower_id: BorrowerId,
    pub loan_count: usize,
    pub total_ecl: f64,
    /// total_ecl / loan_count
    pub average_ecl: f64,
}

/// Group reports by borrower, ordered by borrower id.
pub fn borrower_summaries<'a, I>(reports: I) -> Vec<BorrowerSummary>
where
    I: IntoIterator<Item = &'a EclReport>,
{
    let mut totals: BTreeMap<BorrowerId, (usize, f64)> = BTreeMap::new();
    for report in reports {
        let entry = totals.entry(report.borrower_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += report.result.ecl_amount;
    }

    totals
        .into_iter()
        .map(|(borrower_id, (loan_count, total_ecl))| BorrowerSummary {
            borrower_id,
            loan_count,
            total_ecl,
            average_ecl: total_ecl / loan_count as f64,
        })
        .collect()
}
