//! Loan decisioning
//!
//! Maps a risk label to the action the lending desk should take.

use serde::{Deserialize, Serialize};
use types::threshold::RiskLabel;

/// Action recommended for a classified loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    AutoApprove,
    AdditionalVerification,
    SuggestRejection,
    /// Label not recognised, including `"unknown"`
    ManualReview,
}

impl Recommendation {
    /// Recommendation for a label.
    ///
    /// Matching is case-insensitive on the first word, so `"Low risk"` and
    /// `"low"` are treated alike.
    pub fn for_label(label: &RiskLabel) -> Self {
        let level = label
            .as_str()
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match level.as_str() {
            "low" => Recommendation::AutoApprove,
            "medium" => Recommendation::AdditionalVerification,
            "high" => Recommendation::SuggestRejection,
            _ => Recommendation::ManualReview,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Recommendation::AutoApprove => "Auto-approve at standard interest rates.",
            Recommendation::AdditionalVerification => {
                "Additional verification required or consider higher interest rates."
            }
            Recommendation::SuggestRejection => {
                "Suggest rejection or consider alternative loan structure."
            }
            Recommendation::ManualReview => "Refer to manual credit review.",
        }
    }
}
