//! Error types for the credit loss engine
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Top-level engine error
///
/// `Unclassified` is non-fatal: callers that go through the tolerant
/// classification path never see it, they get the `"unknown"` label instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero: {divisor} is zero")]
    DivisionByZero { divisor: String },

    #[error("No risk band matches value {value}")]
    Unclassified { value: f64 },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl EngineError {
    /// Shorthand for an `InvalidInput` error on a named field.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a `DivisionByZero` error on a named divisor.
    pub fn division_by_zero(divisor: impl Into<String>) -> Self {
        Self::DivisionByZero {
            divisor: divisor.into(),
        }
    }
}

/// Factor lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Lending type not found: {name}")]
    UnknownLendingType { name: String },

    #[error("Industry not found: {name}")]
    UnknownIndustry { name: String },

    #[error("Duplicate catalog entry: {name}")]
    Duplicate { name: String },
}

/// Threshold table shape errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("Band {index} has no bounds")]
    Unbounded { index: usize },

    #[error("Band {index} is inverted: min {min} >= max {max}")]
    Inverted { index: usize, min: f64, max: f64 },

    #[error("Band {index} has a NaN bound")]
    NanBound { index: usize },

    #[error("Band {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("Band {index} uses the reserved label \"unknown\"")]
    ReservedLabel { index: usize },

    #[error("Bands {first} and {second} overlap")]
    Overlap { first: usize, second: usize },

    #[error("No band covers [{from}, {to})")]
    Gap { from: f64, to: f64 },
}
