//! Types library for the expected credit loss engine
//!
//! This library provides the value objects exchanged between the risk engine
//! and its collaborators (loan data sources, threshold configuration).
//! Every type here is an immutable snapshot: built right before one
//! evaluation and discarded after it.
//!
//! # Modules
//! - `ids`: Unique identifiers (LoanId, BorrowerId)
//! - `profile`: Evaluation inputs (BorrowerRiskProfile, ExposureProfile, LoanContext, PaymentRecord)
//! - `threshold`: Risk bands and labels
//! - `result`: Evaluation outputs (EclResult and component breakdowns)
//! - `catalog`: Lending-type and industry factor lookups
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod profile;
pub mod threshold;
pub mod result;
pub mod catalog;
pub mod errors;
