//! Risk band classification
//!
//! Bands are checked in table order and the first band containing the value
//! wins. The table is neither sorted nor checked for overlap here.

use types::errors::EngineError;
use types::threshold::{RiskLabel, RiskThreshold};

/// Label of the first band containing `value`.
///
/// Fails with `Unclassified` when no band matches, including for an empty
/// table and for NaN.
pub fn try_classify(value: f64, bands: &[RiskThreshold]) -> Result<&RiskLabel, EngineError> {
    bands
        .iter()
        .find(|band| band.contains(value))
        .map(|band| &band.label)
        .ok_or(EngineError::Unclassified { value })
}

/// Tolerant classification: no match resolves to the `"unknown"` label.
pub fn classify(value: f64, bands: &[RiskThreshold]) -> RiskLabel {
    try_classify(value, bands)
        .cloned()
        .unwrap_or_else(|_| RiskLabel::unknown())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_empty_table_always_unknown(value in proptest::num::f64::ANY) {
            prop_assert!(classify(value, &[]).is_unknown());
        }

        #[test]
        fn prop_match_is_first_containing_band(
            value in -10.0f64..10.0,
            cuts in proptest::collection::vec((-10.0f64..10.0, 0.1f64..10.0), 0..8),
        ) {
            let bands: Vec<RiskThreshold> = cuts
                .iter()
                .enumerate()
                .map(|(i, (min, width))| RiskThreshold::between(*min, min + width, format!("b{i}")))
                .collect();
            let expected = bands.iter().position(|b| b.contains(value));
            let label = classify(value, &bands);
            match expected {
                Some(i) => prop_assert_eq!(label.as_str(), format!("b{i}")),
                None => prop_assert!(label.is_unknown()),
            }
        }
    }
}
