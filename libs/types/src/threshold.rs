//! Risk bands and labels
//!
//! A band is a half-open interval `[min, max)` where either end may be open.
//! Tables are ordered; classification takes the first matching band, so the
//! order a collaborator stores bands in is significant.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ThresholdError;

/// Qualitative risk label attached to a band
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskLabel(String);

impl RiskLabel {
    /// Sentinel returned when no band matches.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RiskLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One configured risk band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThreshold {
    /// Inclusive lower bound; `None` means open below
    #[serde(default)]
    pub min: Option<f64>,
    /// Exclusive upper bound; `None` means open above
    #[serde(default)]
    pub max: Option<f64>,
    pub label: RiskLabel,
}

impl RiskThreshold {
    pub fn new(min: Option<f64>, max: Option<f64>, label: impl Into<String>) -> Self {
        Self {
            min,
            max,
            label: RiskLabel::new(label),
        }
    }

    /// Band open below: matches `value < max`.
    pub fn below(max: f64, label: impl Into<String>) -> Self {
        Self::new(None, Some(max), label)
    }

    /// Band open above: matches `value >= min`.
    pub fn at_least(min: f64, label: impl Into<String>) -> Self {
        Self::new(Some(min), None, label)
    }

    /// Fully bounded band: matches `min <= value < max`.
    pub fn between(min: f64, max: f64, label: impl Into<String>) -> Self {
        Self::new(Some(min), Some(max), label)
    }

    /// Interval membership.
    ///
    /// A band with neither bound matches nothing. NaN matches nothing.
    pub fn contains(&self, value: f64) -> bool {
        match (self.min, self.max) {
            (None, Some(max)) => value < max,
            (Some(min), None) => value >= min,
            (Some(min), Some(max)) => min <= value && value < max,
            (None, None) => false,
        }
    }

    fn lower(&self) -> f64 {
        self.min.unwrap_or(f64::NEG_INFINITY)
    }

    fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }
}

/// Ordered sequence of risk bands
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    bands: Vec<RiskThreshold>,
}

impl ThresholdTable {
    /// Wrap bands in table order. No sorting or validation is applied.
    pub fn new(bands: Vec<RiskThreshold>) -> Self {
        Self { bands }
    }

    /// low < 2, medium [2, 5), high >= 5, for ratios expressed as percentages.
    pub fn default_percentage() -> Self {
        Self::new(vec![
            RiskThreshold::below(2.0, "low"),
            RiskThreshold::between(2.0, 5.0, "medium"),
            RiskThreshold::at_least(5.0, "high"),
        ])
    }

    /// Same bands as [`Self::default_percentage`] for ratios expressed as fractions.
    pub fn default_fraction() -> Self {
        Self::new(vec![
            RiskThreshold::below(0.02, "low"),
            RiskThreshold::between(0.02, 0.05, "medium"),
            RiskThreshold::at_least(0.05, "high"),
        ])
    }

    pub fn bands(&self) -> &[RiskThreshold] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Check that the table is well-formed, non-overlapping and exhaustive
    /// over the real line. No band may use the fallback label `"unknown"`.
    ///
    /// Classification never calls this; it is for configuration sources that
    /// want to reject a table before publishing it. Returns the first problem.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (index, band) in self.bands.iter().enumerate() {
            if band.label.as_str().trim().is_empty() {
                return Err(ThresholdError::EmptyLabel { index });
            }
            if band.label.is_unknown() {
                return Err(ThresholdError::ReservedLabel { index });
            }
            if band.min.is_some_and(f64::is_nan) || band.max.is_some_and(f64::is_nan) {
                return Err(ThresholdError::NanBound { index });
            }
            match (band.min, band.max) {
                (None, None) => return Err(ThresholdError::Unbounded { index }),
                (Some(min), Some(max)) if min >= max => {
                    return Err(ThresholdError::Inverted { index, min, max });
                }
                _ => {}
            }
        }

        let mut order: Vec<usize> = (0..self.bands.len()).collect();
        order.sort_by(|&a, &b| self.bands[a].lower().total_cmp(&self.bands[b].lower()));

        // Band reaching furthest right so far: (index, upper bound)
        let mut reach: Option<(usize, f64)> = None;
        for &index in &order {
            let band = &self.bands[index];
            let (lo, hi) = (band.lower(), band.upper());
            match reach {
                None if lo > f64::NEG_INFINITY => {
                    return Err(ThresholdError::Gap {
                        from: f64::NEG_INFINITY,
                        to: lo,
                    });
                }
                None => {}
                Some((prev, prev_hi)) => {
                    if lo < prev_hi {
                        return Err(ThresholdError::Overlap {
                            first: prev.min(index),
                            second: prev.max(index),
                        });
                    }
                    if lo > prev_hi {
                        return Err(ThresholdError::Gap { from: prev_hi, to: lo });
                    }
                }
            }
            if reach.map_or(true, |(_, prev_hi)| hi > prev_hi) {
                reach = Some((index, hi));
            }
        }

        match reach {
            Some((_, hi)) if hi == f64::INFINITY => Ok(()),
            Some((_, hi)) => Err(ThresholdError::Gap {
                from: hi,
                to: f64::INFINITY,
            }),
            None => Err(ThresholdError::Gap {
                from: f64::NEG_INFINITY,
                to: f64::INFINITY,
            }),
        }
    }
}

impl From<Vec<RiskThreshold>> for ThresholdTable {
    fn from(bands: Vec<RiskThreshold>) -> Self {
        Self::new(bands)
    }
}
