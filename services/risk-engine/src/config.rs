//! Engine configuration
//!
//! Loaded from JSON. Every field has a default, so a partial document only
//! overrides what it names:
//!
//! ```json
//! {
//!   "reporting_base": "loan_amount",
//!   "clamp_policy": "raw",
//!   "early_warning": { "max_days_late": 10, "max_ecl_percentage": 5.0 },
//!   "report_decimal_places": 2,
//!   "thresholds": [
//!     { "min": null, "max": 2.0, "label": "low" },
//!     { "min": 2.0, "max": 5.0, "label": "medium" },
//!     { "min": 5.0, "max": null, "label": "high" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use types::errors::ThresholdError;
use types::threshold::ThresholdTable;

use crate::ecl::ReportingBase;
use crate::events::EarlyWarningLimits;

/// Largest scale `rust_decimal` can hold.
const MAX_DECIMAL_PLACES: u32 = 28;

/// Configuration load errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid threshold table: {0}")]
    Thresholds(#[from] ThresholdError),

    #[error("Invalid config {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// What to do with PD and LGD outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// Pass estimates through unmodified
    #[default]
    Raw,
    /// Clamp PD and LGD into [0, 1] before composition
    UnitInterval,
}

impl ClampPolicy {
    /// Apply the policy; the flag reports whether the value changed.
    pub fn apply(self, value: f64) -> (f64, bool) {
        match self {
            ClampPolicy::Raw => (value, false),
            ClampPolicy::UnitInterval => {
                let clamped = value.clamp(0.0, 1.0);
                (clamped, clamped != value)
            }
        }
    }
}

/// Risk engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Divisor for the ECL ratio
    pub reporting_base: ReportingBase,
    pub clamp_policy: ClampPolicy,
    pub early_warning: EarlyWarningLimits,
    /// Scale of the Decimal figures in reports
    pub report_decimal_places: u32,
    /// Initial threshold table, in the units `reporting_base` produces
    pub thresholds: ThresholdTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reporting_base: ReportingBase::ExposureAtDefault,
            clamp_policy: ClampPolicy::Raw,
            early_warning: EarlyWarningLimits::default(),
            report_decimal_places: 2,
            thresholds: ThresholdTable::default_fraction(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            reporting_base = ?config.reporting_base,
            clamp_policy = ?config.clamp_policy,
            bands = config.thresholds.len(),
            "engine config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;

        if self.report_decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::Invalid {
                field: "report_decimal_places".to_string(),
                reason: format!(
                    "must be <= {MAX_DECIMAL_PLACES}, got {}",
                    self.report_decimal_places
                ),
            });
        }

        let pct = self.early_warning.max_ecl_percentage;
        if !pct.is_finite() || pct < 0.0 {
            return Err(ConfigError::Invalid {
                field: "early_warning.max_ecl_percentage".to_string(),
                reason: format!("must be a finite value >= 0, got {pct}"),
            });
        }

        Ok(())
    }
}
