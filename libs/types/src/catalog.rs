//! Lending-type and industry factor lookups
//!
//! The loan data source owns these tables; the catalog is the in-memory
//! form it hands to the engine side so profiles can be built by name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CatalogError;

/// Industry name used by borrowers without a classified industry.
pub const UNCLASSIFIED_INDUSTRY: &str = "N/A";

/// PD and LGD multipliers for one lending product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingType {
    pub name: String,
    pub pd_factor: f64,
    pub lgd_factor: f64,
}

impl LendingType {
    pub fn new(name: impl Into<String>, pd_factor: f64, lgd_factor: f64) -> Self {
        Self {
            name: name.into(),
            pd_factor,
            lgd_factor,
        }
    }
}

/// External default-rate add-on for one industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub name: String,
    pub risk_factor: f64,
}

impl Industry {
    pub fn new(name: impl Into<String>, risk_factor: f64) -> Self {
        Self {
            name: name.into(),
            risk_factor,
        }
    }
}

/// Name-keyed factor tables. Names match exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorCatalog {
    lending_types: HashMap<String, LendingType>,
    industries: HashMap<String, Industry>,
}

impl FactorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lending_type(&mut self, lending_type: LendingType) -> Result<(), CatalogError> {
        if self.lending_types.contains_key(&lending_type.name) {
            return Err(CatalogError::Duplicate {
                name: lending_type.name,
            });
        }
        self.lending_types
            .insert(lending_type.name.clone(), lending_type);
        Ok(())
    }

    pub fn add_industry(&mut self, industry: Industry) -> Result<(), CatalogError> {
        if self.industries.contains_key(&industry.name) {
            return Err(CatalogError::Duplicate {
                name: industry.name,
            });
        }
        self.industries.insert(industry.name.clone(), industry);
        Ok(())
    }

    pub fn lending_type(&self, name: &str) -> Result<&LendingType, CatalogError> {
        self.lending_types
            .get(name)
            .ok_or_else(|| CatalogError::UnknownLendingType {
                name: name.to_string(),
            })
    }

    /// Strict industry lookup.
    pub fn industry_risk(&self, name: &str) -> Result<f64, CatalogError> {
        self.industries
            .get(name)
            .map(|industry| industry.risk_factor)
            .ok_or_else(|| CatalogError::UnknownIndustry {
                name: name.to_string(),
            })
    }

    /// Lenient industry lookup: unclassified or unknown industries carry no add-on.
    pub fn industry_risk_or_default(&self, name: &str) -> f64 {
        if name == UNCLASSIFIED_INDUSTRY {
            return 0.0;
        }
        self.industry_risk(name).unwrap_or(0.0)
    }
}
