//! Expected Credit Loss Engine
//!
//! Estimates expected credit loss for a loan from three sub-estimates:
//! - probability of default (`pd`)
//! - loss given default (`lgd`)
//! - exposure at default, the outstanding balance
//!
//! and classifies the resulting loss ratio into a configured risk band
//! (`classify`). The estimators and the composer are pure functions of
//! their inputs; `engine` adds the shared threshold table, clamp policy,
//! decisioning and monitoring events on top.

pub mod validator;
pub mod pd;
pub mod lgd;
pub mod classify;
pub mod ecl;
pub mod store;
pub mod decision;
pub mod report;
pub mod events;
pub mod portfolio;
pub mod config;
pub mod engine;

pub use classify::{classify, try_classify};
pub use config::{ClampPolicy, ConfigError, EngineConfig};
pub use ecl::{compose, ReportingBase};
pub use engine::EclEngine;
pub use lgd::{estimate_lgd, lgd_breakdown};
pub use pd::{estimate_pd, pd_breakdown};
