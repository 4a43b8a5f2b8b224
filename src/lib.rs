//! ASFR Eval - fertility-rate dataset preparation and forecast error evaluation
//!
//! This library provides:
//! - Parsing of raw age-specific and cohort fertility-rate files
//! - Dense geography coding with a persisted key table
//! - Train/test/final-test splits by calendar year
//! - MSE, RMSE and relative RMSE of forecasts against held-out actuals,
//!   overall or per category, optionally in log space

pub mod error;
pub mod config;
pub mod data;
pub mod split;
pub mod evaluation;

// Re-export commonly used types
pub use error::{Error, Result};
pub use config::SplitConfig;
pub use data::{AsfrRecord, CohortRecord, CategoryRecord, GeoKeyTable, RateRecord};
pub use split::{DatasetKind, SplitPlan, run_split};
pub use evaluation::{
    ErrorMetrics, CategoryErrors, CategoryAlignment,
    calculate_error, calculate_error_metrics, calculate_error_by_category,
};
