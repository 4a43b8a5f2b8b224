//! Forecast error evaluation against held-out actual rates
//!
//! Two evaluators share the metric helpers:
//! - `calculate_error` / `calculate_error_metrics`: join on `(geo, year, age)`
//!   through a lookup built from the actual table, floor `1e-5` in log mode
//! - `calculate_error_by_category`: sort, intersect on
//!   `(geo, category, year, age)`, then one set of metrics per value of a
//!   chosen key column, floor `9e-6` in log mode
//!
//! Both evaluators fail with `Error::EmptyIntersection` when the tables share
//! no key. Neither performs IO.

mod metrics;
mod keyed;
mod category;

pub use metrics::{
    ErrorMetrics, error_metrics, mean_squared_error, relative_rmse, to_log_space,
    BASIC_LOG_FLOOR, CATEGORY_LOG_FLOOR,
};
pub use keyed::{calculate_error, calculate_error_metrics};
pub use category::{
    CategoryAlignment, CategoryErrors, calculate_error_by_category, calculate_error_by_category_with,
};
