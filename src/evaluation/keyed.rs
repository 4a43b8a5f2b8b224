//! Forecast error over rows joined on `(geo, year, age)`
//!
//! The actual table becomes a lookup keyed by `(geo, year, age)`. When the
//! actual table repeats a key the last row wins; duplicates are not treated
//! as an error. Forecasted rows without a matching key are skipped, so a
//! forecast may cover only part of the actual table.

use super::metrics::{error_metrics, mean_squared_error, to_log_space, ErrorMetrics, BASIC_LOG_FLOOR};
use crate::data::{GeoYearAge, RateRecord};
use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;

/// Mean squared error between forecasted and actual rates on shared keys
///
/// With `use_log` set, zero rates in either series become `1e-5` and every
/// rate is replaced by its natural log before differencing.
pub fn calculate_error<F, A>(forecasted: &[F], actual: &[A], use_log: bool) -> Result<f64>
where
    F: RateRecord,
    A: RateRecord,
{
    let (forecasted_rates, actual_rates) = aligned_rates(forecasted, actual, use_log)?;
    Ok(mean_squared_error(&forecasted_rates, &actual_rates))
}

/// MSE, RMSE and relative RMSE over the same join as `calculate_error`
pub fn calculate_error_metrics<F, A>(forecasted: &[F], actual: &[A], use_log: bool) -> Result<ErrorMetrics>
where
    F: RateRecord,
    A: RateRecord,
{
    let (forecasted_rates, actual_rates) = aligned_rates(forecasted, actual, use_log)?;
    Ok(error_metrics(&forecasted_rates, &actual_rates))
}

/// Matched rate pairs in forecasted order, optionally moved to log space
fn aligned_rates<F, A>(forecasted: &[F], actual: &[A], use_log: bool) -> Result<(Vec<f64>, Vec<f64>)>
where
    F: RateRecord,
    A: RateRecord,
{
    let lookup: HashMap<GeoYearAge, f64> = actual
        .iter()
        .map(|row| (row.geo_year_age(), row.rate()))
        .collect();

    let mut forecasted_rates = Vec::new();
    let mut actual_rates = Vec::new();
    for row in forecasted {
        if let Some(&rate) = lookup.get(&row.geo_year_age()) {
            forecasted_rates.push(row.rate());
            actual_rates.push(rate);
        }
    }

    if forecasted_rates.is_empty() {
        return Err(Error::EmptyIntersection { key: "geo/year/age" });
    }
    debug!(
        "matched {} of {} forecasted rows against {} actual keys",
        forecasted_rates.len(),
        forecasted.len(),
        lookup.len()
    );

    if use_log {
        to_log_space(&mut forecasted_rates, BASIC_LOG_FLOOR);
        to_log_space(&mut actual_rates, BASIC_LOG_FLOOR);
    }

    Ok((forecasted_rates, actual_rates))
}
