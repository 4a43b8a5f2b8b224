//! Squared-error reductions over aligned rate pairs

use log::warn;
use serde::{Deserialize, Serialize};

/// Substitute for zero rates before taking logs in the keyed evaluator
pub const BASIC_LOG_FLOOR: f64 = 1e-5;

/// Substitute for zero rates before taking logs in the per-category evaluator
pub const CATEGORY_LOG_FLOOR: f64 = 9e-6;

/// MSE, RMSE and RMSE relative to the mean actual rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub relative_rmse: f64,
}

/// Replace exact zeros with `floor`, then take the natural log in place
pub fn to_log_space(rates: &mut [f64], floor: f64) {
    for rate in rates.iter_mut() {
        if *rate == 0.0 {
            *rate = floor;
        }
        *rate = rate.ln();
    }
}

/// Mean of squared pairwise differences
///
/// Callers guarantee equal, non-zero lengths. Summation runs in slice order.
pub fn mean_squared_error(forecasted: &[f64], actual: &[f64]) -> f64 {
    debug_assert_eq!(forecasted.len(), actual.len());
    let sum: f64 = forecasted
        .iter()
        .zip(actual)
        .map(|(f, a)| (f - a).powi(2))
        .sum();
    sum / forecasted.len() as f64
}

/// All three metrics over aligned, already transformed rates
pub fn error_metrics(forecasted: &[f64], actual: &[f64]) -> ErrorMetrics {
    let mse = mean_squared_error(forecasted, actual);
    let rmse = mse.sqrt();
    let mean_actual = actual.iter().sum::<f64>() / actual.len() as f64;

    ErrorMetrics {
        mse,
        rmse,
        relative_rmse: relative_rmse(rmse, mean_actual),
    }
}

/// `rmse / mean_actual`
///
/// A zero mean is not an error: the IEEE quotient is returned as is
/// (`inf`, or `NaN` when `rmse` is also zero) and a warning is logged.
pub fn relative_rmse(rmse: f64, mean_actual: f64) -> f64 {
    if mean_actual == 0.0 {
        warn!("mean actual rate is zero; relative RMSE is not finite");
    }
    rmse / mean_actual
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_space_floors_zeros() {
        let mut rates = [0.0, 0.5, 1.0];
        to_log_space(&mut rates, BASIC_LOG_FLOOR);

        assert_relative_eq!(rates[0], (1e-5f64).ln());
        assert_relative_eq!(rates[1], (0.5f64).ln());
        assert_eq!(rates[2], 0.0);
    }

    #[test]
    fn test_error_metrics() {
        let metrics = error_metrics(&[0.1, 0.3], &[0.2, 0.2]);

        assert_relative_eq!(metrics.mse, 0.01, epsilon = 1e-12);
        assert_relative_eq!(metrics.rmse, 0.1, epsilon = 1e-12);
        assert_relative_eq!(metrics.relative_rmse, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_relative_rmse_zero_mean() {
        assert_eq!(relative_rmse(0.2, 0.0), f64::INFINITY);
        assert!(relative_rmse(0.0, 0.0).is_nan());
    }
}
