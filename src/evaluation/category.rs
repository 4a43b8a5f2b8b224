//! Forecast error broken down by the values of one key column
//!
//! Rows are keyed by `(geo, category, year, age)`. Both tables are sorted by
//! that key, reduced to the keys they share, then partitioned by the values
//! the forecasted table holds in the selected column. Each partition gets its
//! own MSE, RMSE and relative RMSE.

use super::metrics::{error_metrics, to_log_space, ErrorMetrics, CATEGORY_LOG_FLOOR};
use crate::data::{CategoryColumn, CategoryKey, CategoryRecord};
use crate::error::{Error, Result};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// How rows are paired inside a category once both tables are filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryAlignment {
    /// Pair the i-th forecasted row with the i-th actual row of the category.
    /// Both sides are sorted by key, so pairs line up unless a key repeats;
    /// unequal row counts or any pair whose keys differ is an error.
    #[default]
    Positional,
    /// Join rows on the full key inside each category; last actual row wins
    Keyed,
}

/// Per-category metrics, one map per metric, all sharing the same keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryErrors {
    pub mse: BTreeMap<i64, f64>,
    pub rmse: BTreeMap<i64, f64>,
    pub relative_rmse: BTreeMap<i64, f64>,
}

impl CategoryErrors {
    pub fn categories(&self) -> impl Iterator<Item = i64> + '_ {
        self.mse.keys().copied()
    }

    pub fn get(&self, category: i64) -> Option<ErrorMetrics> {
        Some(ErrorMetrics {
            mse: *self.mse.get(&category)?,
            rmse: *self.rmse.get(&category)?,
            relative_rmse: *self.relative_rmse.get(&category)?,
        })
    }

    fn insert(&mut self, category: i64, metrics: ErrorMetrics) {
        self.mse.insert(category, metrics.mse);
        self.rmse.insert(category, metrics.rmse);
        self.relative_rmse.insert(category, metrics.relative_rmse);
    }
}

/// Per-category errors with positional pairing inside each category
///
/// `feature_index` selects the column to group by: 0 geo, 1 category,
/// 2 year, 3 age. With `use_log` set, zero rates become `9e-6` before logs.
pub fn calculate_error_by_category(
    forecasted: &[CategoryRecord],
    actual: &[CategoryRecord],
    feature_index: usize,
    use_log: bool,
) -> Result<CategoryErrors> {
    calculate_error_by_category_with(
        forecasted,
        actual,
        feature_index,
        use_log,
        CategoryAlignment::Positional,
    )
}

pub fn calculate_error_by_category_with(
    forecasted: &[CategoryRecord],
    actual: &[CategoryRecord],
    feature_index: usize,
    use_log: bool,
    alignment: CategoryAlignment,
) -> Result<CategoryErrors> {
    let column = CategoryColumn::try_from(feature_index)?;

    // Stable sort keeps summation order reproducible for equal keys
    let mut forecasted = forecasted.to_vec();
    let mut actual = actual.to_vec();
    forecasted.sort_by_key(CategoryRecord::key);
    actual.sort_by_key(CategoryRecord::key);

    let forecasted_keys: HashSet<CategoryKey> = forecasted.iter().map(CategoryRecord::key).collect();
    let common: HashSet<CategoryKey> = actual
        .iter()
        .map(CategoryRecord::key)
        .filter(|key| forecasted_keys.contains(key))
        .collect();

    if common.is_empty() {
        return Err(Error::EmptyIntersection {
            key: "geo/category/year/age",
        });
    }

    forecasted.retain(|row| common.contains(&row.key()));
    actual.retain(|row| common.contains(&row.key()));

    // Categories come from the forecasted table only
    let categories: Vec<i64> = forecasted
        .iter()
        .map(|row| row.column(column))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    debug!(
        "{} shared keys, {} categories in column {:?}",
        common.len(),
        categories.len(),
        column
    );

    let per_category = categories
        .into_par_iter()
        .map(|category| -> Result<(i64, ErrorMetrics)> {
            let forecasted_rows: Vec<&CategoryRecord> =
                forecasted.iter().filter(|row| row.column(column) == category).collect();
            let actual_rows: Vec<&CategoryRecord> =
                actual.iter().filter(|row| row.column(column) == category).collect();

            let (mut forecasted_rates, mut actual_rates) = match alignment {
                CategoryAlignment::Positional => positional_rates(category, &forecasted_rows, &actual_rows)?,
                CategoryAlignment::Keyed => keyed_rates(&forecasted_rows, &actual_rows),
            };

            if use_log {
                to_log_space(&mut forecasted_rates, CATEGORY_LOG_FLOOR);
                to_log_space(&mut actual_rates, CATEGORY_LOG_FLOOR);
            }

            Ok((category, error_metrics(&forecasted_rates, &actual_rates)))
        })
        .collect::<Result<Vec<(i64, ErrorMetrics)>>>()?;

    let mut errors = CategoryErrors::default();
    for (category, metrics) in per_category {
        errors.insert(category, metrics);
    }
    Ok(errors)
}

fn positional_rates(
    category: i64,
    forecasted: &[&CategoryRecord],
    actual: &[&CategoryRecord],
) -> Result<(Vec<f64>, Vec<f64>)> {
    if forecasted.len() != actual.len() {
        return Err(Error::CategoryLengthMismatch {
            category,
            forecasted: forecasted.len(),
            actual: actual.len(),
        });
    }
    if let Some(position) = forecasted
        .iter()
        .zip(actual)
        .position(|(f, a)| f.key() != a.key())
    {
        return Err(Error::CategoryMisaligned { category, position });
    }
    Ok((
        forecasted.iter().map(|row| row.rate).collect(),
        actual.iter().map(|row| row.rate).collect(),
    ))
}

fn keyed_rates(forecasted: &[&CategoryRecord], actual: &[&CategoryRecord]) -> (Vec<f64>, Vec<f64>) {
    let lookup: HashMap<CategoryKey, f64> = actual.iter().map(|row| (row.key(), row.rate)).collect();

    forecasted
        .iter()
        .filter_map(|row| lookup.get(&row.key()).map(|&rate| (row.rate, rate)))
        .unzip()
}
