//! ASFR Eval CLI
//!
//! Compares a forecasted rate table against held-out actual rates.
//!
//! Usage:
//!   asfr_eval --forecast forecast.txt --actual data/asfr_cohort_test.txt [--log] [--json]
//!   asfr_eval --forecast f.txt --actual a.txt --by-category 1 [--keyed]

use anyhow::{Context, Result};
use asfr_eval::data::{load_asfr_table, load_category_table, load_cohort_table};
use asfr_eval::evaluation::{
    calculate_error_by_category_with, calculate_error_metrics, CategoryAlignment, CategoryErrors,
    ErrorMetrics,
};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

/// Column layout of the two tables when no category breakdown is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TableLayout {
    /// geo year age rate
    Asfr,
    /// geo year age cohort rate
    Cohort,
}

#[derive(Parser)]
#[command(name = "asfr_eval")]
#[command(about = "Forecast error of fertility rates against held-out actuals", long_about = None)]
struct Cli {
    /// Forecasted rate table
    #[arg(long)]
    forecast: PathBuf,

    /// Actual rate table
    #[arg(long)]
    actual: PathBuf,

    /// Compare natural logs of rates, flooring zeros first
    #[arg(long)]
    log: bool,

    /// Column layout for the overall comparison
    #[arg(long, value_enum, default_value = "asfr")]
    layout: TableLayout,

    /// Break errors down by key column (0 geo, 1 category, 2 year, 3 age);
    /// both tables must be `geo category year age rate`
    #[arg(long)]
    by_category: Option<usize>,

    /// Pair rows inside each category by key instead of by position
    #[arg(long, requires = "by_category")]
    keyed: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Report {
    Overall(ErrorMetrics),
    ByCategory(CategoryErrors),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let report = match cli.by_category {
        Some(feature_index) => {
            let forecasted = load_category_table(&cli.forecast)
                .with_context(|| format!("loading {}", cli.forecast.display()))?;
            let actual = load_category_table(&cli.actual)
                .with_context(|| format!("loading {}", cli.actual.display()))?;
            info!("{} forecasted rows, {} actual rows", forecasted.len(), actual.len());

            let alignment = if cli.keyed {
                CategoryAlignment::Keyed
            } else {
                CategoryAlignment::Positional
            };
            Report::ByCategory(calculate_error_by_category_with(
                &forecasted,
                &actual,
                feature_index,
                cli.log,
                alignment,
            )?)
        }
        None => Report::Overall(overall_metrics(&cli)?),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report {
        Report::Overall(metrics) => {
            println!("MSE:   {:.10}", metrics.mse);
            println!("RMSE:  {:.10}", metrics.rmse);
            println!("rRMSE: {:.10}", metrics.relative_rmse);
        }
        Report::ByCategory(errors) => {
            println!("{:>10} {:>16} {:>16} {:>16}", "Category", "MSE", "RMSE", "rRMSE");
            println!("{}", "-".repeat(61));
            for category in errors.categories() {
                println!(
                    "{:>10} {:>16.10} {:>16.10} {:>16.10}",
                    category,
                    errors.mse[&category],
                    errors.rmse[&category],
                    errors.relative_rmse[&category],
                );
            }
        }
    }

    Ok(())
}

fn overall_metrics(cli: &Cli) -> Result<ErrorMetrics> {
    let context = |path: &PathBuf| format!("loading {}", path.display());

    let metrics = match cli.layout {
        TableLayout::Asfr => {
            let forecasted = load_asfr_table(&cli.forecast).with_context(|| context(&cli.forecast))?;
            let actual = load_asfr_table(&cli.actual).with_context(|| context(&cli.actual))?;
            info!("{} forecasted rows, {} actual rows", forecasted.len(), actual.len());
            calculate_error_metrics(&forecasted, &actual, cli.log)?
        }
        TableLayout::Cohort => {
            let forecasted = load_cohort_table(&cli.forecast).with_context(|| context(&cli.forecast))?;
            let actual = load_cohort_table(&cli.actual).with_context(|| context(&cli.actual))?;
            info!("{} forecasted rows, {} actual rows", forecasted.len(), actual.len());
            calculate_error_metrics(&forecasted, &actual, cli.log)?
        }
    };
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_keyed_requires_by_category() {
        let result = Cli::try_parse_from(["asfr_eval", "--forecast", "f.txt", "--actual", "a.txt", "--keyed"]);
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::MissingRequiredArgument));

        let cli = Cli::try_parse_from([
            "asfr_eval",
            "--forecast",
            "f.txt",
            "--actual",
            "a.txt",
            "--by-category",
            "1",
            "--keyed",
        ])
        .unwrap();
        assert!(cli.keyed);
        assert_eq!(cli.by_category, Some(1));
    }
}
