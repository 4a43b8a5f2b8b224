//! Error types for dataset preparation and error evaluation

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading, splitting or evaluating rate tables
#[derive(Error, Debug)]
pub enum Error {
    /// Forecasted and actual tables share no joinable key
    #[error("no common {key} combinations found between forecasted and actual data")]
    EmptyIntersection { key: &'static str },

    /// Category selector does not point at one of the four key columns
    #[error("invalid feature index {0}: expected 0 (geo), 1 (category), 2 (year) or 3 (age)")]
    InvalidFeatureIndex(usize),

    /// Positional comparison inside a category would pair unequal row counts
    #[error("category {category}: {forecasted} forecasted rows but {actual} actual rows")]
    CategoryLengthMismatch {
        category: i64,
        forecasted: usize,
        actual: usize,
    },

    /// Positional comparison inside a category would pair rows with different keys
    #[error("category {category}: forecasted and actual rows differ in key at position {position}")]
    CategoryMisaligned { category: i64, position: usize },

    /// Persisted geography key table is not a dense, duplicate-free code list
    #[error("invalid geography key table: {0}")]
    InvalidGeoKeyTable(String),

    /// Input row that cannot be silently dropped
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::EmptyIntersection { key: "geo/year/age" };
        assert_eq!(
            err.to_string(),
            "no common geo/year/age combinations found between forecasted and actual data"
        );

        let err = Error::CategoryLengthMismatch {
            category: 2,
            forecasted: 3,
            actual: 4,
        };
        assert_eq!(err.to_string(), "category 2: 3 forecasted rows but 4 actual rows");

        let err = Error::CategoryMisaligned { category: 0, position: 1 };
        assert_eq!(
            err.to_string(),
            "category 0: forecasted and actual rows differ in key at position 1"
        );

        let err = Error::parse(7, "expected 4 fields, got 3");
        assert_eq!(err.to_string(), "line 7: expected 4 fields, got 3");
    }
}
