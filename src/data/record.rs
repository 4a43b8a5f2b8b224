//! Fertility-rate record layouts
//!
//! Three row shapes flow through the crate:
//! - `AsfrRecord`: period ASFR, `[geo, year, age, rate]`
//! - `CohortRecord`: tri-data with birth cohort, `[geo, year, age, cohort, rate]`
//! - `CategoryRecord`: rates with one extra key column (e.g. gender),
//!   `[geo, category, year, age, rate]`

use serde::{Deserialize, Serialize};

/// Join key used by the basic evaluator
pub type GeoYearAge = (u32, i32, i32);

/// Rows that carry a geography, calendar year, age and rate
pub trait RateRecord {
    fn geo(&self) -> u32;
    fn year(&self) -> i32;
    fn age(&self) -> i32;
    fn rate(&self) -> f64;

    /// The `(geo, year, age)` join key
    fn geo_year_age(&self) -> GeoYearAge {
        (self.geo(), self.year(), self.age())
    }
}

/// Age-specific fertility rate for one geography, year and age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsfrRecord {
    pub geo: u32,
    pub year: i32,
    pub age: i32,
    pub rate: f64,
}

impl AsfrRecord {
    pub fn new(geo: u32, year: i32, age: i32, rate: f64) -> Self {
        Self { geo, year, age, rate }
    }
}

impl RateRecord for AsfrRecord {
    fn geo(&self) -> u32 {
        self.geo
    }
    fn year(&self) -> i32 {
        self.year
    }
    fn age(&self) -> i32 {
        self.age
    }
    fn rate(&self) -> f64 {
        self.rate
    }
}

/// Fertility rate additionally indexed by birth cohort
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortRecord {
    pub geo: u32,
    pub year: i32,
    pub age: i32,
    pub cohort: i32,
    pub rate: f64,
}

impl CohortRecord {
    pub fn new(geo: u32, year: i32, age: i32, cohort: i32, rate: f64) -> Self {
        Self { geo, year, age, cohort, rate }
    }
}

impl RateRecord for CohortRecord {
    fn geo(&self) -> u32 {
        self.geo
    }
    fn year(&self) -> i32 {
        self.year
    }
    fn age(&self) -> i32 {
        self.age
    }
    fn rate(&self) -> f64 {
        self.rate
    }
}

/// Key columns of a `CategoryRecord`, addressable by their column index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColumn {
    Geo,
    Category,
    Year,
    Age,
}

impl TryFrom<usize> for CategoryColumn {
    type Error = crate::Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(CategoryColumn::Geo),
            1 => Ok(CategoryColumn::Category),
            2 => Ok(CategoryColumn::Year),
            3 => Ok(CategoryColumn::Age),
            other => Err(crate::Error::InvalidFeatureIndex(other)),
        }
    }
}

/// `(geo, category, year, age)`; derived ordering sorts geo first and age fastest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey {
    pub geo: u32,
    pub category: i32,
    pub year: i32,
    pub age: i32,
}

/// Rate row with one extra leading key column such as gender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub geo: u32,
    pub category: i32,
    pub year: i32,
    pub age: i32,
    pub rate: f64,
}

impl CategoryRecord {
    pub fn new(geo: u32, category: i32, year: i32, age: i32, rate: f64) -> Self {
        Self { geo, category, year, age, rate }
    }

    pub fn key(&self) -> CategoryKey {
        CategoryKey {
            geo: self.geo,
            category: self.category,
            year: self.year,
            age: self.age,
        }
    }

    /// Value of one key column, widened so every column shares a type
    pub fn column(&self, column: CategoryColumn) -> i64 {
        match column {
            CategoryColumn::Geo => i64::from(self.geo),
            CategoryColumn::Category => i64::from(self.category),
            CategoryColumn::Year => i64::from(self.year),
            CategoryColumn::Age => i64::from(self.age),
        }
    }
}
