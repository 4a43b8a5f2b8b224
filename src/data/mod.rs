//! Fertility-rate records, geography coding and table IO

mod record;
mod geo;
pub mod loader;

pub use record::{
    AsfrRecord, CohortRecord, CategoryRecord, CategoryColumn, CategoryKey, GeoYearAge, RateRecord,
};
pub use geo::{GeoKeyTable, GeoKeyEntry};
pub use loader::{
    RawDataset, read_raw_asfr, read_raw_tri, write_table,
    load_asfr_table, load_cohort_table, load_category_table,
};
