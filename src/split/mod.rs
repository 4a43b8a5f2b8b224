//! Train/test/final-test splitting of raw fertility-rate files by calendar year

mod plan;

pub use plan::{DatasetKind, SliceSpec, SplitPlan, YearRange};

use crate::config::SplitConfig;
use crate::data::{loader, write_table, GeoKeyTable, RateRecord};
use crate::error::Result;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

/// Rows kept for one slice, in input order
#[derive(Debug, Clone)]
pub struct Slice<'a, R> {
    pub spec: &'a SliceSpec,
    pub records: Vec<R>,
}

/// Apply every slice's year filter to `records`
pub fn split_records<'a, R: RateRecord + Clone>(records: &[R], plan: &'a SplitPlan) -> Vec<Slice<'a, R>> {
    plan.slices
        .iter()
        .map(|spec| Slice {
            spec,
            records: records
                .iter()
                .filter(|r| spec.years.contains(r.year()))
                .cloned()
                .collect(),
        })
        .collect()
}

/// What a split run produced
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    pub total_records: usize,
    pub dropped_records: usize,
    pub geographies: usize,
    /// Output path and row count per slice, in plan order
    pub slices: Vec<(PathBuf, usize)>,
}

/// Read the raw file, write the geography key table and every slice
pub fn run_split(config: &SplitConfig) -> Result<SplitSummary> {
    info!("reading {}", config.input_path.display());
    match config.kind {
        DatasetKind::AsfrCohort => {
            let raw = loader::read_raw_asfr(&config.input_path)?;
            write_outputs(config, &raw.records, &raw.geos, raw.dropped)
        }
        DatasetKind::TriData => {
            let raw = loader::read_raw_tri(&config.input_path)?;
            write_outputs(config, &raw.records, &raw.geos, raw.dropped)
        }
    }
}

fn write_outputs<R: RateRecord + Clone + Serialize>(
    config: &SplitConfig,
    records: &[R],
    geos: &GeoKeyTable,
    dropped: usize,
) -> Result<SplitSummary> {
    info!("{:?} data: {} records, {} dropped", config.kind, records.len(), dropped);

    geos.save(&config.geo_key_path)?;
    info!("{} geographies written to {}", geos.len(), config.geo_key_path.display());

    let plan = config.kind.plan();
    let mut slices = Vec::with_capacity(plan.slices.len());
    for slice in split_records(records, &plan) {
        let path = config.output_dir.join(&slice.spec.file_name);
        write_table(&path, &slice.records)?;
        info!("{} ({}): {} records", slice.spec.file_name, slice.spec.years, slice.records.len());
        slices.push((path, slice.records.len()));
    }

    Ok(SplitSummary {
        total_records: records.len(),
        dropped_records: dropped,
        geographies: geos.len(),
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{load_asfr_table, load_cohort_table, AsfrRecord, CohortRecord};
    use std::fs;

    fn records() -> Vec<AsfrRecord> {
        [1949, 1950, 2010, 2011, 2019, 2020, 2021, 2022, 2025, 2026]
            .iter()
            .map(|&year| AsfrRecord::new(0, year, 30, 0.1))
            .collect()
    }

    fn years(slice: &Slice<'_, AsfrRecord>) -> Vec<i32> {
        slice.records.iter().map(|r| r.year).collect()
    }

    #[test]
    fn test_split_asfr_cohort_years() {
        let plan = SplitPlan::asfr_cohort();
        let slices = split_records(&records(), &plan);

        assert_eq!(slices.len(), 6);
        assert_eq!(years(&slices[0]), vec![1950, 2010]);
        assert_eq!(years(&slices[1]), vec![2011, 2019]);
        assert_eq!(years(&slices[2]), vec![2020, 2021, 2022, 2025]);
        assert_eq!(years(&slices[3]), vec![1950, 2010, 2011, 2019, 2020, 2021]);
        assert_eq!(years(&slices[4]), vec![2022]);
        assert_eq!(years(&slices[5]), vec![2025]);
    }

    #[test]
    fn test_run_split_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("asfr")).unwrap();
        fs::write(
            dir.path().join("asfr").join("asfrTR.txt"),
            "header\nheader\nheader\n\
             ITA 2000 20 1980 0.01\n\
             ITA 2010 20 1990 0.02\n\
             FRA 2017 20 1997 0.03\n\
             FRA 2022 99 1923 0.04\n\
             FRA 2024 20 2004 0.05\n",
        )
        .unwrap();

        let config = SplitConfig::with_data_dir(DatasetKind::TriData, dir.path());
        let summary = run_split(&config).unwrap();

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.dropped_records, 1);
        assert_eq!(summary.geographies, 2);
        let counts: Vec<usize> = summary.slices.iter().map(|(_, n)| *n).collect();
        assert_eq!(counts, vec![1, 1, 1, 3, 0, 1]);

        let training = load_cohort_table(dir.path().join("asfrTR_training.txt")).unwrap();
        assert_eq!(training, vec![CohortRecord::new(0, 2000, 20, 1980, 0.01)]);

        let geos = GeoKeyTable::load(dir.path().join("geos_key.json")).unwrap();
        assert_eq!(geos.label(1), Some("FRA"));
    }

    #[test]
    fn test_run_split_overwrites_geo_key_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("asfr")).unwrap();
        fs::write(
            dir.path().join("asfr").join("asfrVH.txt"),
            "h\nh\nh\nSWE 1960 25 0.1\nNOR 1960 25 0.2\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("asfr").join("asfrTR.txt"),
            "h\nh\nh\nNOR 1960 25 1935 0.2\n",
        )
        .unwrap();

        run_split(&SplitConfig::with_data_dir(DatasetKind::AsfrCohort, dir.path())).unwrap();
        let training = load_asfr_table(dir.path().join("asfr_cohort_training.txt")).unwrap();
        assert_eq!(training[1], AsfrRecord::new(1, 1960, 25, 0.2));

        run_split(&SplitConfig::with_data_dir(DatasetKind::TriData, dir.path())).unwrap();
        let geos = GeoKeyTable::load(dir.path().join("geos_key.json")).unwrap();
        assert_eq!(geos.len(), 1);
        assert_eq!(geos.code("NOR"), Some(0));
    }
}
