//! Year-bounded slice definitions for each dataset variant

use std::fmt;
use std::str::FromStr;

/// Calendar years `first..=last`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub const fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    pub const fn single(year: i32) -> Self {
        Self { first: year, last: year }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.first && year <= self.last
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

/// One output file and the years it keeps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceSpec {
    pub file_name: String,
    pub years: YearRange,
}

/// Raw dataset variants, each with its own input file and slice layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Period ASFR, `country year age rate`
    AsfrCohort,
    /// Lexis-triangle data with cohort, `country year age cohort rate`
    TriData,
}

impl DatasetKind {
    pub fn raw_file_name(&self) -> &'static str {
        match self {
            DatasetKind::AsfrCohort => "asfrVH.txt",
            DatasetKind::TriData => "asfrTR.txt",
        }
    }

    /// Prefix shared by every output file of this variant
    pub fn output_prefix(&self) -> &'static str {
        match self {
            DatasetKind::AsfrCohort => "asfr_cohort_",
            DatasetKind::TriData => "asfrTR_",
        }
    }

    pub fn plan(&self) -> SplitPlan {
        match self {
            DatasetKind::AsfrCohort => SplitPlan::asfr_cohort(),
            DatasetKind::TriData => SplitPlan::tri_data(),
        }
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asfr" | "asfr-cohort" => Ok(DatasetKind::AsfrCohort),
            "tri" | "tri-data" => Ok(DatasetKind::TriData),
            other => Err(format!("unknown dataset kind '{}': expected 'asfr' or 'tri'", other)),
        }
    }
}

/// Ordered set of slices written for one dataset build
///
/// Slices within the standard and the LLM family are disjoint; the two
/// families overlap each other. Nothing here enforces disjointness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    pub slices: Vec<SliceSpec>,
}

impl SplitPlan {
    /// Training 1950-2010, test 2011-2019, final test 2020-2025, plus LLM splits
    pub fn asfr_cohort() -> Self {
        Self::standard_and_llm(
            DatasetKind::AsfrCohort.output_prefix(),
            [
                YearRange::new(1950, 2010),
                YearRange::new(2011, 2019),
                YearRange::new(2020, 2025),
            ],
        )
    }

    /// Training 1950-2005, test 2006-2015, final test 2016-2019, plus LLM splits
    pub fn tri_data() -> Self {
        Self::standard_and_llm(
            DatasetKind::TriData.output_prefix(),
            [
                YearRange::new(1950, 2005),
                YearRange::new(2006, 2015),
                YearRange::new(2016, 2019),
            ],
        )
    }

    fn standard_and_llm(prefix: &str, standard: [YearRange; 3]) -> Self {
        let llm = [
            YearRange::new(1950, 2021),
            YearRange::single(2022),
            YearRange::new(2023, 2025),
        ];
        let names = ["training", "test", "final_test"];

        let mut slices = Vec::with_capacity(6);
        for (name, years) in names.iter().zip(standard) {
            slices.push(SliceSpec {
                file_name: format!("{}{}.txt", prefix, name),
                years,
            });
        }
        for (name, years) in names.iter().zip(llm) {
            slices.push(SliceSpec {
                file_name: format!("{}{}_llm.txt", prefix, name),
                years,
            });
        }
        Self { slices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asfr_cohort_plan() {
        let plan = SplitPlan::asfr_cohort();
        let files: Vec<_> = plan.slices.iter().map(|s| s.file_name.as_str()).collect();
        assert_eq!(
            files,
            vec![
                "asfr_cohort_training.txt",
                "asfr_cohort_test.txt",
                "asfr_cohort_final_test.txt",
                "asfr_cohort_training_llm.txt",
                "asfr_cohort_test_llm.txt",
                "asfr_cohort_final_test_llm.txt",
            ]
        );
        assert_eq!(plan.slices[1].years, YearRange::new(2011, 2019));
        assert_eq!(plan.slices[4].years, YearRange::single(2022));
    }

    #[test]
    fn test_tri_data_bounds() {
        let plan = SplitPlan::tri_data();
        assert_eq!(plan.slices[0].file_name, "asfrTR_training.txt");
        assert!(plan.slices[0].years.contains(2005));
        assert!(!plan.slices[0].years.contains(2006));
        assert!(plan.slices[1].years.contains(2006));
        assert!(plan.slices[2].years.contains(2019));
        assert!(!plan.slices[2].years.contains(2020));
    }

    #[test]
    fn test_standard_slices_are_disjoint() {
        for plan in [SplitPlan::asfr_cohort(), SplitPlan::tri_data()] {
            for year in 1900..2100 {
                let hits = plan.slices[..3].iter().filter(|s| s.years.contains(year)).count();
                assert!(hits <= 1, "year {} falls into {} standard slices", year, hits);
                let hits = plan.slices[3..].iter().filter(|s| s.years.contains(year)).count();
                assert!(hits <= 1, "year {} falls into {} llm slices", year, hits);
            }
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("asfr".parse::<DatasetKind>(), Ok(DatasetKind::AsfrCohort));
        assert_eq!("tri-data".parse::<DatasetKind>(), Ok(DatasetKind::TriData));
        assert!("hmd".parse::<DatasetKind>().is_err());
        assert_eq!(YearRange::new(1950, 2010).to_string(), "1950-2010");
    }
}
