//! Paths used by the dataset splitter
//!
//! Defaults mirror the on-disk layout `<data_dir>/asfr/<raw file>` for input
//! and `<data_dir>/` for split outputs and the geography key table.
//! `ASFR_DATA_DIR` overrides the data directory.

use crate::split::DatasetKind;
use std::env;
use std::path::PathBuf;

/// Default data directory when `ASFR_DATA_DIR` is unset
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name of the geography key table, shared by every dataset build
pub const GEO_KEY_FILE: &str = "geos_key.json";

#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    pub kind: DatasetKind,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub geo_key_path: PathBuf,
}

impl SplitConfig {
    /// Build the layout rooted at `data_dir`
    pub fn with_data_dir(kind: DatasetKind, data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            kind,
            input_path: data_dir.join("asfr").join(kind.raw_file_name()),
            geo_key_path: data_dir.join(GEO_KEY_FILE),
            output_dir: data_dir,
        }
    }

    /// Build the layout from `ASFR_DATA_DIR`, falling back to `data`
    pub fn from_env(kind: DatasetKind) -> Self {
        let data_dir = env::var("ASFR_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::with_data_dir(kind, data_dir)
    }

    /// Read from a different raw file, keeping the output layout
    pub fn with_input(mut self, input_path: impl Into<PathBuf>) -> Self {
        self.input_path = input_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_layout_from_data_dir() {
        let config = SplitConfig::with_data_dir(DatasetKind::TriData, "/srv/hfd");

        assert_eq!(config.input_path, Path::new("/srv/hfd/asfr/asfrTR.txt"));
        assert_eq!(config.output_dir, Path::new("/srv/hfd"));
        assert_eq!(config.geo_key_path, Path::new("/srv/hfd/geos_key.json"));
    }

    #[test]
    fn test_input_override() {
        let config = SplitConfig::with_data_dir(DatasetKind::AsfrCohort, "data")
            .with_input("other/asfrVH.txt");

        assert_eq!(config.input_path, Path::new("other/asfrVH.txt"));
        assert_eq!(config.output_dir, Path::new("data"));
    }
}
