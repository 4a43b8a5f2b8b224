//! Geography label to integer code lookup
//!
//! Codes are dense and assigned in first-seen order while parsing a raw
//! file. Each dataset build produces its own table, so codes are only
//! meaningful together with the table that was saved alongside the splits.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One persisted `(label, code)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoKeyEntry {
    pub label: String,
    pub code: u32,
}

/// Insertion-ordered mapping from geography label to sequential code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoKeyTable {
    labels: Vec<String>,
    codes: HashMap<String, u32>,
}

impl GeoKeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code for `label`, assigning the next free code on first sight
    pub fn code_for(&mut self, label: &str) -> u32 {
        if let Some(&code) = self.codes.get(label) {
            return code;
        }
        let code = self.labels.len() as u32;
        self.labels.push(label.to_string());
        self.codes.insert(label.to_string(), code);
        code
    }

    pub fn code(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    pub fn label(&self, code: u32) -> Option<&str> {
        self.labels.get(code as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entries in code order
    pub fn entries(&self) -> Vec<GeoKeyEntry> {
        self.labels
            .iter()
            .enumerate()
            .map(|(code, label)| GeoKeyEntry {
                label: label.clone(),
                code: code as u32,
            })
            .collect()
    }

    /// Write the table as JSON, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.entries())?;
        Ok(())
    }

    /// Read a table written by `save`
    ///
    /// Entries are re-ordered by code, so a hand-edited file still yields
    /// dense codes as long as no code is skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut entries: Vec<GeoKeyEntry> = serde_json::from_reader(reader)?;
        entries.sort_by_key(|e| e.code);

        let mut table = Self::new();
        for (index, entry) in entries.iter().enumerate() {
            let code = table.code_for(&entry.label);
            if code != entry.code || code as usize != index {
                return Err(crate::Error::InvalidGeoKeyTable(format!(
                    "entry {} ('{}') has code {}, expected {}",
                    index, entry.label, entry.code, index
                )));
            }
        }
        Ok(table)
    }
}
