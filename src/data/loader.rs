//! Readers for raw fertility-rate files and writers/readers for split tables
//!
//! Raw files are whitespace-delimited with three header lines:
//! `country year age rate` (ASFR) or `country year age cohort rate` (tri-data).
//! Split tables are headerless, single-space-delimited numeric rows.

use super::geo::GeoKeyTable;
use super::record::{AsfrRecord, CategoryRecord, CohortRecord};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Header lines preceding the data in a raw file
pub const HEADER_LINES: usize = 3;

/// Oldest age kept from a raw file
pub const MAX_AGE: i32 = 54;

/// Records parsed from one raw file together with the geography codes assigned
#[derive(Debug, Clone)]
pub struct RawDataset<T> {
    pub records: Vec<T>,
    pub geos: GeoKeyTable,
    /// Rows discarded for an unusable age or rate
    pub dropped: usize,
}

struct ParsedRow {
    geo: u32,
    year: i32,
    age: i32,
    cohort: i32,
    rate: f64,
}

/// Read a raw ASFR file (`country year age rate`)
pub fn read_raw_asfr<P: AsRef<Path>>(path: P) -> Result<RawDataset<AsfrRecord>> {
    read_raw_asfr_from_reader(File::open(path)?)
}

pub fn read_raw_asfr_from_reader<R: Read>(reader: R) -> Result<RawDataset<AsfrRecord>> {
    parse_raw(BufReader::new(reader), false, |row| {
        AsfrRecord::new(row.geo, row.year, row.age, row.rate)
    })
}

/// Read a raw tri-data file (`country year age cohort rate`)
pub fn read_raw_tri<P: AsRef<Path>>(path: P) -> Result<RawDataset<CohortRecord>> {
    read_raw_tri_from_reader(File::open(path)?)
}

pub fn read_raw_tri_from_reader<R: Read>(reader: R) -> Result<RawDataset<CohortRecord>> {
    parse_raw(BufReader::new(reader), true, |row| {
        CohortRecord::new(row.geo, row.year, row.age, row.cohort, row.rate)
    })
}

fn parse_raw<B: BufRead, T>(
    reader: B,
    with_cohort: bool,
    build: impl Fn(ParsedRow) -> T,
) -> Result<RawDataset<T>> {
    let expected_fields = if with_cohort { 5 } else { 4 };
    let mut geos = GeoKeyTable::new();
    let mut records = Vec::new();
    let mut dropped = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();

        if index < HEADER_LINES {
            debug!("header: {}", trimmed);
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != expected_fields {
            return Err(Error::parse(
                line_no,
                format!("expected {} fields, got {}", expected_fields, fields.len()),
            ));
        }

        let year: i32 = fields[1]
            .parse()
            .map_err(|_| Error::parse(line_no, format!("malformed year '{}'", fields[1])))?;

        // Open-ended age groups such as "12-" or "55+" do not parse and are dropped
        let age: Option<i32> = fields[2].parse().ok();

        // Assigned before filtering, so a geography with only dropped rows still gets a code
        let geo = geos.code_for(fields[0]);

        let cohort = if with_cohort {
            fields[3]
                .parse()
                .map_err(|_| Error::parse(line_no, format!("malformed cohort '{}'", fields[3])))?
        } else {
            0
        };

        let rate: Option<f64> = fields[expected_fields - 1].parse().ok();

        // NaN rates pass through untouched; only negatives are discarded
        match (age, rate) {
            (Some(age), Some(rate)) if (0..=MAX_AGE).contains(&age) && (rate.is_nan() || rate >= 0.0) => {
                records.push(build(ParsedRow {
                    geo,
                    year,
                    age,
                    cohort,
                    rate: if rate > 1.0 { 1.0 } else { rate },
                }));
            }
            _ => dropped += 1,
        }
    }

    debug!(
        "parsed {} records across {} geographies ({} dropped)",
        records.len(),
        geos.len(),
        dropped
    );

    Ok(RawDataset {
        records,
        geos,
        dropped,
    })
}

/// Write records as headerless, space-delimited rows
pub fn write_table<T: Serialize, P: AsRef<Path>>(path: P, records: &[T]) -> Result<()> {
    write_table_to(File::create(path)?, records)
}

pub fn write_table_to<T: Serialize, W: Write>(writer: W, records: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(writer);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a `[geo, year, age, rate]` table
pub fn load_asfr_table<P: AsRef<Path>>(path: P) -> Result<Vec<AsfrRecord>> {
    load_asfr_table_from_reader(File::open(path)?)
}

pub fn load_asfr_table_from_reader<R: Read>(reader: R) -> Result<Vec<AsfrRecord>> {
    read_numeric_rows(reader, 4)?
        .into_iter()
        .map(|(line, v)| {
            Ok(AsfrRecord::new(
                integral(v[0], line, "geo")?,
                integral(v[1], line, "year")?,
                integral(v[2], line, "age")?,
                v[3],
            ))
        })
        .collect()
}

/// Load a `[geo, year, age, cohort, rate]` table
pub fn load_cohort_table<P: AsRef<Path>>(path: P) -> Result<Vec<CohortRecord>> {
    load_cohort_table_from_reader(File::open(path)?)
}

pub fn load_cohort_table_from_reader<R: Read>(reader: R) -> Result<Vec<CohortRecord>> {
    read_numeric_rows(reader, 5)?
        .into_iter()
        .map(|(line, v)| {
            Ok(CohortRecord::new(
                integral(v[0], line, "geo")?,
                integral(v[1], line, "year")?,
                integral(v[2], line, "age")?,
                integral(v[3], line, "cohort")?,
                v[4],
            ))
        })
        .collect()
}

/// Load a `[geo, category, year, age, rate]` table
pub fn load_category_table<P: AsRef<Path>>(path: P) -> Result<Vec<CategoryRecord>> {
    load_category_table_from_reader(File::open(path)?)
}

pub fn load_category_table_from_reader<R: Read>(reader: R) -> Result<Vec<CategoryRecord>> {
    read_numeric_rows(reader, 5)?
        .into_iter()
        .map(|(line, v)| {
            Ok(CategoryRecord::new(
                integral(v[0], line, "geo")?,
                integral(v[1], line, "category")?,
                integral(v[2], line, "year")?,
                integral(v[3], line, "age")?,
                v[4],
            ))
        })
        .collect()
}

/// Parse every row into floats, tolerating runs of spaces between fields
fn read_numeric_rows<R: Read>(reader: R, expected_fields: usize) -> Result<Vec<(usize, Vec<f64>)>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != expected_fields {
            return Err(Error::parse(
                line,
                format!("expected {} fields, got {}", expected_fields, fields.len()),
            ));
        }

        let values = fields
            .iter()
            .map(|f| {
                f.parse::<f64>()
                    .map_err(|_| Error::parse(line, format!("malformed number '{}'", f)))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push((line, values));
    }
    Ok(rows)
}

/// Key columns may be written as floats (`1.95e+03`) but must be whole numbers
fn integral<T: TryFrom<i64>>(value: f64, line: usize, column: &str) -> Result<T> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::parse(
            line,
            format!("{} column must be an integer, got {}", column, value),
        ));
    }
    T::try_from(value as i64)
        .map_err(|_| Error::parse(line, format!("{} value {} out of range", column, value)))
}
