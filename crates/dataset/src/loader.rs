//! Reads the salary dataset into typed records.
//!
//! Structural problems (unreadable file, ragged rows, missing columns,
//! unknown categories, no rows) abort the load with a single error. A
//! numeric field that does not parse only drops that field: the record is
//! kept with `None` and the failure is reported in `Dataset::numeric_failures`.

use crate::options::LoadOptions;
use equity_core::{parse_numeric, Error, Rank, Result, SalaryRecord, Sex};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io;

/// Columns the dataset must provide. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["discipline", "yrs.since.phd", "yrs.service", "sex", "rank", "salary"];

/// One row as it appears in the file, before any parsing.
#[derive(Debug, Deserialize)]
struct RawRecord {
    discipline: String,
    #[serde(rename = "yrs.since.phd")]
    yrs_since_phd: String,
    #[serde(rename = "yrs.service")]
    yrs_service: String,
    sex: String,
    rank: String,
    salary: String,
}

/// A numeric field that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumericFailure {
    pub line: u64,
    pub column: &'static str,
    pub text: String,
}

/// The loaded dataset.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub records: Vec<SalaryRecord>,
    pub numeric_failures: Vec<NumericFailure>,
}

impl Dataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the dataset, returning its records.
    pub fn into_records(self) -> Vec<SalaryRecord> {
        self.records
    }
}

/// Loads the dataset described by `options`.
pub fn load(options: &LoadOptions) -> Result<Dataset> {
    let path = options.path.display().to_string();
    let file = File::open(&options.path).map_err(|e| Error::io(&path, e.to_string()))?;
    let dataset = load_from_reader(file, options).map_err(|e| match e {
        Error::Io { message, .. } => Error::io(&path, message),
        other => other,
    })?;
    info!("loaded {} salary records from {}", dataset.len(), path);
    Ok(dataset)
}

/// Loads the dataset from any reader. `options.path` is not used.
pub fn load_from_reader<R: io::Read>(reader: R, options: &LoadOptions) -> Result<Dataset> {
    let mut rdr = options.reader_builder().from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::missing_column(column));
        }
    }

    let mut dataset = Dataset::default();
    let mut row = csv::StringRecord::new();
    while rdr.read_record(&mut row).map_err(csv_error)? {
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| Error::csv(Some(line), e.to_string()))?;
        let record = convert(raw, line, &mut dataset.numeric_failures)?;
        dataset.records.push(record);
    }

    if dataset.records.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if !dataset.numeric_failures.is_empty() {
        debug!(
            "{} numeric fields left out of aggregates",
            dataset.numeric_failures.len()
        );
    }
    Ok(dataset)
}

fn convert(raw: RawRecord, line: u64, failures: &mut Vec<NumericFailure>) -> Result<SalaryRecord> {
    let sex = Sex::parse(&raw.sex).ok_or_else(|| Error::invalid_category(line, "sex", raw.sex.as_str()))?;
    let rank = Rank::parse(&raw.rank).ok_or_else(|| Error::invalid_category(line, "rank", raw.rank.as_str()))?;
    let discipline = raw.discipline.trim();
    if discipline.is_empty() {
        return Err(Error::invalid_category(line, "discipline", ""));
    }

    let mut numeric = |column: &'static str, text: &str| {
        let value = parse_numeric(text);
        if value.is_none() {
            warn!("line {}: {} {:?} is not a non-negative integer", line, column, text);
            failures.push(NumericFailure {
                line,
                column,
                text: text.to_string(),
            });
        }
        value
    };

    Ok(SalaryRecord::new(discipline, sex, rank)
        .with_yrs_since_phd(numeric("yrs.since.phd", &raw.yrs_since_phd))
        .with_yrs_service(numeric("yrs.service", &raw.yrs_service))
        .with_salary(numeric("salary", &raw.salary)))
}

fn csv_error(err: csv::Error) -> Error {
    if err.is_io_error() {
        return Error::io("<reader>", err.to_string());
    }
    let line = err.position().map(|p| p.line());
    Error::csv(line, err.to_string())
}
