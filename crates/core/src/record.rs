//! Salary record structure.
//!
//! This module defines `SalaryRecord`, one row of the salary dataset. Numeric
//! columns arrive as text; a value that fails to parse is kept as `None` and
//! is left out of every numeric aggregate.

use crate::types::{Rank, Sex};
use alloc::string::String;

/// Position of a record in the loaded dataset.
pub type RecordId = usize;

/// One row of the salary dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalaryRecord {
    pub discipline: String,
    pub sex: Sex,
    pub rank: Rank,
    pub yrs_since_phd: Option<u32>,
    pub yrs_service: Option<u32>,
    pub salary: Option<u32>,
}

impl SalaryRecord {
    /// Creates a record with the categorical columns set and no numerics.
    pub fn new(discipline: impl Into<String>, sex: Sex, rank: Rank) -> Self {
        Self {
            discipline: discipline.into(),
            sex,
            rank,
            yrs_since_phd: None,
            yrs_service: None,
            salary: None,
        }
    }

    /// Sets the salary.
    pub fn with_salary(mut self, salary: Option<u32>) -> Self {
        self.salary = salary;
        self
    }

    /// Sets the years since PhD.
    pub fn with_yrs_since_phd(mut self, years: Option<u32>) -> Self {
        self.yrs_since_phd = years;
        self
    }

    /// Sets the years of service.
    pub fn with_yrs_service(mut self, years: Option<u32>) -> Self {
        self.yrs_service = years;
        self
    }

    /// Returns true for full professors.
    #[inline]
    pub fn is_professor(&self) -> bool {
        self.rank == Rank::Prof
    }
}

/// Parses a numeric column.
///
/// Leading and trailing whitespace is ignored. Anything that is not a
/// non-negative integer (empty text, `NA`, decimals, signs) yields `None`.
pub fn parse_numeric(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
