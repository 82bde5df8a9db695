//! Equity Core - Record schema and error types for the salary-equity dashboard.
//!
//! This crate provides the foundational types shared by the engine, the
//! loader and the dashboard:
//!
//! - `SalaryRecord`: One row of the salary dataset with optional numeric fields
//! - `Sex` / `Rank`: Categorical columns with a closed set of values
//! - `parse_numeric`: The numeric parsing policy for text columns
//! - `Error`: Error types for loading and selection
//!
//! # Example
//!
//! ```rust
//! use equity_core::{Rank, SalaryRecord, Sex};
//!
//! let record = SalaryRecord::new("B", Sex::Female, Rank::Prof)
//!     .with_salary(Some(129_000))
//!     .with_yrs_service(Some(18));
//!
//! assert_eq!(record.salary, Some(129_000));
//! assert!(record.is_professor());
//! ```

#![no_std]

extern crate alloc;

mod error;
mod record;
mod types;

pub use error::{Error, Result};
pub use record::{parse_numeric, RecordId, SalaryRecord};
pub use types::{Rank, Sex};
