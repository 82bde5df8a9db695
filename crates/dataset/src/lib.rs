//! Equity Dataset - Loader for the salary-equity dataset.
//!
//! Reads delimited text with the columns `discipline`, `yrs.since.phd`,
//! `yrs.service`, `sex`, `rank` and `salary` into `SalaryRecord`s. Extra
//! columns (such as a leading row-name column) are ignored and column order
//! is free.
//!
//! # Example
//!
//! ```no_run
//! use equity_dataset::{load, LoadOptions};
//!
//! let dataset = load(&LoadOptions::new("data/Salaries.csv"))?;
//! println!("{} records", dataset.len());
//! # Ok::<(), equity_core::Error>(())
//! ```

mod loader;
mod options;

pub use loader::{load, load_from_reader, Dataset, NumericFailure, REQUIRED_COLUMNS};
pub use options::{LoadOptions, DEFAULT_DATASET_PATH};

/// Loads the dataset at `path` with default options.
pub fn load_path(path: impl AsRef<std::path::Path>) -> equity_core::Result<Dataset> {
    load(&LoadOptions::new(path))
}
