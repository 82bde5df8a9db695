//! Loader configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the dataset lives when no path is configured.
pub const DEFAULT_DATASET_PATH: &str = "data/Salaries.csv";

/// Options for reading the salary dataset.
///
/// Derives `Deserialize` so a host can embed it in its own configuration;
/// missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Path of the delimited-text file.
    pub path: PathBuf,
    /// Field delimiter.
    pub delimiter: u8,
    /// Trim whitespace around headers and fields.
    pub trim: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_PATH),
            delimiter: b',',
            trim: true,
        }
    }
}

impl LoadOptions {
    /// Creates options for the given path with default parsing settings.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables whitespace trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(if self.trim { csv::Trim::All } else { csv::Trim::None });
        builder
    }
}
