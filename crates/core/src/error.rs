//! Error types for the salary-equity dashboard.

use alloc::string::String;
use core::fmt;

/// Result type alias for dashboard operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for loading the dataset and driving selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The dataset source could not be opened or read.
    Io {
        path: String,
        message: String,
    },
    /// The delimited text is structurally malformed.
    Csv {
        line: Option<u64>,
        message: String,
    },
    /// A required column is absent from the header.
    MissingColumn {
        column: String,
    },
    /// A categorical column holds a value outside its domain.
    InvalidCategory {
        line: u64,
        column: String,
        value: String,
    },
    /// The dataset has a header but no records.
    EmptyDataset,
    /// A selection names a value the view does not know.
    InvalidSelection {
        view: String,
        value: String,
    },
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, message } => {
                write!(f, "Failed to read dataset {}: {}", path, message)
            }
            Error::Csv {
                line: Some(line),
                message,
            } => {
                write!(f, "Malformed dataset at line {}: {}", line, message)
            }
            Error::Csv { line: None, message } => {
                write!(f, "Malformed dataset: {}", message)
            }
            Error::MissingColumn { column } => {
                write!(f, "Dataset is missing column: {}", column)
            }
            Error::InvalidCategory { line, column, value } => {
                write!(
                    f,
                    "Invalid value {:?} for column {} at line {}",
                    value, column, line
                )
            }
            Error::EmptyDataset => {
                write!(f, "Dataset contains no records")
            }
            Error::InvalidSelection { view, value } => {
                write!(f, "Unknown selection {:?} for view {}", value, view)
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl core::error::Error for Error {}

impl Error {
    /// Creates an I/O error for the given dataset path.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed-CSV error.
    pub fn csv(line: Option<u64>, message: impl Into<String>) -> Self {
        Error::Csv {
            line,
            message: message.into(),
        }
    }

    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Error::MissingColumn {
            column: column.into(),
        }
    }

    /// Creates an invalid category error.
    pub fn invalid_category(line: u64, column: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidCategory {
            line,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid selection error.
    pub fn invalid_selection(view: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidSelection {
            view: view.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }

    /// Returns true if this error aborts dataset loading.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::Csv { .. }
                | Error::MissingColumn { .. }
                | Error::InvalidCategory { .. }
                | Error::EmptyDataset
        )
    }
}
