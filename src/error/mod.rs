//! Error handling for dataset loading, lookup, and configuration.

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while looking up a patient record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No record carries the requested patient number
    #[error("No patient found with Patient_Number {patient_id}")]
    NotFound { patient_id: i64 },

    /// The requested patient number lies outside the dataset's id range
    #[error("Patient_Number {patient_id} is outside the dataset range {min}..={max}")]
    OutOfRange { patient_id: i64, min: i64, max: i64 },
}

/// Specialized error type for the library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding CSV data or building record batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting record batches into records
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_arrow::Error),

    /// A column required by the record schema is missing from the data file
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The data file extension is neither `.csv` nor `.parquet`
    #[error("Unsupported data file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A patient number occurs more than once while uniqueness is enforced
    #[error("Patient_Number {patient_id} occurs {occurrences} times in the dataset")]
    DuplicatePatientId { patient_id: i64, occurrences: usize },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Error {
    /// Create a configuration error from any displayable message
    pub fn config<M: std::fmt::Display>(message: M) -> Self {
        Self::Config(message.to_string())
    }
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_converts_into_error() {
        let err: Error = LookupError::NotFound { patient_id: 7 }.into();
        assert!(matches!(
            err,
            Error::Lookup(LookupError::NotFound { patient_id: 7 })
        ));
        assert_eq!(err.to_string(), "No patient found with Patient_Number 7");
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = Error::UnsupportedFormat {
            path: PathBuf::from("data.xlsx"),
        };
        assert_eq!(err.to_string(), "Unsupported data file format: data.xlsx");
    }
}
