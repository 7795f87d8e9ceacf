//! Error types for record store, ingestion and configuration failures
//!
//! Query-level outcomes such as "no data" or "unrecognized question" are not
//! errors; they are [`Answer`](crate::Answer) variants.

use thiserror::Error;

/// Infrastructure errors raised around the analytic core
#[derive(Debug, Error)]
pub enum ShortPosError {
    /// SQLite record store failure
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// CSV decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file could not be ingested at all
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for short position operations
pub type Result<T> = std::result::Result<T, ShortPosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShortPosError::Config("trend_window must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: trend_window must be greater than 0"
        );

        let err = ShortPosError::Ingest("missing header row".to_string());
        assert_eq!(err.to_string(), "Ingest error: missing header row");
    }

    #[test]
    fn test_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "positions.csv");
        let err: ShortPosError = io.into();
        assert!(matches!(err, ShortPosError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
