//! Error types for rowindex.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in rowindex.
///
/// Lookups of absent keys are not errors; they return
/// [`SearchResult::NotFound`](crate::SearchResult::NotFound).
#[derive(Debug, Error)]
pub enum Error {
    /// Minimum degree below [`MIN_DEGREE`](crate::common::config::MIN_DEGREE).
    ///
    /// A tree is never constructible with this configuration.
    #[error("invalid minimum degree {0}: must be at least 2")]
    InvalidDegree(usize),

    /// A structural check found a node breaking the B-tree invariants.
    ///
    /// This indicates a bug, not a user-input problem.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O error while reading a tabular source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header row has no column with the requested name.
    #[error("column {0:?} not found")]
    ColumnNotFound(String),

    /// The tabular source has no header row.
    #[error("tabular source is empty")]
    EmptySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDegree(1);
        assert_eq!(
            format!("{}", err),
            "invalid minimum degree 1: must be at least 2"
        );

        let err = Error::ColumnNotFound("Open".to_string());
        assert_eq!(format!("{}", err), "column \"Open\" not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::from(io_err);
        assert!(err.source().is_some());
        assert!(Error::EmptySource.source().is_none());
    }
}
