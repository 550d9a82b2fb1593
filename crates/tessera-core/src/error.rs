//! Error types for tessera-core

use std::fmt;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of grid element an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Row,
    Column,
    Cell,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Row => f.write_str("row"),
            ElementKind::Column => f.write_str("column"),
            ElementKind::Cell => f.write_str("cell"),
        }
    }
}

/// Errors that can occur in tessera-core
#[derive(Debug, Error)]
pub enum Error {
    /// Positional access outside `0..count` (or `0..=count` for inserts)
    #[error("{kind} index {index} out of range (count: {count})")]
    IndexOutOfRange {
        kind: ElementKind,
        index: usize,
        count: usize,
    },

    /// Lookup by a header no column carries
    #[error("Unknown column header: {0}")]
    UnknownHeader(String),

    /// Another column already carries this header
    #[error("Another column already has the header: {0}")]
    DuplicateHeader(String),

    /// The element was removed from its document
    #[error("The {0} has been removed from its document")]
    Orphan(ElementKind),

    /// Row creation was requested on a document with no columns
    #[error("Cannot create a row in a document with no columns")]
    NoColumns,

    /// A typed accessor could not interpret the cell text
    #[error("Invalid value: expected {expected}, got '{value}'")]
    InvalidValue {
        expected: &'static str,
        value: String,
    },
}

impl Error {
    pub(crate) fn out_of_range(kind: ElementKind, index: usize, count: usize) -> Self {
        Error::IndexOutOfRange { kind, index, count }
    }

    pub(crate) fn invalid_value<S: Into<String>>(expected: &'static str, value: S) -> Self {
        Error::InvalidValue {
            expected,
            value: value.into(),
        }
    }

    /// Whether this error reports use of a removed row, column, or cell
    pub fn is_orphan(&self) -> bool {
        matches!(self, Error::Orphan(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::out_of_range(ElementKind::Row, 5, 2);
        assert_eq!(err.to_string(), "row index 5 out of range (count: 2)");

        let err = Error::Orphan(ElementKind::Cell);
        assert_eq!(err.to_string(), "The cell has been removed from its document");
        assert!(err.is_orphan());

        let err = Error::UnknownHeader("Weight".into());
        assert!(!err.is_orphan());
    }
}
