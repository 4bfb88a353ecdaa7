//! Error handling for the part picker core
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling.

use thiserror::Error;

use crate::model::Category;

/// Main error type for the part picker core
#[derive(Error, Debug)]
pub enum PartPickerError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while loading a category list from a catalog endpoint
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error fetching '{category}': {source}")]
    Network {
        category: Category,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} fetching '{category}'")]
    Status { category: Category, status: u16 },

    #[error("Malformed payload for '{category}': {source}")]
    Decode {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// The category whose fetch produced this error
    pub fn category(&self) -> Category {
        match self {
            FetchError::Network { category, .. }
            | FetchError::Status { category, .. }
            | FetchError::Decode { category, .. } => *category,
        }
    }
}

/// Errors raised by build selection operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Part '{part_id}' belongs to category '{actual}', not '{requested}'")]
    CategoryMismatch {
        part_id: String,
        requested: Category,
        actual: Category,
    },
}

/// Result type aliases for convenience
pub type PartPickerResult<T> = Result<T, PartPickerError>;
pub type FetchResult<T> = Result<T, FetchError>;
pub type SelectionResult<T> = Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let fetch_err = FetchError::Status {
            category: Category::Ssd,
            status: 503,
        };
        assert_eq!(fetch_err.category(), Category::Ssd);

        let err = PartPickerError::Fetch(fetch_err);
        assert!(matches!(err, PartPickerError::Fetch(_)));
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::Status {
            category: Category::Cpu,
            status: 500,
        };
        assert_eq!(format!("{}", err), "Unexpected status 500 fetching 'cpu'");
    }
}
