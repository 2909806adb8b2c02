//! Error types for the refiner
//!
//! `ItemError` covers failures scoped to one document. The driver turns them
//! into skipped entries or error records and never lets them end a run.
//! `RefinerError` covers the few failures that do end a run.

use thiserror::Error;

/// Per-document failures, recovered inside the batch driver
#[derive(Error, Debug)]
pub enum ItemError {
    /// Document could not be read from disk
    #[error("Failed to read '{item}': {message}")]
    Read {
        /// Document identifier
        item: String,
        /// Underlying I/O error message
        message: String,
    },

    /// Document is not valid JSON
    #[error("Failed to decode '{item}': {message}")]
    Decode {
        /// Document identifier
        item: String,
        /// JSON decoder message
        message: String,
    },

    /// A required text field is missing or not a string
    #[error("Malformed input '{item}': missing or non-string {field}")]
    MalformedInput {
        /// Document identifier
        item: String,
        /// Dotted path of the missing field
        field: &'static str,
    },

    /// The completion service call failed
    #[error("Completion failed for '{item}': {message}")]
    Collaborator {
        /// Document identifier
        item: String,
        /// Provider error message
        message: String,
    },
}

impl ItemError {
    /// Stable label for logs and error records
    pub fn kind(&self) -> &'static str {
        match self {
            ItemError::Read { .. } => "read",
            ItemError::Decode { .. } => "decode",
            ItemError::MalformedInput { .. } => "malformed_input",
            ItemError::Collaborator { .. } => "collaborator",
        }
    }

    /// Identifier of the document the error belongs to
    pub fn item(&self) -> &str {
        match self {
            ItemError::Read { item, .. }
            | ItemError::Decode { item, .. }
            | ItemError::MalformedInput { item, .. }
            | ItemError::Collaborator { item, .. } => item,
        }
    }
}

/// Failures that end a run
#[derive(Error, Debug)]
pub enum RefinerError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input directory could not be listed
    #[error("Cannot read input directory '{path}': {message}")]
    InputDirectory {
        /// Directory that was requested
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// The finished batch could not be written
    #[error("Persistence error: {0}")]
    Persistence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_error_kinds() {
        let err = ItemError::MalformedInput {
            item: "a.json".to_string(),
            field: "dataSet.answer.raw.text",
        };
        assert_eq!(err.kind(), "malformed_input");
        assert_eq!(err.item(), "a.json");
        assert!(err.to_string().contains("dataSet.answer.raw.text"));

        let err = ItemError::Decode {
            item: "b.json".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().starts_with("Failed to decode 'b.json'"));
    }
}
