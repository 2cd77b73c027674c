//! Error types for dataset loading and profiling.
//!
//! Every failure in the core degrades to a structured error that the
//! presentation layer can display; nothing in this crate panics on
//! malformed input.

use thiserror::Error;

/// Main error type for CSVSight operations.
#[derive(Debug, Error)]
pub enum CsvSightError {
    /// Input byte stream could not be decoded into text
    #[error("Failed to decode input: {context}")]
    Decode { context: String },

    /// Input text is not well-formed delimited tabular data
    #[error("Failed to parse tabular data: {context}")]
    Parse {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Table violates a structural invariant (ragged columns, duplicate names)
    #[error("Invalid table: {message}")]
    InvalidTable { message: String },

    /// Configuration or argument error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with CsvSightError
pub type Result<T> = std::result::Result<T, CsvSightError>;

impl CsvSightError {
    /// Creates a decode error with context
    pub fn decode_failed(context: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
        }
    }

    /// Creates a parse error with context
    pub fn parse_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an invalid-table error
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidTable {
            message: message.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}
