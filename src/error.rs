//! Error types for the Financial Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reading the ledger,
//! computing earnings and summaries, and managing obligations.

use thiserror::Error;

/// The main error type for the Financial Reconciliation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use reconciliation_engine::error::EngineError;
///
/// let error = EngineError::InvalidMonthKey {
///     value: "2024-13".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid month key '2024-13': expected YYYY-MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A month key did not match the strict `YYYY-MM` form.
    #[error("Invalid month key '{value}': expected YYYY-MM")]
    InvalidMonthKey {
        /// The rejected input.
        value: String,
    },

    /// A request or record field was missing or held an unusable value.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A record addressed by identifier does not exist.
    #[error("{entity} {id} not found")]
    RecordNotFound {
        /// The kind of record (e.g. "obligation").
        entity: &'static str,
        /// The identifier that was looked up.
        id: u64,
    },

    /// The ledger store failed to serve a read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by the caller's input rather than the engine.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidMonthKey { .. } | EngineError::InvalidField { .. }
        )
    }

    /// Shorthand for an [`EngineError::InvalidField`].
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
