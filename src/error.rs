//! Unified error types for chatlens.
//!
//! A single [`ChatlensError`] enum covers every failure in the library.
//! Variants fall into three groups:
//!
//! - **Fatal** for the whole run: [`MalformedInput`](ChatlensError::MalformedInput),
//!   [`Io`](ChatlensError::Io), [`InvalidConfig`](ChatlensError::InvalidConfig)
//! - **Recoverable** per entry: [`UnparseableLine`](ChatlensError::UnparseableLine)
//!   is counted and skipped by the ingest pipeline
//! - **Caller contract**: [`EmptyCorpus`](ChatlensError::EmptyCorpus) is returned
//!   instead of producing NaN averages or empty rankings

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred while reading the export or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export does not begin with a recognizable message header.
    ///
    /// Aborts the run: without one well-formed entry no analysis is possible.
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based source line where the problem was detected
        line: usize,
        /// Description of what's wrong
        reason: String,
    },

    /// A logical line looked like an entry header but could not be parsed.
    ///
    /// The ingest pipeline skips and counts these instead of aborting.
    #[error("Unparseable line {line}: {reason}")]
    UnparseableLine {
        /// 1-based source line of the entry header
        line: usize,
        /// Description of what's wrong
        reason: String,
    },

    /// The record store holds zero messages.
    ///
    /// Returned by rankings and derived averages, which are undefined
    /// for an empty corpus.
    #[error("No messages found: the corpus is empty")]
    EmptyCorpus,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending value
        message: String,
    },

    /// An output format is unknown or its feature is disabled.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which format slot was being resolved (`"report"` or `"records"`)
        format: &'static str,
        /// Description of the problem
        message: String,
    },

    /// A header grammar failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a malformed input error.
    pub fn malformed_input(line: usize, reason: impl Into<String>) -> Self {
        ChatlensError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// Creates an unparseable line error.
    pub fn unparseable_line(line: usize, reason: impl Into<String>) -> Self {
        ChatlensError::UnparseableLine {
            line,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatlensError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this error aborted the run at file level.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ChatlensError::MalformedInput { .. })
    }

    /// Returns `true` if this is a recoverable per-line failure.
    pub fn is_unparseable_line(&self) -> bool {
        matches!(self, ChatlensError::UnparseableLine { .. })
    }

    /// Returns `true` if the corpus was empty.
    pub fn is_empty_corpus(&self) -> bool {
        matches!(self, ChatlensError::EmptyCorpus)
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatlensError::InvalidConfig { .. })
    }
}
