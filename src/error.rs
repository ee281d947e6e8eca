//! Unified error types for chatsift.
//!
//! This module provides a single [`ChatsiftError`] enum that covers all error
//! cases in the library. Only some of them ever reach the caller:
//!
//! - A *malformed block* is recovered inside the extractor (the block is
//!   skipped and logged).
//! - An *unparseable file* surfaces as [`ChatsiftError::Parse`]; the batch
//!   coordinator skips that file and carries on.
//! - An *empty result* surfaces as [`ChatsiftError::NoConversations`] so the
//!   CLI can report it without writing any output.
//!
//! A missing timestamp is never an error; it downgrades the record's
//! `date_source` to `missing`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatsift operations.
///
/// # Example
///
/// ```rust
/// use chatsift::error::Result;
/// use chatsift::ConversationRecord;
///
/// fn my_function() -> Result<Vec<ConversationRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsiftError>;

/// The error type for all chatsift operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsiftError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The whole input file failed top-level parsing.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The dialect being parsed (e.g., "JSON array", "raw text")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// One conversation block could not be parsed.
    ///
    /// The extractor catches this, logs it and moves on to the next block.
    #[error("Malformed conversation block #{index}: {reason}")]
    MalformedBlock {
        /// 1-based position of the block in the file
        index: usize,
        /// What went wrong
        reason: String,
    },

    /// A taxonomy or other configuration value is unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// No conversation survived extraction across all inputs.
    #[error("No conversations extracted from {inputs} input file(s)")]
    NoConversations {
        /// Number of input files that were examined
        inputs: usize,
    },

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsiftError {
    /// Creates a parse error for a JSON-dialect file.
    pub fn json_parse(
        format: &'static str,
        source: serde_json::Error,
        path: Option<PathBuf>,
    ) -> Self {
        ChatsiftError::Parse {
            format,
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates a malformed-block error.
    pub fn malformed_block(index: usize, reason: impl Into<String>) -> Self {
        ChatsiftError::MalformedBlock {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatsiftError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attaches a file path to a parse error that doesn't have one yet.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ChatsiftError::Parse {
                format,
                source,
                path: None,
            } => ChatsiftError::Parse {
                format,
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsiftError::Io(_))
    }

    /// Returns `true` if this is a file-level parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatsiftError::Parse { .. })
    }

    /// Returns `true` if this is a malformed-block error.
    pub fn is_malformed_block(&self) -> bool {
        matches!(self, ChatsiftError::MalformedBlock { .. })
    }

    /// Returns `true` if no conversations were extracted at all.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ChatsiftError::NoConversations { .. })
    }
}
