//! Error types for query scanning and transformation.
//!
//! Two deliberately distinct classes that must never be unified: a
//! [`ScanError`] is the recoverable, expected outcome for malformed user
//! input, while an [`InvariantError`] reports a violated precondition, a bug
//! on the caller's side rather than something to retry or degrade from.

use thiserror::Error;

/// A lexical failure while scanning a query.
///
/// Scan failures are ordinary data for the host application: shown to the
/// user as a syntax error or used to abort a search, never thrown through
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {position}")]
pub struct ScanError {
    /// Human-readable reason for the failure.
    pub message: String,
    /// Byte offset in the query where scanning failed.
    pub position: usize,
}

impl ScanError {
    /// Creates a scan error at a byte offset.
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Formats the error with a caret pointing at the failing offset.
    ///
    /// `query` must be the string this error was produced from.
    pub fn format_with_context(&self, query: &str) -> String {
        let column = query[..self.position.min(query.len())].chars().count();
        format!(
            "query syntax error: {}\n  {}\n  {}^",
            self.message,
            query,
            " ".repeat(column)
        )
    }
}

/// A broken precondition in a transformer operation.
///
/// Kept separate from [`ScanError`] so that a caller-bug signal can never be
/// mistaken for a recoverable scan failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// `update_filters` was handed a query that does not scan.
    #[error("update_filters requires a query that scans cleanly: {0}")]
    UnscannableQuery(ScanError),

    /// A token range does not address the query it was paired with.
    #[error("token range [{start}, {end}) does not address a query of length {len}")]
    ForeignRange {
        /// Start offset carried by the token.
        start: isize,
        /// End offset carried by the token.
        end: isize,
        /// Byte length of the query the token was applied to.
        len: usize,
    },
}
