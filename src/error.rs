//! Error types for couch-link operations.

use thiserror::Error;

/// Errors surfaced by [`crate::CouchLinkClient`] operations.
///
/// The three bare variants carry the stable tags callers match on
/// (`INVALID_DATA`, `NOT_FOUND`, `FAIL_IN_SEARCH`); everything else is a
/// store or transport error passed through uninterpreted.
#[derive(Error, Debug)]
pub enum CouchLinkError {
    /// A required argument was missing or had the wrong shape.
    /// Detected before any store call is made.
    #[error("INVALID_DATA")]
    InvalidData,

    /// No document matched the requested id, or a view response lacked
    /// the expected rows.
    #[error("NOT_FOUND")]
    NotFound,

    /// A search response row could not be reshaped into the normalized
    /// form. One stable kind for the whole class of shape mismatches.
    #[error("FAIL_IN_SEARCH")]
    FailInSearch,

    /// The store answered with a non-success status. The message is taken
    /// from the store's error body when parseable. Not reinterpreted: a
    /// revision conflict and a gateway error look the same at this layer.
    #[error("server error ({status_code}): {message}")]
    Server { status_code: u16, message: String },

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client was misconfigured at build time.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for couch-link operations.
pub type Result<T> = std::result::Result<T, CouchLinkError>;
