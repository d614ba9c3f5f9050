//! Store-level error types.

use thiserror::Error;

/// Errors raised by a [`crate::ports::PostStore`] implementation.
///
/// The variants exist for logging; the web layer treats every variant the
/// same way and maps it to a fixed fallback response, so a missing post is
/// indistinguishable from a failed store from the reader's point of view.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found")]
    NotFound,

    #[error("invalid post id: {0}")]
    InvalidId(String),

    #[error("store connection failed: {0}")]
    Connection(String),

    #[error("store query failed: {0}")]
    Query(String),
}
