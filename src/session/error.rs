//! Error types for the stream session.

use thiserror::Error;

/// Failures of the remote call, distinct from user cancellation.
///
/// Every variant recovers at the session boundary: the controller logs the
/// detail, appends the fixed failure sentinel line, and returns to idle.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure, or a network error after the stream opened.
    #[error("request failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}
