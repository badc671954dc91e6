//! Intents for the request lifecycle.

use uuid::Uuid;

/// How the active session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Stream closed normally.
    Settled,
    /// User cancelled mid-stream.
    Cancelled,
    /// Transport or protocol failure.
    Failed,
}

/// Intents dispatched to the request lifecycle reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestIntent {
    /// A non-blank command was accepted and a session is starting.
    Submit { request_id: Uuid },

    /// The active session reached a terminal state.
    Finish { outcome: SessionEnd },
}
