//! State for the request lifecycle.

use uuid::Uuid;

/// Request lifecycle state machine.
///
/// `Idle` accepts submissions; `Streaming` rejects them and is the only
/// state in which cancellation is honored. Terminal outcomes (settled,
/// cancelled, failed) are not stored states: the `Finish` intent returns
/// straight to `Idle`, so the machine is always ready for the next command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestPhase {
    /// No stream active, input accepted.
    #[default]
    Idle,

    /// One stream session is active; further submissions are rejected.
    Streaming { request_id: Uuid },
}

impl RequestPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming { .. })
    }

    /// Id of the active request, if streaming.
    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            Self::Streaming { request_id } => Some(*request_id),
            Self::Idle => None,
        }
    }
}
