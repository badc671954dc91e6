//! Request lifecycle state machine.
//!
//! Unidirectional flow:
//!
//! ```text
//! Intent ──→ Reducer ──→ State
//! ```
//!
//! The reducer is the only place where lifecycle transitions happen, and it
//! is pure: `(State, Intent) -> State`. Side effects (echoing the command,
//! running the stream, appending sentinel lines) are performed by the caller
//! around the dispatch.

mod intent;
mod reducer;
mod state;

pub use intent::{RequestIntent, SessionEnd};
pub use reducer::RequestReducer;
pub use state::RequestPhase;

/// Pure state transition function.
pub trait Reducer {
    type State: Clone + PartialEq + Default + Send + 'static;
    type Intent: Send + 'static;

    /// Process an intent and return the new state. No side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
