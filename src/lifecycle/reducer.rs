//! Reducer for the request lifecycle.

use super::intent::RequestIntent;
use super::state::RequestPhase;
use super::Reducer;

/// Lifecycle transitions.
///
/// A `Submit` while already streaming leaves the state untouched: the
/// at-most-one-session guarantee. Every `Finish` returns to `Idle`
/// regardless of outcome; the differing sentinel lines are the caller's
/// side effect, not distinct states.
pub struct RequestReducer;

impl Reducer for RequestReducer {
    type State = RequestPhase;
    type Intent = RequestIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RequestIntent::Submit { request_id } => match state {
                RequestPhase::Idle => RequestPhase::Streaming { request_id },
                streaming @ RequestPhase::Streaming { .. } => streaming,
            },

            RequestIntent::Finish { .. } => RequestPhase::Idle,
        }
    }
}
