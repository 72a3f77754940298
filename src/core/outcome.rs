//! Outcome codes reported by machine operations.

use serde::{Deserialize, Serialize};

/// Result of a transition or an event dispatch.
///
/// None of these is fatal. `EventNotHandled` is routine: most events are
/// irrelevant in most states. `StateTransitionFailed` means a target was
/// not part of the machine's tree; the active state is left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Ok,
    StateTransitionFailed,
    EventNotHandled,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Short code for logs and displays.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::StateTransitionFailed => "STATE_TRANSITION_FAILED",
            Self::EventNotHandled => "EVENT_NOT_HANDLED",
        }
    }
}
