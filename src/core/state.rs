//! Behavior trait for states in the hierarchy.
//!
//! A state's position in the tree (name, parent, active child) lives in
//! the machine's arena. What a state *does* lives in a `State`
//! implementation bound to that position at build time.

use super::id::StateId;
use serde::{Deserialize, Serialize};

/// Transition request returned by a handler or an initial transition.
///
/// Requests are carried out by the machine after the hook that produced
/// them has returned, so no hook ever runs inside another transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Transition directly to the state.
    To(StateId),
    /// Resume the state at its last active immediate substate.
    History(StateId),
    /// Resume the state at its last active leaf, however deep.
    DeepHistory(StateId),
}

impl Transition {
    /// The state named by the request, before any history is resolved.
    pub fn target(&self) -> StateId {
        match self {
            Self::To(id) | Self::History(id) | Self::DeepHistory(id) => *id,
        }
    }
}

/// What a state did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Offer the event to the parent state.
    Unhandled,
    /// Event consumed, no transition.
    Handled,
    /// Event consumed; perform the transition.
    Transition(Transition),
}

impl Response {
    /// Whether the event stops bubbling here.
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Unhandled)
    }
}

impl From<Transition> for Response {
    fn from(transition: Transition) -> Self {
        Self::Transition(transition)
    }
}

/// Trait for state behaviors.
///
/// `E` is the machine's event type and `C` the context handed to every
/// hook, typically the hardware the state drives. Every method has a
/// default, so a state only overrides the hooks it cares about.
///
/// # Example
///
/// ```rust
/// use zumo_hsm::core::{Response, State, StateId, Transition};
///
/// #[derive(Debug)]
/// enum Input { Go, Halt }
///
/// struct Motor { speed: i16 }
///
/// struct Idle { running: StateId }
///
/// impl State<Input, Motor> for Idle {
///     fn on_entry(&mut self, motor: &mut Motor) {
///         motor.speed = 0;
///     }
///
///     fn on_event(&mut self, event: &Input, _motor: &mut Motor) -> Response {
///         match event {
///             Input::Go => Transition::To(self.running).into(),
///             Input::Halt => Response::Unhandled,
///         }
///     }
/// }
/// ```
pub trait State<E, C> {
    /// Called when the state is entered by a transition.
    fn on_entry(&mut self, _ctx: &mut C) {}

    /// Called when the state is exited by a transition.
    fn on_exit(&mut self, _ctx: &mut C) {}

    /// Initial transition, run once on the final target after entry.
    ///
    /// Return a transition to select a default substate.
    fn on_initialize(&mut self, _ctx: &mut C) -> Option<Transition> {
        None
    }

    /// Process an event.
    ///
    /// Return `Response::Unhandled` to let the parent state try.
    fn on_event(&mut self, _event: &E, _ctx: &mut C) -> Response {
        Response::Unhandled
    }
}

/// Behavior with no hooks, used for states that only group substates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Composite;

impl<E, C> State<E, C> for Composite {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::MachineId;

    #[derive(Debug)]
    enum Ping {
        Ping,
    }

    #[test]
    fn default_handler_does_not_consume() {
        let mut state = Composite;
        let response = State::<Ping, ()>::on_event(&mut state, &Ping::Ping, &mut ());
        assert_eq!(response, Response::Unhandled);
        assert!(!response.is_handled());
    }

    #[test]
    fn default_initialize_stays_put() {
        let mut state = Composite;
        assert!(State::<Ping, ()>::on_initialize(&mut state, &mut ()).is_none());
    }

    #[test]
    fn transition_response_is_handled() {
        let id = StateId::new(MachineId::new(), 2);
        let response: Response = Transition::History(id).into();
        assert!(response.is_handled());
        assert!(Response::Handled.is_handled());
    }

    #[test]
    fn target_ignores_history_kind() {
        let id = StateId::new(MachineId::new(), 5);
        assert_eq!(Transition::To(id).target(), id);
        assert_eq!(Transition::History(id).target(), id);
        assert_eq!(Transition::DeepHistory(id).target(), id);
    }
}
