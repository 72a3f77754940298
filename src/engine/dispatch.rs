//! Event dispatch with bubbling through ancestor states.

use super::machine::Machine;
use crate::core::{Event, Outcome, Response};
use tracing::{trace, warn};

impl<E: Event, C> Machine<E, C> {
    /// Offer `event` to the active leaf, then to each ancestor in turn,
    /// until one consumes it.
    ///
    /// A consuming handler may request a transition, which is performed
    /// before this returns. A consumed event reports `Ok` even when that
    /// transition fails; the failure is logged and the active state is
    /// left unchanged. `EventNotHandled` is reported when even the root
    /// declines the event, and is not an error.
    pub fn handle_event(&mut self, event: &E, ctx: &mut C) -> Outcome {
        let mut next = Some(self.active_index());
        while let Some(s) = next {
            match self.behaviors[s].on_event(event, ctx) {
                Response::Unhandled => {
                    trace!(state = %self.nodes[s].name, event = event.label(), "Bubbling");
                    next = self.nodes[s].parent;
                }
                Response::Handled => {
                    trace!(state = %self.nodes[s].name, event = event.label(), "Handled");
                    return Outcome::Ok;
                }
                Response::Transition(request) => {
                    trace!(
                        state = %self.nodes[s].name,
                        event = event.label(),
                        ?request,
                        "Handled"
                    );
                    let outcome = self.perform(request, false, ctx);
                    if !outcome.is_ok() {
                        warn!(
                            state = %self.nodes[s].name,
                            event = event.label(),
                            ?request,
                            code = outcome.code(),
                            "Requested transition failed"
                        );
                    }
                    return Outcome::Ok;
                }
            }
        }

        trace!(
            event = event.label(),
            active = %self.active_state_name(),
            "Event not handled"
        );
        Outcome::EventNotHandled
    }
}
