//! The hierarchical state machine engine.
//!
//! # Key Concepts
//!
//! - **Arena**: states are nodes addressed by `StateId`; the tree shape is
//!   fixed at build time
//! - **Transitions**: exit innermost first, enter outermost first, then run
//!   the target's initial transition
//! - **History**: resume a composite state at its last active substate or leaf
//! - **Dispatch**: events bubble from the active leaf towards the root
//!
//! Everything runs synchronously on the caller's thread. Hooks request
//! transitions by return value, so a transition never starts while another
//! one is in flight.

mod dispatch;
mod machine;
mod transition;

pub(crate) use machine::Node;
pub use machine::Machine;
