//! Core hierarchical state machine types.
//!
//! This module holds the pieces shared by every machine:
//! - Events via the `Event` trait
//! - State behaviors via the `State` trait, with `Response` and `Transition`
//! - Handles (`StateId`, `MachineId`) into a machine's state arena
//! - The `Outcome` codes every operation reports
//! - The bounded transition log

mod event;
mod history;
mod id;
mod outcome;
mod state;

pub use event::Event;
pub use history::{TransitionKind, TransitionLog, TransitionRecord};
pub use id::{MachineId, StateId};
pub use outcome::Outcome;
pub use state::{Composite, Response, State, Transition};
