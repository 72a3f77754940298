//! Zumo HSM: a hierarchical state machine engine for small reactive robots
//!
//! States nest. A substate gets first refusal on every event and falls back
//! to its ancestors for anything it does not handle; entry and exit logic
//! is shared by every substate of a container; composite states can be
//! resumed where they were left off (history and deep history).
//!
//! # Core Concepts
//!
//! - **Event**: immutable message with a numeric kind tag, via the `Event` trait
//! - **State**: behavior bound to a node of a static tree, via the `State` trait
//! - **Machine**: arena of states plus the transition and dispatch algorithms
//! - **Robot**: hardware boundary and polling driver for a two-wheeled robot
//!
//! # Example
//!
//! ```rust
//! use zumo_hsm::{Event, MachineBuilder, Outcome, Response, State, StateId, Transition};
//!
//! #[derive(Debug)]
//! enum Door {
//!     Open,
//!     Close,
//! }
//!
//! impl Event for Door {
//!     fn kind(&self) -> u8 {
//!         match self {
//!             Self::Open => 0,
//!             Self::Close => 1,
//!         }
//!     }
//!
//!     fn label(&self) -> &'static str {
//!         match self {
//!             Self::Open => "open",
//!             Self::Close => "close",
//!         }
//!     }
//! }
//!
//! struct Closed {
//!     opened: StateId,
//! }
//!
//! impl State<Door, ()> for Closed {
//!     fn on_event(&mut self, event: &Door, _: &mut ()) -> Response {
//!         match event {
//!             Door::Open => Transition::To(self.opened).into(),
//!             Door::Close => Response::Unhandled,
//!         }
//!     }
//! }
//!
//! let mut builder = MachineBuilder::<Door, ()>::new();
//! let root = builder.root("Door");
//! let closed = builder.substate("Closed", root);
//! let opened = builder.substate("Opened", root);
//! builder.behavior(closed, Closed { opened });
//!
//! let mut machine = builder.build().unwrap();
//! machine.transition_to_state(closed, &mut ());
//!
//! assert_eq!(machine.handle_event(&Door::Close, &mut ()), Outcome::EventNotHandled);
//! assert_eq!(machine.handle_event(&Door::Open, &mut ()), Outcome::Ok);
//! assert_eq!(machine.active_state_name(), "Opened");
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod robot;

// Re-export commonly used types
pub use builder::{BuildError, InvalidTree, MachineBuilder};
pub use core::{Composite, Event, Outcome, Response, State, StateId, Transition};
pub use engine::Machine;
