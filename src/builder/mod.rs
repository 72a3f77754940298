//! Builder API for assembling state trees.
//!
//! The builder hands out `StateId`s as states are declared and validates
//! the finished tree before producing a [`Machine`](crate::engine::Machine).

pub mod error;
pub mod machine;

pub use error::{BuildError, InvalidTree};
pub use machine::MachineBuilder;
