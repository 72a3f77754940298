//! Build errors for state trees.

use thiserror::Error;

/// A single problem found while validating a state tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("No root state. Call .root(name) before .build()")]
    MissingRoot,

    #[error("Multiple root states: {}", .names.join(", "))]
    MultipleRoots { names: Vec<String> },

    #[error("State name '{name}' is used more than once")]
    DuplicateName { name: String },

    #[error("Parent of state '{state}' belongs to another machine")]
    ForeignParent { state: String },

    #[error("Behavior bound to a state that belongs to another machine")]
    ForeignBehavior,
}

/// Every violation found in a state tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid state tree: {}", .violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct InvalidTree {
    pub violations: Vec<BuildError>,
}
