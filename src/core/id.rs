//! Handles for machines and the states they own.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one machine instance.
///
/// Every builder mints a fresh id, so handles from two machines never
/// compare equal even when their arena indices coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stable handle to a state inside a machine's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId {
    machine: MachineId,
    index: usize,
}

impl StateId {
    pub(crate) fn new(machine: MachineId, index: usize) -> Self {
        Self { machine, index }
    }

    /// Machine that issued this handle.
    pub fn machine(&self) -> MachineId {
        self.machine
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }
}
