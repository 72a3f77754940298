//! State arena and tree queries.

use crate::core::{MachineId, State, StateId, TransitionLog};
use std::fmt;

/// Position of one state in the tree.
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<usize>,
    pub(crate) active_child: Option<usize>,
}

/// Hierarchical state machine.
///
/// States live in an arena addressed by `StateId`. Parent links are fixed
/// when the machine is built; active-child links change only inside the
/// transition algorithm. Following active children from the root always
/// ends at exactly one leaf, the active state.
///
/// Machines are assembled with [`MachineBuilder`](crate::builder::MachineBuilder).
pub struct Machine<E, C> {
    pub(super) id: MachineId,
    pub(super) nodes: Vec<Node>,
    pub(super) behaviors: Vec<Box<dyn State<E, C>>>,
    pub(super) root: usize,
    pub(super) log: TransitionLog,
}

impl<E, C> Machine<E, C> {
    pub(crate) fn from_parts(
        id: MachineId,
        nodes: Vec<Node>,
        behaviors: Vec<Box<dyn State<E, C>>>,
        root: usize,
        log: TransitionLog,
    ) -> Self {
        debug_assert_eq!(nodes.len(), behaviors.len());
        Self {
            id,
            nodes,
            behaviors,
            root,
            log,
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    /// Number of states in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of every state, in build order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.nodes.len()).map(|index| self.handle(index))
    }

    /// The root state.
    pub fn root(&self) -> StateId {
        self.handle(self.root)
    }

    /// Walk parent links from `state` to the root of its tree.
    pub fn root_of(&self, state: StateId) -> Option<StateId> {
        let mut s = self.resolve(state)?;
        while let Some(parent) = self.nodes[s].parent {
            s = parent;
        }
        Some(self.handle(s))
    }

    pub fn parent(&self, state: StateId) -> Option<StateId> {
        let s = self.resolve(state)?;
        self.nodes[s].parent.map(|p| self.handle(p))
    }

    /// The immediate substate last made active under `state`.
    pub fn active_child(&self, state: StateId) -> Option<StateId> {
        let s = self.resolve(state)?;
        self.nodes[s].active_child.map(|c| self.handle(c))
    }

    pub fn name(&self, state: StateId) -> Option<&str> {
        self.resolve(state).map(|s| self.nodes[s].name.as_str())
    }

    /// Look up a state by its debug name.
    pub fn state_named(&self, name: &str) -> Option<StateId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(|index| self.handle(index))
    }

    /// The active leaf.
    pub fn active_state(&self) -> StateId {
        self.handle(self.active_index())
    }

    pub fn active_state_name(&self) -> &str {
        &self.nodes[self.active_index()].name
    }

    /// Whether `state` lies on the active chain from the root to the leaf.
    pub fn is_active(&self, state: StateId) -> bool {
        let Some(target) = self.resolve(state) else {
            return false;
        };
        let mut next = Some(self.root);
        while let Some(s) = next {
            if s == target {
                return true;
            }
            next = self.nodes[s].active_child;
        }
        false
    }

    /// Nearest state that contains both `a` and `b`.
    ///
    /// `a` counts as its own ancestor, `b` does not, which makes the search
    /// asymmetric when one state contains the other. The result bounds the
    /// exit and entry ranges of a transition from `a` to `b`: transitioning
    /// to a containing state exits and re-enters it, transitioning to a
    /// state to itself exits and re-enters it through its parent.
    ///
    /// The root is its own common parent with itself. No other state has a
    /// common parent with the root as `b`, so a transition into the root
    /// from anywhere below it fails. Handles from another machine have no
    /// common parent.
    pub fn find_common_parent(&self, a: StateId, b: StateId) -> Option<StateId> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        self.common_parent(a, b).map(|s| self.handle(s))
    }

    /// The transition log.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    pub(super) fn common_parent(&self, a: usize, b: usize) -> Option<usize> {
        // The root has no strict ancestors; only its self-transition resolves.
        if a == b && self.nodes[a].parent.is_none() {
            return Some(a);
        }

        let mut left = Some(a);
        while let Some(l) = left {
            let mut right = self.nodes[b].parent;
            while let Some(r) = right {
                if r == l {
                    return Some(r);
                }
                right = self.nodes[r].parent;
            }
            left = self.nodes[l].parent;
        }
        None
    }

    pub(super) fn active_index(&self) -> usize {
        self.deepest(self.root)
    }

    /// Follow active-child links from `s` to the end of the chain.
    pub(super) fn deepest(&self, mut s: usize) -> usize {
        while let Some(child) = self.nodes[s].active_child {
            s = child;
        }
        s
    }

    pub(super) fn resolve(&self, state: StateId) -> Option<usize> {
        let owned = state.machine() == self.id && state.index() < self.nodes.len();
        owned.then_some(state.index())
    }

    pub(super) fn handle(&self, index: usize) -> StateId {
        StateId::new(self.id, index)
    }
}

impl<E, C> fmt::Debug for Machine<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("states", &self.nodes.len())
            .field("root", &self.nodes[self.root].name)
            .field("active", &self.active_state_name())
            .finish()
    }
}
