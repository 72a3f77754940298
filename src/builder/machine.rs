//! Builder for constructing state trees.

use crate::builder::error::{BuildError, InvalidTree};
use crate::core::{Composite, MachineId, State, StateId, TransitionLog};
use crate::engine::{Machine, Node};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for a machine's state tree.
///
/// States are declared parent first, each call returning the new state's
/// handle. Behaviors are bound afterwards, so handlers can be given the
/// handles of any state they transition to. A state with no bound
/// behavior gets [`Composite`], which ignores every event.
///
/// # Example
///
/// ```rust
/// use zumo_hsm::builder::MachineBuilder;
/// use zumo_hsm::core::{Response, State, StateId, Transition};
///
/// #[derive(Debug)]
/// struct Tick;
///
/// impl zumo_hsm::core::Event for Tick {
///     fn kind(&self) -> u8 { 0 }
///     fn label(&self) -> &'static str { "tick" }
/// }
///
/// struct Blink { next: StateId }
///
/// impl State<Tick, ()> for Blink {
///     fn on_event(&mut self, _: &Tick, _: &mut ()) -> Response {
///         Transition::To(self.next).into()
///     }
/// }
///
/// let mut builder = MachineBuilder::<Tick, ()>::new();
/// let root = builder.root("Lamp");
/// let on = builder.substate("On", root);
/// let off = builder.substate("Off", root);
/// builder.behavior(on, Blink { next: off });
/// builder.behavior(off, Blink { next: on });
///
/// let mut machine = builder.build().unwrap();
/// machine.transition_to_state(off, &mut ());
/// machine.handle_event(&Tick, &mut ());
/// assert_eq!(machine.active_state_name(), "On");
/// ```
pub struct MachineBuilder<E, C> {
    id: MachineId,
    names: Vec<String>,
    parents: Vec<Option<StateId>>,
    behaviors: Vec<Option<Box<dyn State<E, C>>>>,
    foreign_behaviors: usize,
    log_capacity: usize,
}

impl<E, C> MachineBuilder<E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            id: MachineId::new(),
            names: Vec::new(),
            parents: Vec::new(),
            behaviors: Vec::new(),
            foreign_behaviors: 0,
            log_capacity: TransitionLog::DEFAULT_CAPACITY,
        }
    }

    /// Declare the root state.
    pub fn root(&mut self, name: impl Into<String>) -> StateId {
        self.push(name.into(), None)
    }

    /// Declare a state contained in `parent`.
    pub fn substate(&mut self, name: impl Into<String>, parent: StateId) -> StateId {
        self.push(name.into(), Some(parent))
    }

    /// Bind a behavior to a declared state, replacing any earlier one.
    pub fn behavior<S>(&mut self, state: StateId, behavior: S) -> &mut Self
    where
        S: State<E, C> + 'static,
    {
        match self.owned(state) {
            Some(index) => self.behaviors[index] = Some(Box::new(behavior)),
            None => self.foreign_behaviors += 1,
        }
        self
    }

    /// Number of transitions the machine's log retains.
    pub fn log_capacity(&mut self, capacity: usize) -> &mut Self {
        self.log_capacity = capacity;
        self
    }

    /// Check the tree, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        let roots: Vec<String> = self
            .parents
            .iter()
            .zip(&self.names)
            .filter(|(parent, _)| parent.is_none())
            .map(|(_, name)| name.clone())
            .collect();
        checks.push(match roots.len() {
            0 => Validation::fail(BuildError::MissingRoot),
            1 => Validation::success(()),
            _ => Validation::fail(BuildError::MultipleRoots { names: roots }),
        });

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for name in &self.names {
            if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
                checks.push(Validation::fail(BuildError::DuplicateName {
                    name: name.clone(),
                }));
            }
        }

        for (parent, name) in self.parents.iter().zip(&self.names) {
            if let Some(parent) = parent {
                if self.owned(*parent).is_none() {
                    checks.push(Validation::fail(BuildError::ForeignParent {
                        state: name.clone(),
                    }));
                }
            }
        }

        for _ in 0..self.foreign_behaviors {
            checks.push(Validation::fail(BuildError::ForeignBehavior));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the machine.
    ///
    /// The machine starts with the root as its active state; call
    /// [`Machine::start`] to run the root's initial transition.
    pub fn build(self) -> Result<Machine<E, C>, InvalidTree> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(InvalidTree {
                violations: errors.iter().cloned().collect(),
            });
        }

        let Some(root) = self.parents.iter().position(Option::is_none) else {
            return Err(InvalidTree {
                violations: vec![BuildError::MissingRoot],
            });
        };

        let nodes = self
            .names
            .into_iter()
            .zip(&self.parents)
            .map(|(name, parent)| Node {
                name,
                parent: parent.map(|p| p.index()),
                active_child: None,
            })
            .collect();

        let behaviors = self
            .behaviors
            .into_iter()
            .map(|behavior| {
                behavior.unwrap_or_else(|| Box::new(Composite) as Box<dyn State<E, C>>)
            })
            .collect();

        Ok(Machine::from_parts(
            self.id,
            nodes,
            behaviors,
            root,
            TransitionLog::with_capacity(self.log_capacity),
        ))
    }

    fn push(&mut self, name: String, parent: Option<StateId>) -> StateId {
        let id = StateId::new(self.id, self.names.len());
        self.names.push(name);
        self.parents.push(parent);
        self.behaviors.push(None);
        id
    }

    /// Arena index of a handle issued by this builder.
    fn owned(&self, state: StateId) -> Option<usize> {
        let owned = state.machine() == self.id && state.index() < self.names.len();
        owned.then_some(state.index())
    }
}

impl<E, C> Default for MachineBuilder<E, C> {
    fn default() -> Self {
        Self::new()
    }
}
