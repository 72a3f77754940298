//! Transition algorithm: exit, re-link, entry, initialize.

use super::machine::Machine;
use crate::core::{Outcome, StateId, Transition, TransitionKind, TransitionRecord};
use chrono::Utc;
use tracing::{debug, trace, warn};

impl<E, C> Machine<E, C> {
    /// Enter the machine's default configuration.
    ///
    /// Equivalent to a transition to the root: nothing is exited or
    /// entered, and the root's initial transition selects the default
    /// substates. Once the machine has left the root this reports
    /// `StateTransitionFailed`, like any other transition into the root.
    pub fn start(&mut self, ctx: &mut C) -> Outcome {
        let root = self.root();
        self.perform(Transition::To(root), false, ctx)
    }

    /// Transition from the active leaf to `target`.
    ///
    /// States are exited innermost first up to the common parent, the
    /// active-child chain is rebuilt from the common parent down to
    /// `target`, states below the common parent are entered outermost
    /// first, then `target`'s initial transition runs. A target outside
    /// this machine yields `StateTransitionFailed` and changes nothing.
    pub fn transition_to_state(&mut self, target: StateId, ctx: &mut C) -> Outcome {
        self.perform(Transition::To(target), false, ctx)
    }

    /// Transition to `target`'s last active immediate substate, or to
    /// `target` itself when it has none.
    pub fn transition_to_history(&mut self, target: StateId, ctx: &mut C) -> Outcome {
        self.perform(Transition::History(target), false, ctx)
    }

    /// Transition to the last active leaf anywhere under `target`, or to
    /// `target` itself when it has no history.
    pub fn transition_to_deep_history(&mut self, target: StateId, ctx: &mut C) -> Outcome {
        self.perform(Transition::DeepHistory(target), false, ctx)
    }

    /// Resolve a transition request and carry it out.
    ///
    /// `chained` marks requests returned by an initial transition.
    pub(super) fn perform(&mut self, request: Transition, chained: bool, ctx: &mut C) -> Outcome {
        let Some(target) = self.resolve(request.target()) else {
            warn!(
                from = %self.active_state_name(),
                machine = %self.id,
                "Transition target belongs to another machine"
            );
            return Outcome::StateTransitionFailed;
        };

        let (resolved, kind) = match request {
            Transition::To(_) if chained => (target, TransitionKind::Initial),
            Transition::To(_) => (target, TransitionKind::Direct),
            Transition::History(_) => (
                self.nodes[target].active_child.unwrap_or(target),
                TransitionKind::History,
            ),
            Transition::DeepHistory(_) => (self.deepest(target), TransitionKind::DeepHistory),
        };

        self.transition(resolved, kind, ctx)
    }

    fn transition(&mut self, target: usize, kind: TransitionKind, ctx: &mut C) -> Outcome {
        let current = self.active_index();
        let Some(common) = self.common_parent(current, target) else {
            warn!(
                from = %self.nodes[current].name,
                to = %self.nodes[target].name,
                "No common parent for transition"
            );
            return Outcome::StateTransitionFailed;
        };

        // Exit from the active leaf up to, not including, the common parent.
        let mut s = current;
        while s != common {
            trace!(state = %self.nodes[s].name, "Exit");
            self.behaviors[s].on_exit(ctx);
            match self.nodes[s].parent {
                Some(parent) => s = parent,
                None => break,
            }
        }

        // Rebuild the active chain from the common parent down to the target.
        self.nodes[target].active_child = None;
        let mut s = target;
        while s != common {
            let Some(parent) = self.nodes[s].parent else {
                break;
            };
            self.nodes[parent].active_child = Some(s);
            s = parent;
        }

        // Enter from below the common parent down to the target.
        let mut next = self.nodes[common].active_child;
        while let Some(s) = next {
            trace!(state = %self.nodes[s].name, "Entry");
            self.behaviors[s].on_entry(ctx);
            next = self.nodes[s].active_child;
        }

        debug!(
            from = %self.nodes[current].name,
            to = %self.nodes[target].name,
            via = %self.nodes[common].name,
            ?kind,
            "Transitioned"
        );
        self.log.record(TransitionRecord {
            from: self.nodes[current].name.clone(),
            to: self.nodes[target].name.clone(),
            kind,
            timestamp: Utc::now(),
        });

        match self.behaviors[target].on_initialize(ctx) {
            Some(request) => self.perform(request, true, ctx),
            None => Outcome::Ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::MachineBuilder;
    use crate::core::{Outcome, State, StateId, Transition, TransitionKind};
    use crate::engine::Machine;

    /// Records every hook call as "<hook> <state>".
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Trace {
        fn take(&mut self) -> Vec<String> {
            std::mem::take(&mut self.0)
        }
    }

    struct Probe {
        name: &'static str,
        initial: Option<Transition>,
    }

    impl State<(), Trace> for Probe {
        fn on_entry(&mut self, trace: &mut Trace) {
            trace.0.push(format!("entry {}", self.name));
        }

        fn on_exit(&mut self, trace: &mut Trace) {
            trace.0.push(format!("exit {}", self.name));
        }

        fn on_initialize(&mut self, trace: &mut Trace) -> Option<Transition> {
            trace.0.push(format!("init {}", self.name));
            self.initial
        }
    }

    struct Tree {
        machine: Machine<(), Trace>,
        r: StateId,
        a: StateId,
        a1: StateId,
        a2: StateId,
        b: StateId,
        b1: StateId,
    }

    // R -> { A -> { A1, A2 }, B -> { B1 } }, A initializes to A1.
    fn tree() -> Tree {
        let mut builder = MachineBuilder::<(), Trace>::new();
        let r = builder.root("R");
        let a = builder.substate("A", r);
        let a1 = builder.substate("A1", a);
        let a2 = builder.substate("A2", a);
        let b = builder.substate("B", r);
        let b1 = builder.substate("B1", b);
        for (id, name) in [(r, "R"), (a1, "A1"), (a2, "A2"), (b, "B"), (b1, "B1")] {
            builder.behavior(
                id,
                Probe {
                    name,
                    initial: None,
                },
            );
        }
        builder.behavior(
            a,
            Probe {
                name: "A",
                initial: Some(Transition::To(a1)),
            },
        );
        Tree {
            machine: builder.build().unwrap(),
            r,
            a,
            a1,
            a2,
            b,
            b1,
        }
    }

    #[test]
    fn exits_innermost_first_and_enters_outermost_first() {
        let mut t = tree();
        let mut trace = Trace::default();
        assert_eq!(t.machine.transition_to_state(t.a2, &mut trace), Outcome::Ok);
        assert_eq!(trace.take(), vec!["entry A", "entry A2", "init A2"]);

        assert_eq!(t.machine.transition_to_state(t.b1, &mut trace), Outcome::Ok);
        assert_eq!(
            trace.take(),
            vec!["exit A2", "exit A", "entry B", "entry B1", "init B1"]
        );
        assert_eq!(t.machine.active_state(), t.b1);
    }

    #[test]
    fn sibling_transition_keeps_parent_entered() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.a2, &mut trace);
        trace.take();

        t.machine.transition_to_state(t.a1, &mut trace);
        assert_eq!(trace.take(), vec!["exit A2", "entry A1", "init A1"]);
    }

    #[test]
    fn self_transition_exits_and_reenters() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.b1, &mut trace);
        trace.take();

        assert_eq!(t.machine.transition_to_state(t.b1, &mut trace), Outcome::Ok);
        assert_eq!(trace.take(), vec!["exit B1", "entry B1", "init B1"]);
        assert_eq!(t.machine.active_state(), t.b1);
    }

    #[test]
    fn initial_transition_chains_to_default_substate() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.b1, &mut trace);
        trace.take();

        assert_eq!(t.machine.transition_to_state(t.a, &mut trace), Outcome::Ok);
        assert_eq!(
            trace.take(),
            vec!["exit B1", "exit B", "entry A", "init A", "entry A1", "init A1"]
        );
        assert_eq!(t.machine.active_state(), t.a1);
        assert_eq!(t.machine.log().last().unwrap().kind, TransitionKind::Initial);
    }

    #[test]
    fn transition_up_to_container_reenters_it() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.a2, &mut trace);
        trace.take();

        t.machine.transition_to_state(t.a, &mut trace);
        assert_eq!(
            trace.take(),
            vec!["exit A2", "exit A", "entry A", "init A", "entry A1", "init A1"]
        );
    }

    #[test]
    fn start_runs_root_initialize_only() {
        let mut t = tree();
        let mut trace = Trace::default();
        assert_eq!(t.machine.start(&mut trace), Outcome::Ok);
        assert_eq!(trace.take(), vec!["init R"]);
        assert_eq!(t.machine.active_state(), t.r);
    }

    #[test]
    fn transition_into_root_from_below_fails() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.b1, &mut trace);
        trace.take();
        let logged = t.machine.log().total();

        assert_eq!(
            t.machine.transition_to_state(t.r, &mut trace),
            Outcome::StateTransitionFailed
        );
        assert_eq!(t.machine.start(&mut trace), Outcome::StateTransitionFailed);
        assert!(trace.take().is_empty());
        assert_eq!(t.machine.active_state(), t.b1);
        assert_eq!(t.machine.log().total(), logged);
    }

    #[test]
    fn root_self_transition_reruns_initialize() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.start(&mut trace);
        trace.take();

        assert_eq!(t.machine.transition_to_state(t.r, &mut trace), Outcome::Ok);
        assert_eq!(trace.take(), vec!["init R"]);
        assert_eq!(t.machine.active_state(), t.r);
    }

    #[test]
    fn history_resumes_last_substate() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.a2, &mut trace);
        t.machine.transition_to_state(t.b1, &mut trace);
        trace.take();

        assert_eq!(t.machine.active_child(t.a), Some(t.a2));
        assert_eq!(t.machine.transition_to_history(t.a, &mut trace), Outcome::Ok);
        assert_eq!(
            trace.take(),
            vec!["exit B1", "exit B", "entry A", "entry A2", "init A2"]
        );
        assert_eq!(t.machine.active_state(), t.a2);
        assert_eq!(t.machine.log().last().unwrap().kind, TransitionKind::History);
    }

    #[test]
    fn history_without_record_is_a_plain_transition() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.a1, &mut trace);
        trace.take();

        assert_eq!(t.machine.transition_to_history(t.b, &mut trace), Outcome::Ok);
        assert_eq!(trace.take(), vec!["exit A1", "exit A", "entry B", "init B"]);
        assert_eq!(t.machine.active_state(), t.b);
    }

    #[test]
    fn deep_history_resumes_last_leaf() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.a2, &mut trace);
        t.machine.transition_to_state(t.b1, &mut trace);
        trace.take();

        assert_eq!(
            t.machine.transition_to_deep_history(t.r, &mut trace),
            Outcome::Ok
        );
        assert_eq!(trace.take(), vec!["exit B1", "entry B1", "init B1"]);
        assert_eq!(t.machine.active_state(), t.b1);
    }

    #[test]
    fn foreign_target_fails_without_side_effects() {
        let mut t = tree();
        let other = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.a1, &mut trace);
        trace.take();
        let logged = t.machine.log().total();

        assert_eq!(
            t.machine.transition_to_state(other.b1, &mut trace),
            Outcome::StateTransitionFailed
        );
        assert!(trace.take().is_empty());
        assert_eq!(t.machine.active_state(), t.a1);
        assert_eq!(t.machine.log().total(), logged);
    }

    #[test]
    fn every_transition_is_logged() {
        let mut t = tree();
        let mut trace = Trace::default();
        t.machine.transition_to_state(t.a2, &mut trace);
        t.machine.transition_to_state(t.b1, &mut trace);

        assert_eq!(t.machine.log().total(), 2);
        assert_eq!(t.machine.log().path(), vec!["R", "A2", "B1"]);
    }
}
