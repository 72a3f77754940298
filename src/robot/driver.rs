//! The polling loop that feeds the state machine.

use crate::core::Outcome;
use crate::engine::Machine;
use crate::robot::config::ConfigError;
use crate::robot::control::Robot;
use crate::robot::event::RobotEvent;
use crate::robot::hardware::Hardware;
use crate::robot::queue::EventQueue;
use tracing::debug;

/// Owns the machine, the robot it drives, and the event queue between them.
///
/// Each `tick` polls the hardware once and drains the queue, dispatching
/// one event at a time to completion. Whenever a dispatch changes state,
/// the new active state's name is shown on the display.
pub struct Driver<H> {
    machine: Machine<RobotEvent, Robot<H>>,
    robot: Robot<H>,
    queue: EventQueue<RobotEvent>,
}

impl<H: Hardware> Driver<H> {
    /// Assemble a driver, rejecting a robot whose configuration is invalid.
    pub fn new(
        machine: Machine<RobotEvent, Robot<H>>,
        robot: Robot<H>,
    ) -> Result<Self, ConfigError> {
        robot.config().check()?;
        let queue = EventQueue::with_capacity(robot.config().queue_capacity);
        Ok(Self {
            machine,
            robot,
            queue,
        })
    }

    /// Run the root's initial transition and show the resulting state.
    ///
    /// The display is left alone when no transition took place.
    pub fn start(&mut self) -> Outcome {
        let before = self.machine.log().total();
        let outcome = self.machine.start(&mut self.robot);
        self.show_if_changed(before, outcome);
        outcome
    }

    /// Poll once, then dispatch every queued event in arrival order.
    ///
    /// Returns each dispatch's outcome. Callers are free to ignore them.
    pub fn tick(&mut self) -> Vec<Outcome> {
        self.robot.generate_events(&mut self.queue);

        let mut outcomes = Vec::with_capacity(self.queue.len());
        while let Some(event) = self.queue.pop() {
            outcomes.push(self.dispatch(&event));
        }
        outcomes
    }

    /// Dispatch a single event immediately, bypassing the queue.
    pub fn dispatch(&mut self, event: &RobotEvent) -> Outcome {
        let before = self.machine.log().total();
        let outcome = self.machine.handle_event(event, &mut self.robot);
        self.show_if_changed(before, outcome);
        outcome
    }

    pub fn machine(&self) -> &Machine<RobotEvent, Robot<H>> {
        &self.machine
    }

    pub fn robot(&self) -> &Robot<H> {
        &self.robot
    }

    pub fn robot_mut(&mut self) -> &mut Robot<H> {
        &mut self.robot
    }

    /// Events waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn show_if_changed(&mut self, before: u64, outcome: Outcome) {
        if self.machine.log().total() != before {
            debug!(active = %self.machine.active_state_name(), ?outcome, "State changed");
            self.robot.display(self.machine.active_state_name());
        }
    }
}
