//! Robot layer: sensors in, motors out.
//!
//! This module connects the engine to a small two-wheeled robot:
//! - `Hardware` abstracts the raw I/O, with `SimulatedHardware` for tests
//! - `Robot` adds timer and rotation watches, speed clipping, and turns
//!   sensor readings into `RobotEvent`s
//! - `Driver` runs the poll-enqueue-drain loop
//!
//! Behaviors for a robot implement `State<RobotEvent, Robot<H>>` and drive
//! the robot through the context argument of every hook.

pub mod config;
pub mod control;
pub mod driver;
pub mod event;
pub mod hardware;
pub mod queue;

pub use config::{ConfigError, ConfigViolation, RobotConfig};
pub use control::Robot;
pub use driver::Driver;
pub use event::{DetectDirection, EventKind, RobotEvent};
pub use hardware::{Hardware, SimulatedHardware};
pub use queue::EventQueue;

use crate::builder::MachineBuilder;
use crate::engine::Machine;

/// Machine whose states drive a `Robot<H>`.
pub type RobotMachine<H> = Machine<RobotEvent, Robot<H>>;

/// Builder for a [`RobotMachine`].
pub type RobotMachineBuilder<H> = MachineBuilder<RobotEvent, Robot<H>>;

/// A builder whose transition log capacity follows `config`.
pub fn machine_builder<H>(config: &RobotConfig) -> RobotMachineBuilder<H> {
    let mut builder = RobotMachineBuilder::new();
    builder.log_capacity(config.log_capacity);
    builder
}
