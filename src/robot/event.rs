//! Events produced by the robot's input sources.

use crate::core::Event;
use serde::{Deserialize, Serialize};

/// Direction of a detection, shared by boundary and proximity sensors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectDirection {
    #[default]
    None,
    Left,
    Ahead,
    Right,
}

/// One tag per `RobotEvent` variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventKind {
    Boundary = 0,
    Encoder = 1,
    Proximity = 2,
    Start = 3,
    Timer = 4,
}

/// Something that happened on the robot.
///
/// A fresh value is built for each occurrence, so a payload can never be
/// overwritten by a later poll while a handler is still reading it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotEvent {
    /// Ring boundary seen by the line sensors.
    Boundary { direction: DetectDirection },
    /// Left wheel encoder passed the watched count.
    Encoder,
    /// Front proximity reading. Sent every cycle, with `None` when clear.
    Proximity {
        direction: DetectDirection,
        left_brightness: u8,
        right_brightness: u8,
    },
    /// Start button pressed.
    Start,
    /// One-shot timer expired.
    Timer,
}

impl RobotEvent {
    pub fn event_kind(&self) -> EventKind {
        match self {
            Self::Boundary { .. } => EventKind::Boundary,
            Self::Encoder => EventKind::Encoder,
            Self::Proximity { .. } => EventKind::Proximity,
            Self::Start => EventKind::Start,
            Self::Timer => EventKind::Timer,
        }
    }
}

impl Event for RobotEvent {
    fn kind(&self) -> u8 {
        self.event_kind() as u8
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Boundary { .. } => "bdy",
            Self::Encoder => "enc",
            Self::Proximity { .. } => "prox",
            Self::Start => "start",
            Self::Timer => "timer",
        }
    }
}
