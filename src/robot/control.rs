//! Actuation and event generation on top of raw hardware.

use crate::robot::config::RobotConfig;
use crate::robot::event::{DetectDirection, RobotEvent};
use crate::robot::hardware::Hardware;
use crate::robot::queue::EventQueue;
use tracing::trace;

/// The robot as seen by state behaviors.
///
/// Holds the timer and encoder "registers" that turn deadlines and
/// rotation targets into events, and the current motor speeds.
#[derive(Debug)]
pub struct Robot<H> {
    hardware: H,
    config: RobotConfig,
    timer_deadline: Option<u64>,
    encoder_target: Option<i32>,
    left_speed: i16,
    right_speed: i16,
}

impl<H: Hardware> Robot<H> {
    /// The configuration is not checked here; [`Driver::new`](crate::robot::Driver::new)
    /// rejects an invalid one.
    pub fn new(hardware: H, config: RobotConfig) -> Self {
        Self {
            hardware,
            config,
            timer_deadline: None,
            encoder_target: None,
            left_speed: 0,
            right_speed: 0,
        }
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Current (left, right) motor speeds.
    pub fn speeds(&self) -> (i16, i16) {
        (self.left_speed, self.right_speed)
    }

    pub fn timer_armed(&self) -> bool {
        self.timer_deadline.is_some()
    }

    pub fn encoder_armed(&self) -> bool {
        self.encoder_target.is_some()
    }

    /// Show a short status message.
    pub fn display(&mut self, message: &str) {
        self.hardware.show(message);
    }

    /// Arm the one-shot timer to fire `timeout_ms` from now.
    pub fn start_timer(&mut self, timeout_ms: u64) {
        self.timer_deadline = Some(self.hardware.now_ms().saturating_add(timeout_ms));
    }

    pub fn cancel_timer(&mut self) {
        self.timer_deadline = None;
    }

    pub fn move_forward(&mut self, speed: i16) {
        self.move_wheels(speed, speed);
    }

    /// Set both wheel speeds, clipped to the configured range.
    pub fn move_wheels(&mut self, left: i16, right: i16) {
        let limit = self.config.max_speed.max(0);
        self.left_speed = left.clamp(-limit, limit);
        self.right_speed = right.clamp(-limit, limit);
        self.hardware.set_motor_speeds(self.left_speed, self.right_speed);
    }

    pub fn change_speed_by(&mut self, delta: i16) {
        self.change_wheel_speeds_by(delta, delta);
    }

    pub fn change_wheel_speeds_by(&mut self, left_delta: i16, right_delta: i16) {
        self.move_wheels(
            self.left_speed.saturating_add(left_delta),
            self.right_speed.saturating_add(right_delta),
        );
    }

    pub fn stop(&mut self) {
        self.move_wheels(0, 0);
    }

    /// Rotate counter-clockwise in place; an encoder event fires after
    /// roughly `degrees` of rotation.
    pub fn spin_left(&mut self, degrees: i16, speed: i16) {
        self.watch_rotation(degrees);
        self.move_wheels(-speed, speed);
    }

    /// Rotate clockwise in place; an encoder event fires after roughly
    /// `degrees` of rotation.
    pub fn spin_right(&mut self, degrees: i16, speed: i16) {
        self.watch_rotation(degrees);
        self.move_wheels(speed, -speed);
    }

    pub fn cancel_encoder(&mut self) {
        self.encoder_target = None;
    }

    /// Poll every input source and enqueue at most one event per source,
    /// in the order start, timer, boundary, encoder, proximity.
    ///
    /// Timer and encoder watches disarm when they fire. Boundary events
    /// are only queued when a boundary is seen; a proximity event is
    /// queued every poll, with direction `None` when nothing is in view.
    pub fn generate_events(&mut self, queue: &mut EventQueue<RobotEvent>) {
        if self.hardware.start_pressed() {
            queue.push(RobotEvent::Start);
        }

        if let Some(deadline) = self.timer_deadline {
            if self.hardware.now_ms() >= deadline {
                self.timer_deadline = None;
                queue.push(RobotEvent::Timer);
            }
        }

        let boundary = self.detect_boundary();
        if boundary != DetectDirection::None {
            queue.push(RobotEvent::Boundary {
                direction: boundary,
            });
        }

        if let Some(target) = self.encoder_target {
            if self.hardware.left_encoder().unsigned_abs() > target.unsigned_abs() {
                self.encoder_target = None;
                queue.push(RobotEvent::Encoder);
            }
        }

        queue.push(self.detect_proximity());
    }

    /// Centre sensor, or both side sensors, over the boundary means ahead.
    pub fn detect_boundary(&mut self) -> DetectDirection {
        let threshold = self.config.boundary_threshold;
        let [left, centre, right] = self.hardware.line_sensors().map(|v| v < threshold);

        if centre || (left && right) {
            DetectDirection::Ahead
        } else if left {
            DetectDirection::Left
        } else if right {
            DetectDirection::Right
        } else {
            DetectDirection::None
        }
    }

    /// The brighter side wins; equal readings mean ahead.
    pub fn detect_proximity(&mut self) -> RobotEvent {
        let threshold = self.config.proximity_threshold;
        let (left, right) = self.hardware.proximity();

        let direction = if left < threshold && right < threshold {
            DetectDirection::None
        } else if left > right {
            DetectDirection::Left
        } else if right > left {
            DetectDirection::Right
        } else {
            DetectDirection::Ahead
        };

        RobotEvent::Proximity {
            direction,
            left_brightness: left,
            right_brightness: right,
        }
    }

    fn watch_rotation(&mut self, degrees: i16) {
        let counts = i32::from(degrees).saturating_mul(self.config.encoder_counts_per_degree);
        trace!(degrees, counts, "Watching rotation");
        self.encoder_target = (counts != 0).then_some(counts);
        self.hardware.reset_left_encoder();
    }
}
