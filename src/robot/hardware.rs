//! Hardware boundary.
//!
//! Everything the robot layer reads or drives goes through `Hardware`, so
//! the state machine can run against [`SimulatedHardware`] in tests.

/// Raw robot I/O.
pub trait Hardware {
    /// Milliseconds since power-up, monotonic.
    fn now_ms(&self) -> u64;

    /// Whether the start button was pressed since the last call (debounced).
    fn start_pressed(&mut self) -> bool;

    /// Reflectance of the left, centre and right line sensors.
    ///
    /// Low readings mean the dark ring boundary.
    fn line_sensors(&mut self) -> [u16; 3];

    /// Front proximity counts with the left and right emitters.
    fn proximity(&mut self) -> (u8, u8);

    fn left_encoder(&mut self) -> i32;

    fn reset_left_encoder(&mut self);

    fn set_motor_speeds(&mut self, left: i16, right: i16);

    /// Replace the text on the display.
    fn show(&mut self, text: &str);
}

/// In-memory hardware for tests and demos.
///
/// Inputs are plain fields set by the caller; outputs are recorded.
#[derive(Clone, Debug, Default)]
pub struct SimulatedHardware {
    pub now_ms: u64,
    /// Consumed by the next `start_pressed` call.
    pub start_pending: bool,
    pub line: [u16; 3],
    pub proximity: (u8, u8),
    pub left_encoder: i32,
    pub motor_speeds: (i16, i16),
    /// Every text shown, oldest first.
    pub shown: Vec<String>,
}

impl SimulatedHardware {
    /// Hardware standing on a bright ring surface with nothing in view.
    pub fn on_ring() -> Self {
        Self {
            line: [1000, 1000, 1000],
            ..Self::default()
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn press_start(&mut self) {
        self.start_pending = true;
    }

    /// Last text shown.
    pub fn display(&self) -> Option<&str> {
        self.shown.last().map(String::as_str)
    }
}

impl Hardware for SimulatedHardware {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn start_pressed(&mut self) -> bool {
        std::mem::take(&mut self.start_pending)
    }

    fn line_sensors(&mut self) -> [u16; 3] {
        self.line
    }

    fn proximity(&mut self) -> (u8, u8) {
        self.proximity
    }

    fn left_encoder(&mut self) -> i32 {
        self.left_encoder
    }

    fn reset_left_encoder(&mut self) {
        self.left_encoder = 0;
    }

    fn set_motor_speeds(&mut self, left: i16, right: i16) {
        self.motor_speeds = (left, right);
    }

    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}
