//! Robot hardware interface

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::HardwareError;

/// Which of the two front LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedSide {
    Left,
    Right,
}

/// Board status changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// Board initialized and ready
    Init,
    /// Board halted itself (low battery)
    Halt,
}

/// Notifications sent from the hardware side.
///
/// Purely informational; nothing here feeds back into input handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RobotEvent {
    Status(StatusEvent),
    /// Battery voltage in volts
    Voltage(f64),
}

/// Create the robot event channel
pub fn create_channels() -> (Sender<RobotEvent>, Receiver<RobotEvent>) {
    bounded(256)
}

/// Motion, LED, and sensor operations of the robot board.
///
/// Every operation returns the board's numeric status code or fails with a
/// [`HardwareError`]. Calls block until the board answers.
pub trait RobotHardware {
    /// Bring the board up. Must be called before anything else.
    fn init(&mut self) -> Result<i32, HardwareError>;

    fn forward(&mut self) -> Result<i32, HardwareError>;
    fn backward(&mut self) -> Result<i32, HardwareError>;
    /// Turn left by driving only the right wheel
    fn left(&mut self) -> Result<i32, HardwareError>;
    /// Turn right by driving only the left wheel
    fn right(&mut self) -> Result<i32, HardwareError>;
    /// Spin in place counter-clockwise
    fn left_with_rotation(&mut self) -> Result<i32, HardwareError>;
    /// Spin in place clockwise
    fn right_with_rotation(&mut self) -> Result<i32, HardwareError>;
    fn stop(&mut self) -> Result<i32, HardwareError>;

    fn increase_speed(&mut self) -> Result<i32, HardwareError>;
    fn decrease_speed(&mut self) -> Result<i32, HardwareError>;

    fn led_on(&mut self, side: LedSide) -> Result<i32, HardwareError>;
    fn led_off(&mut self, side: LedSide) -> Result<i32, HardwareError>;

    /// Give the board a chance to publish sensor events.
    ///
    /// Called periodically from the UI loop. Boards that push events on
    /// their own can leave this as a no-op.
    fn poll_telemetry(&mut self) {}
}
