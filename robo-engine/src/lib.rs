//! Robot engine for Robo - hardware interface, simulated board, and dispatcher

mod controller;
mod error;
mod hardware;
mod simulated;

pub use controller::{Controller, LedState, Outcome, Report};
pub use error::HardwareError;
pub use hardware::{create_channels, LedSide, RobotEvent, RobotHardware, StatusEvent};
pub use simulated::{Call, Journal, SimulatedRobot, SimulatorConfig};
