//! In-process stand-in for the robot board
//!
//! Tracks speed, motion, LEDs, and a slowly draining battery. Every call is
//! appended to a shared [`Journal`] so the dispatch order can be checked
//! from the outside.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::HardwareError;
use crate::hardware::{LedSide, RobotEvent, RobotHardware, StatusEvent};

/// Status code the board returns for an accepted command
const STATUS_OK: i32 = 1;
/// Status code for a command the halted board ignored
const STATUS_IGNORED: i32 = 0;

/// Default motor speed (0-255)
const DEFAULT_SPEED: u8 = 200;
/// Speed change per increase/decrease
const SPEED_STEP: u8 = 10;

/// Simulator settings
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Battery voltage at startup
    pub battery_voltage: f64,
    /// Board halts below this voltage
    pub min_voltage: f64,
    /// Voltage lost per motion command
    pub drain_per_move: f64,
    /// How often a voltage reading is published
    pub telemetry_interval: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            battery_voltage: 12.0,
            min_voltage: 5.5,
            drain_per_move: 0.005,
            telemetry_interval: Duration::from_secs(5),
        }
    }
}

/// A single board call, as recorded in the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Init,
    Forward,
    Backward,
    Left,
    Right,
    LeftWithRotation,
    RightWithRotation,
    Stop,
    IncreaseSpeed,
    DecreaseSpeed,
    LedOn(LedSide),
    LedOff(LedSide),
}

impl Call {
    fn name(self) -> &'static str {
        match self {
            Call::Init => "init",
            Call::Forward => "forward",
            Call::Backward => "backward",
            Call::Left => "left",
            Call::Right => "right",
            Call::LeftWithRotation => "left_with_rotation",
            Call::RightWithRotation => "right_with_rotation",
            Call::Stop => "stop",
            Call::IncreaseSpeed => "increase_speed",
            Call::DecreaseSpeed => "decrease_speed",
            Call::LedOn(_) => "led_on",
            Call::LedOff(_) => "led_off",
        }
    }

    fn is_motion(self) -> bool {
        matches!(
            self,
            Call::Forward
                | Call::Backward
                | Call::Left
                | Call::Right
                | Call::LeftWithRotation
                | Call::RightWithRotation
        )
    }
}

/// Shared record of board calls
#[derive(Debug, Clone, Default)]
pub struct Journal {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Journal {
    /// Snapshot of all calls so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn push(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

/// What the wheels are doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Stopped,
    Moving(Call),
}

/// Simulated robot board
pub struct SimulatedRobot {
    config: SimulatorConfig,
    events: Sender<RobotEvent>,
    journal: Journal,
    initialized: bool,
    halted: bool,
    speed: u8,
    motion: Motion,
    leds: [bool; 2],
    voltage: f64,
    last_telemetry: Option<Instant>,
    /// Calls allowed before every call fails with an IO error
    fail_after: Option<usize>,
    call_count: usize,
}

impl SimulatedRobot {
    pub fn new(config: SimulatorConfig, events: Sender<RobotEvent>) -> Self {
        let voltage = config.battery_voltage;
        Self {
            config,
            events,
            journal: Journal::default(),
            initialized: false,
            halted: false,
            speed: DEFAULT_SPEED,
            motion: Motion::Stopped,
            leds: [false; 2],
            voltage,
            last_telemetry: None,
            fail_after: None,
            call_count: 0,
        }
    }

    /// Make every call after the first `calls` fail like a dead link
    pub fn with_failure_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Handle to the call journal
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn is_moving(&self) -> bool {
        self.motion != Motion::Stopped
    }

    /// The motion call currently driving the wheels
    pub fn current_motion(&self) -> Option<Call> {
        match self.motion {
            Motion::Stopped => None,
            Motion::Moving(call) => Some(call),
        }
    }

    pub fn led(&self, side: LedSide) -> bool {
        self.leds[led_index(side)]
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    fn publish(&self, event: RobotEvent) {
        // Nobody listening is fine
        let _ = self.events.try_send(event);
    }

    /// Common bookkeeping for every board call
    fn begin(&mut self, call: Call) -> Result<(), HardwareError> {
        self.journal.push(call);
        self.call_count += 1;

        if let Some(limit) = self.fail_after {
            if self.call_count > limit {
                return Err(HardwareError::io(
                    call.name(),
                    std::io::Error::new(std::io::ErrorKind::BrokenPipe, "board link lost"),
                ));
            }
        }

        if call != Call::Init && !self.initialized {
            return Err(HardwareError::NotInitialized);
        }

        debug!(call = call.name(), "board call");
        Ok(())
    }

    fn drive(&mut self, call: Call) -> Result<i32, HardwareError> {
        self.begin(call)?;
        if self.halted {
            warn!(call = call.name(), "board halted, ignoring motion");
            return Ok(STATUS_IGNORED);
        }
        debug_assert!(call.is_motion());
        self.motion = Motion::Moving(call);
        self.voltage = (self.voltage - self.config.drain_per_move).max(0.0);
        Ok(STATUS_OK)
    }

    fn set_led(&mut self, side: LedSide, on: bool) -> Result<i32, HardwareError> {
        self.begin(if on { Call::LedOn(side) } else { Call::LedOff(side) })?;
        self.leds[led_index(side)] = on;
        Ok(STATUS_OK)
    }
}

fn led_index(side: LedSide) -> usize {
    match side {
        LedSide::Left => 0,
        LedSide::Right => 1,
    }
}

impl RobotHardware for SimulatedRobot {
    fn init(&mut self) -> Result<i32, HardwareError> {
        self.begin(Call::Init)?;
        self.initialized = true;
        self.publish(RobotEvent::Status(StatusEvent::Init));
        self.publish(RobotEvent::Voltage(self.voltage));
        self.last_telemetry = Some(Instant::now());
        Ok(STATUS_OK)
    }

    fn forward(&mut self) -> Result<i32, HardwareError> {
        self.drive(Call::Forward)
    }

    fn backward(&mut self) -> Result<i32, HardwareError> {
        self.drive(Call::Backward)
    }

    fn left(&mut self) -> Result<i32, HardwareError> {
        self.drive(Call::Left)
    }

    fn right(&mut self) -> Result<i32, HardwareError> {
        self.drive(Call::Right)
    }

    fn left_with_rotation(&mut self) -> Result<i32, HardwareError> {
        self.drive(Call::LeftWithRotation)
    }

    fn right_with_rotation(&mut self) -> Result<i32, HardwareError> {
        self.drive(Call::RightWithRotation)
    }

    fn stop(&mut self) -> Result<i32, HardwareError> {
        self.begin(Call::Stop)?;
        self.motion = Motion::Stopped;
        Ok(STATUS_OK)
    }

    fn increase_speed(&mut self) -> Result<i32, HardwareError> {
        self.begin(Call::IncreaseSpeed)?;
        self.speed = self.speed.saturating_add(SPEED_STEP);
        Ok(STATUS_OK)
    }

    fn decrease_speed(&mut self) -> Result<i32, HardwareError> {
        self.begin(Call::DecreaseSpeed)?;
        self.speed = self.speed.saturating_sub(SPEED_STEP);
        Ok(STATUS_OK)
    }

    fn led_on(&mut self, side: LedSide) -> Result<i32, HardwareError> {
        self.set_led(side, true)
    }

    fn led_off(&mut self, side: LedSide) -> Result<i32, HardwareError> {
        self.set_led(side, false)
    }

    fn poll_telemetry(&mut self) {
        let Some(last) = self.last_telemetry else {
            return;
        };
        if last.elapsed() < self.config.telemetry_interval {
            return;
        }
        self.last_telemetry = Some(Instant::now());
        self.publish(RobotEvent::Voltage(self.voltage));

        if !self.halted && self.voltage < self.config.min_voltage {
            self.halted = true;
            self.motion = Motion::Stopped;
            self.publish(RobotEvent::Status(StatusEvent::Halt));
        }
    }
}
