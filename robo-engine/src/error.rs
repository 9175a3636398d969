//! Hardware error type

use thiserror::Error;

/// Failure talking to the robot board.
///
/// Any of these ends the session: the robot's state is unknown afterwards.
#[derive(Error, Debug)]
pub enum HardwareError {
    #[error("IO error during {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Board not initialized")]
    NotInitialized,
}

impl HardwareError {
    /// Wrap an IO error with the operation that was in flight
    pub fn io(op: &'static str, source: std::io::Error) -> Self {
        Self::Io { op, source }
    }
}
