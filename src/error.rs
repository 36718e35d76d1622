//! Engine error types

use thiserror::Error;

/// Errors surfaced by the timer engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A keypad digit outside 0-9 was submitted
    #[error("Invalid argument: digit must be between 0 and 9, got {digit}")]
    InvalidArgument { digit: i64 },
}
