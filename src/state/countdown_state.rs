//! Countdown state enumeration

use std::fmt;
use serde::{Deserialize, Serialize};

/// The four phases of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownState {
    /// Waiting for input; the keypad edits the duration
    #[default]
    Stopped,
    /// Counting down, sampler active
    Running,
    /// Counting suspended, remainder captured
    Paused,
    /// Remaining time went negative
    Completed,
}

impl CountdownState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownState::Stopped => "stopped",
            CountdownState::Running => "running",
            CountdownState::Paused => "paused",
            CountdownState::Completed => "completed",
        }
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
