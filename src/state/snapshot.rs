//! Immutable display snapshots published after every engine mutation

use std::fmt;
use serde::{Deserialize, Serialize};

use super::CountdownState;

/// Remaining time split into the fields a timer face shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDisplay {
    pub minutes: String,
    pub seconds: String,
    /// Zero-padded to three digits, empty while stopped
    pub millis: String,
}

impl TimeDisplay {
    pub fn with_millis(remaining_ms: i64) -> Self {
        let ms = remaining_ms.max(0);
        Self {
            millis: format!("{:03}", ms % 1000),
            ..Self::without_millis(ms)
        }
    }

    pub fn without_millis(remaining_ms: i64) -> Self {
        let ms = remaining_ms.max(0);
        Self {
            minutes: (ms / 60_000).to_string(),
            seconds: ((ms / 1000) % 60).to_string(),
            millis: String::new(),
        }
    }

    pub fn completed() -> Self {
        Self::with_millis(0)
    }
}

impl fmt::Display for TimeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m {} s", self.minutes, self.seconds)?;
        if !self.millis.is_empty() {
            write!(f, " {}", self.millis)?;
        }
        Ok(())
    }
}

/// Everything a front end needs to render the timer screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: CountdownState,
    pub duration_text: String,
    /// Clamped to zero
    pub remaining_millis: i64,
    pub display: TimeDisplay,
    /// `display` rendered as one string
    pub text: String,
    /// Remaining over total, clamped to [0, 1]
    pub progress: f64,
    pub is_start_visible: bool,
    pub is_start_enabled: bool,
    pub is_pause_visible: bool,
    pub is_stop_visible: bool,
    pub is_reset_visible: bool,
    pub is_num_pad_visible: bool,
    pub is_progress_visible: bool,
    pub is_completed: bool,
}
