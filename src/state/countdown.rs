//! Countdown state machine and time arithmetic
//!
//! `Countdown` owns no clock and no scheduler. Every operation that depends on
//! wall-clock time takes the current instant in milliseconds, which keeps the
//! transition rules testable on their own.

use tracing::{debug, info};

use super::{CountdownState, DurationText, TimeDisplay, TimerSnapshot};
use crate::error::EngineError;

/// Single countdown: state, keypad text and captured time fields
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    state: CountdownState,
    duration_text: DurationText,
    /// Remainder snapshot taken when a running period starts or pauses
    captured_remaining_ms: i64,
    /// Time spent in the current running period, as of the last sample
    elapsed_ms: i64,
    started_at_ms: i64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn duration_text(&self) -> &DurationText {
        &self.duration_text
    }

    pub fn parsed_seconds(&self) -> u64 {
        self.duration_text.parsed_seconds()
    }

    pub fn captured_remaining_ms(&self) -> i64 {
        self.captured_remaining_ms
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    /// Begin or resume counting. Returns true when a new running period began.
    pub fn start(&mut self, now_ms: i64) -> bool {
        match self.state {
            CountdownState::Stopped => {
                if !self.is_start_enabled() {
                    debug!("Ignoring start with zero duration");
                    return false;
                }
                self.captured_remaining_ms = self.duration_text.parsed_millis();
            }
            CountdownState::Paused => {}
            CountdownState::Running | CountdownState::Completed => {
                debug!("Ignoring start while {}", self.state);
                return false;
            }
        }

        self.started_at_ms = now_ms;
        self.elapsed_ms = 0;
        self.state = CountdownState::Running;
        info!(
            "Countdown running with {} ms remaining",
            self.captured_remaining_ms
        );
        true
    }

    /// Suspend counting and capture the remainder.
    ///
    /// Elapsed time is refreshed from `now_ms` first. If that already puts the
    /// remainder below zero the countdown completes instead of pausing.
    pub fn pause(&mut self, now_ms: i64) -> bool {
        if self.state != CountdownState::Running {
            debug!("Ignoring pause while {}", self.state);
            return false;
        }

        if self.sample(now_ms) {
            return true;
        }
        self.captured_remaining_ms = self.remaining_millis();
        self.elapsed_ms = 0;
        self.state = CountdownState::Paused;
        info!(
            "Countdown paused with {} ms remaining",
            self.captured_remaining_ms
        );
        true
    }

    /// Return to `Stopped` from any other state, keeping the typed duration
    pub fn stop(&mut self) -> bool {
        if self.state == CountdownState::Stopped {
            debug!("Ignoring stop while already stopped");
            return false;
        }

        info!("Countdown stopped from {}", self.state);
        self.state = CountdownState::Stopped;
        self.captured_remaining_ms = 0;
        self.elapsed_ms = 0;
        true
    }

    /// Same transition as [`Countdown::stop`]; exposed separately to the UI
    pub fn reset(&mut self) -> bool {
        self.stop()
    }

    /// Recompute elapsed time. Returns true if this sample completed the countdown.
    pub fn sample(&mut self, now_ms: i64) -> bool {
        if self.state != CountdownState::Running {
            return false;
        }

        self.elapsed_ms = now_ms - self.started_at_ms;
        if self.remaining_millis() < 0 {
            self.state = CountdownState::Completed;
            info!("Countdown completed");
            return true;
        }
        false
    }

    pub fn append_digit(&mut self, digit: i64) -> Result<bool, EngineError> {
        // Validate before the state guard so bad input is always reported.
        if !(0..=9).contains(&digit) {
            return Err(EngineError::InvalidArgument { digit });
        }
        if !self.is_editable() {
            return Ok(false);
        }
        let changed = self.duration_text.append_digit(digit)?;
        debug!("Duration text is now {}", self.duration_text);
        Ok(changed)
    }

    pub fn clear(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.duration_text.clear();
        debug!("Duration text cleared");
        true
    }

    pub fn backspace(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.duration_text.backspace();
        debug!("Duration text is now {}", self.duration_text);
        true
    }

    fn is_editable(&self) -> bool {
        if self.state != CountdownState::Stopped {
            debug!("Ignoring keypad edit while {}", self.state);
            return false;
        }
        true
    }

    /// Raw remaining time; may be negative between expiry and the next sample
    pub fn remaining_millis(&self) -> i64 {
        match self.state {
            CountdownState::Paused => self.captured_remaining_ms,
            CountdownState::Running | CountdownState::Completed => {
                self.captured_remaining_ms - self.elapsed_ms
            }
            CountdownState::Stopped => self.duration_text.parsed_millis(),
        }
    }

    /// Remaining over configured duration, unclamped
    pub fn progress_fraction(&self) -> f64 {
        let total = self.duration_text.parsed_millis();
        if self.state == CountdownState::Completed || total == 0 {
            return 0.0;
        }
        self.remaining_millis() as f64 / total as f64
    }

    pub fn is_start_visible(&self) -> bool {
        matches!(self.state, CountdownState::Stopped | CountdownState::Paused)
    }

    pub fn is_start_enabled(&self) -> bool {
        self.parsed_seconds() > 0
    }

    pub fn is_pause_visible(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn is_stop_visible(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn is_reset_visible(&self) -> bool {
        matches!(self.state, CountdownState::Paused | CountdownState::Completed)
    }

    pub fn is_num_pad_visible(&self) -> bool {
        self.state == CountdownState::Stopped
    }

    pub fn is_progress_visible(&self) -> bool {
        self.state != CountdownState::Stopped
    }

    pub fn is_completed(&self) -> bool {
        self.state == CountdownState::Completed
    }

    pub fn display(&self) -> TimeDisplay {
        match self.state {
            CountdownState::Stopped => TimeDisplay::without_millis(self.remaining_millis()),
            CountdownState::Completed => TimeDisplay::completed(),
            CountdownState::Running | CountdownState::Paused => {
                TimeDisplay::with_millis(self.remaining_millis())
            }
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let display = self.display();
        TimerSnapshot {
            state: self.state,
            duration_text: self.duration_text.to_string(),
            remaining_millis: self.remaining_millis().max(0),
            text: display.to_string(),
            display,
            progress: self.progress_fraction().clamp(0.0, 1.0),
            is_start_visible: self.is_start_visible(),
            is_start_enabled: self.is_start_enabled(),
            is_pause_visible: self.is_pause_visible(),
            is_stop_visible: self.is_stop_visible(),
            is_reset_visible: self.is_reset_visible(),
            is_num_pad_visible: self.is_num_pad_visible(),
            is_progress_visible: self.is_progress_visible(),
            is_completed: self.is_completed(),
        }
    }
}
