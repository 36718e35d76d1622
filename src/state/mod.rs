//! State management module
//!
//! The countdown state machine, its keypad editor, the display snapshots it
//! derives and the shared engine that drives it.

pub mod app_state;
pub mod countdown;
pub mod countdown_state;
pub mod duration_text;
pub mod engine;
pub mod snapshot;

// Re-export main types
pub use app_state::AppState;
pub use countdown::Countdown;
pub use countdown_state::CountdownState;
pub use duration_text::DurationText;
pub use engine::{TimerEngine, WeakTimerEngine, DEFAULT_TICK_INTERVAL, MIN_TICK_INTERVAL};
pub use snapshot::{TimeDisplay, TimerSnapshot};
