//! Keypad Countdown - a single countdown timer engine with an HTTP front end
//!
//! The engine turns keypad digits into a duration, runs a
//! Stopped/Running/Paused/Completed state machine over it and publishes
//! display snapshots that any front end can render.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::EngineError;
pub use state::{AppState, CountdownState, TimerEngine, TimerSnapshot};
pub use utils::signals::shutdown_signal;
