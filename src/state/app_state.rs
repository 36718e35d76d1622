//! Application state shared with the HTTP front end

use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::TimerEngine;

/// Timer engine plus server metadata
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: TimerEngine,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Cancelled when the server begins shutting down; ends open event streams
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(engine: TimerEngine, host: String, port: u16) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
            port,
            host,
            shutdown: CancellationToken::new(),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }
}

fn format_uptime(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
