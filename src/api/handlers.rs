//! HTTP endpoint handlers

use std::convert::Infallible;
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, info};

use crate::state::AppState;
use super::responses::{ApiError, ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let timer = state.engine.start();
    info!("Start endpoint called - timer is {}", timer.state);
    Json(ApiResponse::ok(format!("Timer is {}", timer.state), timer))
}

/// Handle POST /pause - Pause a running countdown
pub async fn pause_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let timer = state.engine.pause();
    info!("Pause endpoint called - timer is {}", timer.state);
    Json(ApiResponse::ok(format!("Timer is {}", timer.state), timer))
}

/// Handle POST /stop - Stop the countdown
pub async fn stop_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let timer = state.engine.stop();
    info!("Stop endpoint called - timer is {}", timer.state);
    Json(ApiResponse::ok(format!("Timer is {}", timer.state), timer))
}

/// Handle POST /reset - Return a paused or completed countdown to the keypad
pub async fn reset_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let timer = state.engine.reset();
    info!("Reset endpoint called - timer is {}", timer.state);
    Json(ApiResponse::ok(format!("Timer is {}", timer.state), timer))
}

/// Handle POST /digit/:digit - Type a keypad digit
pub async fn digit_handler(
    State(state): State<AppState>,
    Path(digit): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Ok(digit) = digit.parse::<i64>() else {
        return Err(ApiError::bad_request(
            format!("Invalid argument: digit must be between 0 and 9, got {}", digit),
            state.engine.snapshot(),
        ));
    };

    match state.engine.append_digit(digit) {
        Ok(timer) => {
            debug!("Digit endpoint called with {}", digit);
            Ok(Json(ApiResponse::ok(
                format!("Duration text is {}", timer.duration_text),
                timer,
            )))
        }
        Err(error) => Err(ApiError::engine(error, state.engine.snapshot())),
    }
}

/// Handle POST /clear - Reset the duration text to zero
pub async fn clear_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let timer = state.engine.clear();
    debug!("Clear endpoint called");
    Json(ApiResponse::ok(
        format!("Duration text is {}", timer.duration_text),
        timer,
    ))
}

/// Handle POST /backspace - Drop the last typed digit
pub async fn backspace_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let timer = state.engine.backspace();
    debug!("Backspace endpoint called");
    Json(ApiResponse::ok(
        format!("Duration text is {}", timer.duration_text),
        timer,
    ))
}

/// Handle GET /status - Return the current timer snapshot
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        timer: state.engine.snapshot(),
        tick_interval_ms: state.engine.tick_interval().as_millis() as u64,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /events - Stream a snapshot after every change
pub async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Event stream subscriber connected");
    let rx = state.engine.subscribe();

    // First item is the current snapshot, then one per change.
    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let snapshot = rx.borrow_and_update().clone();
        let event = match Event::default().event("snapshot").json_data(&snapshot) {
            Ok(event) => event,
            Err(e) => Event::default().event("error").data(e.to_string()),
        };
        Some((Ok::<_, Infallible>(event), (rx, false)))
    });

    let shutdown = state.shutdown.clone().cancelled_owned();
    Sse::new(events.take_until(shutdown)).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
