//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{error::EngineError, state::TimerSnapshot};

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    pub fn ok(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self::new("ok".to_string(), message.into(), timer)
    }

    pub fn error(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self::new("error".to_string(), message.into(), timer)
    }
}

/// Rejected request paired with the unchanged timer state
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub timer: TimerSnapshot,
}

impl ApiError {
    pub fn engine(error: EngineError, timer: TimerSnapshot) -> Self {
        let status = match error {
            EngineError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: error.to_string(),
            timer,
        }
    }

    pub fn bad_request(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            timer,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Rejected request: {}", self.message);
        (self.status, Json(ApiResponse::error(self.message, self.timer))).into_response()
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub tick_interval_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
