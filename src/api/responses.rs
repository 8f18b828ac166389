//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::DialSnapshot;

/// API response structure for command and pointer endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Phase of the dial after the command: idle, running, dragging or completed
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub dial: DialSnapshot,
}

impl ApiResponse {
    /// Create a response whose status mirrors the dial's phase
    pub fn new(message: impl Into<String>, dial: DialSnapshot) -> Self {
        Self {
            status: dial.phase.as_str().to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            dial,
        }
    }
}

/// Full status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub dial: DialSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
