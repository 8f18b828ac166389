//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{debug, error, info};

use crate::{
    dial::Point,
    render::render_svg,
    state::AppState,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type ApiResult = Result<Json<ApiResponse>, StatusCode>;

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("Failed to {}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle POST /start - Begin counting down
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let (started, dial) = state.start().map_err(|e| internal_error("start timer", e))?;
    let message = if started {
        info!("Start endpoint called - countdown running from {}", dial.label);
        "Timer started"
    } else {
        "Timer already running"
    };
    Ok(Json(ApiResponse::new(message, dial)))
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let (stopped, dial) = state.stop().map_err(|e| internal_error("stop timer", e))?;
    let message = if stopped {
        info!("Stop endpoint called - countdown paused at {}", dial.label);
        "Timer stopped"
    } else {
        "Timer was not running"
    };
    Ok(Json(ApiResponse::new(message, dial)))
}

/// Handle POST /reset - Stop and restore the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let dial = state.reset().map_err(|e| internal_error("reset timer", e))?;
    Ok(Json(ApiResponse::new("Timer reset", dial)))
}

/// Handle POST /pointer/down - Press on the dial
pub async fn pointer_down_handler(
    State(state): State<Arc<AppState>>,
    Json(point): Json<Point>,
) -> ApiResult {
    let (accepted, dial) = state
        .pointer_down(point)
        .map_err(|e| internal_error("handle pointer down", e))?;
    let message = if accepted {
        debug!("Pointer down at ({}, {}) set dial to {}", point.x, point.y, dial.label);
        "Dial set"
    } else {
        "Pointer outside the dial"
    };
    Ok(Json(ApiResponse::new(message, dial)))
}

/// Handle POST /pointer/drag - Move a pressed pointer
pub async fn pointer_drag_handler(
    State(state): State<Arc<AppState>>,
    Json(point): Json<Point>,
) -> ApiResult {
    let (accepted, dial) = state
        .pointer_drag(point)
        .map_err(|e| internal_error("handle pointer drag", e))?;
    let message = if accepted { "Dial set" } else { "Not dragging" };
    Ok(Json(ApiResponse::new(message, dial)))
}

/// Handle POST /pointer/up - Release the pointer
pub async fn pointer_up_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let (released, dial) = state
        .pointer_up()
        .map_err(|e| internal_error("handle pointer up", e))?;
    let message = if released { "Drag finished" } else { "Not dragging" };
    Ok(Json(ApiResponse::new(message, dial)))
}

/// Handle GET /status - Return the dial and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let dial = state.snapshot().map_err(|e| internal_error("get dial snapshot", e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        dial,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /dial.svg - Render the dial
pub async fn dial_svg_handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, StatusCode> {
    let dial = state.snapshot().map_err(|e| internal_error("get dial snapshot", e))?;
    let geometry = state.geometry().map_err(|e| internal_error("get dial geometry", e))?;

    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_svg(&dial, &geometry),
    ))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
