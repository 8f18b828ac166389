//! State management module
//!
//! This module contains the countdown state, the dial controller that drives
//! it, and the shared application state handed to handlers and tasks.

pub mod app_state;
pub mod controller;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerEvent};
pub use controller::{DialController, DialSnapshot, TickOutcome, COMPLETION_MESSAGE};
pub use timer_state::{Phase, TimerState};
