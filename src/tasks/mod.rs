//! Background tasks module
//!
//! This module contains the background task that runs alongside the HTTP
//! server and drives the countdown forward.

pub mod ticker;

// Re-export main functions
pub use ticker::ticker_task;
