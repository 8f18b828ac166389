//! Dial Timer - A circular countdown timer served over HTTP
//!
//! This library provides the dial controller that maps remaining time to a
//! dot on a circle and back, the ticker that counts it down once per second,
//! and an HTTP API plus SVG rendering to drive and display it.

pub mod config;
pub mod dial;
pub mod state;
pub mod render;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use dial::{DialGeometry, Point};
pub use state::{AppState, DialController, DialSnapshot, Phase};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
