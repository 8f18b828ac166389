//! Dial math
//!
//! Pure conversions between the countdown's remaining time, positions on the
//! circular dial and the text label shown in its middle.

pub mod geometry;
pub mod mapping;

pub use geometry::{DialGeometry, Point};
pub use mapping::{
    angle_to_remaining, format_label, normalize_angle, remaining_to_angle, MAX_DURATION,
};
