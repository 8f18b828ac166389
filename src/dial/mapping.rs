//! Conversions between dial angles, remaining seconds and the display label
//!
//! Angles are radians measured clockwise from 12 o'clock. A full revolution
//! represents the whole countdown duration.

use std::f64::consts::TAU;

/// Longest countdown the dial accepts: one week. Every second up to this
/// bound survives the trip through an `f64` angle and back.
pub const MAX_DURATION: u64 = 7 * 24 * 60 * 60;

/// Wrap an angle into `[0, 2π)` by adding or removing whole revolutions.
///
/// Non-finite input collapses to zero.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }

    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert a dial angle into remaining seconds.
///
/// Angles in `[0, 2π]` are used as-is so that a full revolution maps back to
/// the whole duration; anything else is wrapped first. The result is rounded
/// to the nearest second and clamped into `[0, total_duration]`.
pub fn angle_to_remaining(angle: f64, total_duration: u64) -> u64 {
    if !angle.is_finite() {
        return 0;
    }

    let angle = if (0.0..=TAU).contains(&angle) {
        angle
    } else {
        normalize_angle(angle)
    };

    turn_to_remaining(angle / TAU, total_duration)
}

/// Convert a fraction of a revolution into remaining seconds
pub(crate) fn turn_to_remaining(turn: f64, total_duration: u64) -> u64 {
    let seconds = (turn * total_duration as f64).round();
    if seconds.is_nan() || seconds <= 0.0 {
        0
    } else {
        (seconds as u64).min(total_duration)
    }
}

/// Convert remaining seconds into a dial angle in `[0, 2π]`.
///
/// `total_duration` itself maps to exactly `2π`, which is the top of the dial.
pub fn remaining_to_angle(remaining: u64, total_duration: u64) -> f64 {
    if total_duration == 0 {
        return 0.0;
    }

    let remaining = remaining.min(total_duration);
    remaining as f64 / total_duration as f64 * TAU
}

/// Format remaining seconds as `M:SS`.
///
/// Minutes are deliberately left unpadded (`120:00`, `5:07`) while seconds
/// always take two digits.
pub fn format_label(remaining: u64) -> String {
    format!("{}:{:02}", remaining / 60, remaining % 60)
}
