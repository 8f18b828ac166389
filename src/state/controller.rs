//! Dial controller: the countdown state machine
//!
//! Owns the [`TimerState`] together with the dial geometry and applies every
//! input to it: ticks, the start/stop/reset commands and pointer events.
//! Nothing here fails; malformed input is clamped or ignored.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::timer_state::{Phase, TimerState};
use crate::dial::{
    geometry::{DialGeometry, Point},
    mapping::{angle_to_remaining, format_label, remaining_to_angle, turn_to_remaining},
};

/// Message shown once a run has counted all the way down
pub const COMPLETION_MESSAGE: &str = "Congratulations!";

/// Result of delivering one tick to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Ignored,
    /// One second was taken off
    Advanced { remaining: u64 },
    /// The countdown reached zero and stopped
    Completed,
}

/// Serializable view of the dial at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialSnapshot {
    pub total_duration: u64,
    pub remaining: u64,
    pub running: bool,
    pub dragging: bool,
    pub completed: bool,
    pub phase: Phase,
    /// Dot angle in radians, clockwise from 12 o'clock
    pub angle: f64,
    pub dot: Point,
    pub label: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DialController {
    timer: TimerState,
    geometry: DialGeometry,
}

impl DialController {
    pub fn new(total_duration: u64, geometry: DialGeometry) -> Self {
        Self {
            timer: TimerState::new(total_duration),
            geometry,
        }
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn geometry(&self) -> &DialGeometry {
        &self.geometry
    }

    pub fn remaining(&self) -> u64 {
        self.timer.remaining
    }

    pub fn phase(&self) -> Phase {
        self.timer.phase()
    }

    pub fn generation(&self) -> u64 {
        self.timer.generation
    }

    pub fn angle_to_remaining(&self, angle: f64) -> u64 {
        angle_to_remaining(angle, self.timer.total_duration)
    }

    pub fn remaining_to_angle(&self, remaining: u64) -> f64 {
        remaining_to_angle(remaining, self.timer.total_duration)
    }

    /// Where the dot sits on the canvas for a given remaining time
    pub fn remaining_to_point(&self, remaining: u64) -> Point {
        self.geometry.point_at_angle(self.remaining_to_angle(remaining))
    }

    /// Advance the countdown by one second.
    ///
    /// Reaching zero completes the run on the same tick. A tick delivered
    /// while stopped is stale and leaves everything untouched.
    pub fn on_tick(&mut self) -> TickOutcome {
        if !self.timer.running {
            debug!("Ignoring tick while stopped");
            return TickOutcome::Ignored;
        }

        if self.timer.remaining > 0 {
            self.timer.remaining -= 1;
            debug!("Tick: {} remaining", format_label(self.timer.remaining));
            if self.timer.remaining > 0 {
                return TickOutcome::Advanced {
                    remaining: self.timer.remaining,
                };
            }
        }

        self.timer.running = false;
        self.timer.completed = true;
        info!("Countdown completed");
        TickOutcome::Completed
    }

    /// Start counting down. Returns the new run generation, or `None` if the
    /// timer was already running.
    pub fn start(&mut self) -> Option<u64> {
        if self.timer.running {
            return None;
        }

        self.timer.running = true;
        self.timer.completed = false;
        self.timer.generation += 1;
        info!(
            "Timer started at {} (run {})",
            format_label(self.timer.remaining),
            self.timer.generation
        );
        Some(self.timer.generation)
    }

    /// Stop counting down. Returns whether anything changed.
    pub fn stop(&mut self) -> bool {
        if !self.timer.running {
            return false;
        }

        self.timer.running = false;
        info!("Timer stopped at {}", format_label(self.timer.remaining));
        true
    }

    /// Stop and restore the full duration, clearing the completion message
    pub fn reset(&mut self) {
        self.stop();
        self.timer.remaining = self.timer.total_duration;
        self.timer.completed = false;
        self.timer.dragging = false;
        info!("Timer reset to {}", format_label(self.timer.remaining));
    }

    /// Begin a drag. Points off the canvas are ignored.
    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        if !point.is_finite() || !self.geometry.contains(point) {
            debug!("Ignoring pointer down outside the dial at {:?}", point);
            return false;
        }

        self.timer.dragging = true;
        self.set_from_pointer(point);
        true
    }

    /// Continue a drag; a no-op unless a pointer-down started one
    pub fn on_pointer_drag(&mut self, point: Point) -> bool {
        if !self.timer.dragging || !point.is_finite() {
            return false;
        }

        self.set_from_pointer(point);
        true
    }

    pub fn on_pointer_up(&mut self) -> bool {
        std::mem::replace(&mut self.timer.dragging, false)
    }

    /// Seconds selected by a pointer at `point`.
    ///
    /// The top of the dial is read as a full revolution so that pointing at
    /// 12 o'clock selects the whole duration rather than nothing.
    pub fn pointer_to_remaining(&self, point: Point) -> u64 {
        let angle = self.geometry.pointer_angle(point);
        let angle = if angle == 0.0 { TAU } else { angle };
        turn_to_remaining(angle / TAU, self.timer.total_duration)
    }

    fn set_from_pointer(&mut self, point: Point) {
        let remaining = self.pointer_to_remaining(point);
        self.timer.set_remaining(remaining);
        self.timer.completed = false;
        debug!("Dial set to {} from pointer", format_label(self.timer.remaining));
    }

    pub fn snapshot(&self) -> DialSnapshot {
        let remaining = self.timer.remaining;
        DialSnapshot {
            total_duration: self.timer.total_duration,
            remaining,
            running: self.timer.running,
            dragging: self.timer.dragging,
            completed: self.timer.completed,
            phase: self.timer.phase(),
            angle: self.remaining_to_angle(remaining),
            dot: self.remaining_to_point(remaining),
            label: format_label(remaining),
            message: self
                .timer
                .completed
                .then(|| COMPLETION_MESSAGE.to_string()),
        }
    }
}
