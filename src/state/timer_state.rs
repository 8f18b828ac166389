//! Countdown state structure and its phases

use serde::{Deserialize, Serialize};

/// Observable phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Dragging,
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Dragging => "dragging",
            Phase::Completed => "completed",
        }
    }
}

/// Timer state for the dial countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Length of a full revolution of the dial, in seconds
    pub total_duration: u64,
    /// Seconds left, always within `0..=total_duration`
    pub remaining: u64,
    pub running: bool,
    pub dragging: bool,
    /// Whether the completion message is showing
    pub completed: bool,
    /// Bumped on every start so ticks from an earlier run can be told apart
    pub generation: u64,
}

impl TimerState {
    /// Create an idle timer with the full duration remaining
    pub fn new(total_duration: u64) -> Self {
        Self {
            total_duration,
            remaining: total_duration,
            running: false,
            dragging: false,
            completed: false,
            generation: 0,
        }
    }

    /// Current phase. Dragging wins over running, running over completed.
    pub fn phase(&self) -> Phase {
        if self.dragging {
            Phase::Dragging
        } else if self.running {
            Phase::Running
        } else if self.completed {
            Phase::Completed
        } else {
            Phase::Idle
        }
    }

    /// Overwrite the remaining seconds, clamped into range
    pub fn set_remaining(&mut self, remaining: u64) {
        self.remaining = remaining.min(self.total_duration);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
