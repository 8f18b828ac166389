//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::dial::{DialGeometry, Point};
use super::controller::{DialController, DialSnapshot, TickOutcome};

/// Notifications about countdown lifecycle changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A new run began; ticks for it must carry this generation
    Started { generation: u64 },
    Stopped,
    Reset,
    Completed,
}

/// Shared application state: one dial controller plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// The single dial controller driven by handlers and the ticker
    pub controller: Arc<Mutex<DialController>>,
    /// Time between two ticks of a running countdown
    pub tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for countdown lifecycle notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
}

impl AppState {
    /// Create a new AppState with an idle, full dial
    pub fn new(
        port: u16,
        host: String,
        total_duration: u64,
        tick_interval: Duration,
        geometry: DialGeometry,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);

        Self {
            controller: Arc::new(Mutex::new(DialController::new(total_duration, geometry))),
            tick_interval,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
        }
    }

    fn lock_controller(&self) -> Result<MutexGuard<'_, DialController>, String> {
        self.controller.lock()
            .map_err(|e| format!("Failed to lock dial controller: {}", e))
    }

    /// Apply an update to the controller, record the action and return the
    /// resulting snapshot together with the updater's own result
    fn update_controller<F, T>(&self, action: &str, updater: F) -> Result<(T, DialSnapshot), String>
    where
        F: FnOnce(&mut DialController) -> T,
    {
        let mut controller = self.lock_controller()?;
        let result = updater(&mut *controller);
        let snapshot = controller.snapshot();
        drop(controller);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok((result, snapshot))
    }

    /// Broadcast a lifecycle event. Having no listeners is not an error.
    fn notify(&self, event: TimerEvent) {
        if self.event_tx.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.event_tx.send(event) {
            warn!("Failed to send timer event {:?}: {}", event, e);
        }
    }

    /// Start the countdown. The flag reports whether a new run began.
    pub fn start(&self) -> Result<(bool, DialSnapshot), String> {
        let (generation, snapshot) = self.update_controller("start", |dial| dial.start())?;
        if let Some(generation) = generation {
            self.notify(TimerEvent::Started { generation });
        }
        Ok((generation.is_some(), snapshot))
    }

    /// Stop the countdown. The flag reports whether it was running.
    pub fn stop(&self) -> Result<(bool, DialSnapshot), String> {
        let (stopped, snapshot) = self.update_controller("stop", |dial| dial.stop())?;
        if stopped {
            self.notify(TimerEvent::Stopped);
        }
        Ok((stopped, snapshot))
    }

    /// Stop and restore the full duration
    pub fn reset(&self) -> Result<DialSnapshot, String> {
        let (_, snapshot) = self.update_controller("reset", |dial| dial.reset())?;
        info!("Dial reset");
        self.notify(TimerEvent::Reset);
        Ok(snapshot)
    }

    pub fn pointer_down(&self, point: Point) -> Result<(bool, DialSnapshot), String> {
        self.update_controller("pointer-down", |dial| dial.on_pointer_down(point))
    }

    pub fn pointer_drag(&self, point: Point) -> Result<(bool, DialSnapshot), String> {
        self.update_controller("pointer-drag", |dial| dial.on_pointer_drag(point))
    }

    pub fn pointer_up(&self) -> Result<(bool, DialSnapshot), String> {
        self.update_controller("pointer-up", |dial| dial.on_pointer_up())
    }

    /// Deliver a scheduled tick belonging to run `generation`.
    ///
    /// Ticks from a run that has since been stopped, reset or restarted are
    /// ignored, so a tick already in flight can never move the dial after
    /// the run it was scheduled for has ended.
    pub fn tick(&self, generation: u64) -> Result<TickOutcome, String> {
        let mut controller = self.lock_controller()?;
        if controller.generation() != generation {
            return Ok(TickOutcome::Ignored);
        }

        let outcome = controller.on_tick();
        drop(controller);

        if outcome == TickOutcome::Completed {
            self.notify(TimerEvent::Completed);
        }
        Ok(outcome)
    }

    /// Get the current dial snapshot
    pub fn snapshot(&self) -> Result<DialSnapshot, String> {
        self.lock_controller().map(|controller| controller.snapshot())
    }

    /// Generation of the run in progress, if the countdown is running
    pub fn current_run(&self) -> Result<Option<u64>, String> {
        self.lock_controller()
            .map(|controller| controller.timer().is_running().then(|| controller.generation()))
    }

    pub fn geometry(&self) -> Result<DialGeometry, String> {
        self.lock_controller().map(|controller| *controller.geometry())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    fn state(total: u64) -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), total, Duration::from_secs(1), DialGeometry::default())
    }

    #[test]
    fn start_broadcasts_generation_once() {
        let state = state(60);
        let mut rx = state.event_tx.subscribe();

        let (started, snapshot) = state.start().unwrap();
        assert!(started);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Started { generation: 1 });

        let (started, _) = state.start().unwrap();
        assert!(!started);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stale_generation_ticks_are_ignored() {
        let state = state(60);
        state.start().unwrap();
        state.stop().unwrap();
        state.start().unwrap();

        assert_eq!(state.tick(1).unwrap(), TickOutcome::Ignored);
        assert_eq!(state.snapshot().unwrap().remaining, 60);
        assert_eq!(state.tick(2).unwrap(), TickOutcome::Advanced { remaining: 59 });
    }

    #[test]
    fn tick_after_reset_leaves_dial_full() {
        let state = state(60);
        state.start().unwrap();
        state.tick(1).unwrap();
        state.reset().unwrap();

        assert_eq!(state.tick(1).unwrap(), TickOutcome::Ignored);
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.remaining, 60);
        assert_eq!(snapshot.phase, Phase::Idle);
    }

    #[test]
    fn completion_is_broadcast() {
        let state = state(2);
        let mut rx = state.event_tx.subscribe();
        state.start().unwrap();
        state.tick(1).unwrap();
        assert_eq!(state.tick(1).unwrap(), TickOutcome::Completed);

        assert!(matches!(rx.try_recv().unwrap(), TimerEvent::Started { .. }));
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Completed);
    }

    #[test]
    fn last_action_is_recorded() {
        let state = state(60);
        assert_eq!(state.get_last_action(), (None, None));

        state.pointer_down(Point::new(150.0, 260.0)).unwrap();
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("pointer-down"));
        assert!(time.is_some());
    }

    #[test]
    fn uptime_starts_in_seconds() {
        assert!(state(60).get_uptime().ends_with('s'));
    }
}
