//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::{error::RecvError, Receiver},
    time::{interval_at, sleep, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, TickOutcome, TimerEvent};

/// Background task that drives a running countdown once per tick interval.
///
/// The task waits for a run to start, then ticks until the run completes or a
/// stop/reset event cancels it. Cancelling drops the interval, so no further
/// tick is scheduled for that run.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task ({:?} per tick)", state.tick_interval);

    let mut event_rx = state.event_tx.subscribe();

    // A run may have started before we subscribed
    resume_current_run(&state, &mut event_rx).await;

    loop {
        match event_rx.recv().await {
            Ok(TimerEvent::Started { generation }) => {
                debug!("Ticker picked up run {}", generation);
                run_countdown(&state, generation, &mut event_rx).await;
            }
            Ok(event) => {
                debug!("Ticker idle, ignoring {:?}", event);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Ticker missed {} timer events", skipped);
                resume_current_run(&state, &mut event_rx).await;
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, stopping ticker task");
                break;
            }
        }
    }
}

async fn resume_current_run(state: &AppState, event_rx: &mut Receiver<TimerEvent>) {
    match state.current_run() {
        Ok(Some(generation)) => {
            info!("Resuming run {}", generation);
            run_countdown(state, generation, event_rx).await;
        }
        Ok(None) => {}
        Err(e) => error!("Failed to check for a running countdown: {}", e),
    }
}

/// Count down run `generation`, then any run that supersedes it while the
/// ticker is still busy with the first one
async fn run_countdown(
    state: &AppState,
    mut generation: u64,
    event_rx: &mut Receiver<TimerEvent>,
) {
    while let Some(newer) = count_down_run(state, generation, event_rx).await {
        generation = newer;
    }
}

/// Tick a single run until it ends. Returns the generation of a newer run
/// whose start event arrived while this one was still counting.
async fn count_down_run(
    state: &AppState,
    generation: u64,
    event_rx: &mut Receiver<TimerEvent>,
) -> Option<u64> {
    let period = state.tick_interval;
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.tick(generation) {
                    Ok(TickOutcome::Advanced { remaining }) => {
                        debug!("Run {}: {}s remaining", generation, remaining);
                    }
                    Ok(TickOutcome::Completed) => {
                        info!("Run {} completed", generation);
                        return None;
                    }
                    Ok(TickOutcome::Ignored) => {
                        debug!("Run {} is no longer current, dropping its ticks", generation);
                        return None;
                    }
                    Err(e) => {
                        error!("Failed to advance countdown: {}", e);
                        // Back off rather than spin on a poisoned lock
                        sleep(Duration::from_secs(1)).await;
                    }
                }
            }

            event = event_rx.recv() => {
                match event {
                    Ok(TimerEvent::Stopped) | Ok(TimerEvent::Reset) => {
                        info!("Run {} cancelled", generation);
                        return None;
                    }
                    Ok(TimerEvent::Started { generation: newer }) if newer != generation => {
                        // Only reachable if a stop was lost to lag
                        info!("Run {} superseded by run {}", generation, newer);
                        return Some(newer);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Ticker missed {} timer events during run {}", skipped, generation);
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        }
    }
}
