//! Round timer tick task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome, TimerPhase};

/// Background task that advances the round timer once per second
pub async fn tick_task(state: Arc<AppState>) {
    info!("Starting round timer tick task");

    let mut interval = interval(Duration::from_secs(1));
    // A late tick still counts as exactly one second
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        match state.tick_timer() {
            Ok((outcome, snapshot)) => match outcome {
                TickOutcome::Transitioned { from, to: TimerPhase::Finished } => {
                    info!("Workout finished after round {} (from {})",
                          snapshot.state.current_round, from.as_str());
                }
                TickOutcome::Transitioned { from, to } => {
                    info!("Timer phase {} -> {}: {} {}",
                          from.as_str(), to.as_str(), snapshot.title, snapshot.display);
                }
                TickOutcome::Warning { seconds_remaining } => {
                    info!("Round {} ends in {}s", snapshot.state.current_round, seconds_remaining);
                }
                TickOutcome::Counted { seconds_remaining } => {
                    debug!("{} {}s", snapshot.title, seconds_remaining);
                }
                TickOutcome::Stopped | TickOutcome::Halted => {}
            },
            Err(e) => {
                error!("Failed to advance timer: {}", e);
            }
        }
    }
}
