use super::{FieldRadarApp, ShutdownReason};
use crate::error::Result;
use crate::events::RadarEvent;
use crate::scene::FrameOutcome;
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// Consecutive presentation failures tolerated before giving up
const MAX_PRESENT_FAILURES: u32 = 30;

impl FieldRadarApp {
    /// Start every component, render until asked to quit, then shut down.
    /// Returns the process exit code.
    pub async fn run(&mut self) -> Result<i32> {
        self.start().await?;
        info!("Field radar is running");

        let reason = self.render_loop().await;
        info!("Shutdown initiated: {:?}", reason);

        let exit_code = self.shutdown(&reason).await?;
        info!("Field radar shutdown complete");
        Ok(exit_code)
    }

    /// Fixed-rate frame loop. A slow frame delays the next one instead of
    /// queueing a burst of catch-up frames.
    pub(super) async fn render_loop(&mut self) -> ShutdownReason {
        let fps = self.config.display.fps.max(1);
        let mut ticker = interval(Duration::from_secs_f64(1.0 / fps as f64));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut present_failures = 0;

        loop {
            ticker.tick().await;

            let events = self.receiver.drain();
            let quit_reason = events.iter().find_map(|event| match event {
                RadarEvent::QuitRequested { reason, .. } => Some(reason.clone()),
                _ => None,
            });

            if self.controller.frame(events, Instant::now()) == FrameOutcome::Quit {
                return ShutdownReason::Requested(
                    quit_reason.unwrap_or_else(|| "quit".to_string()),
                );
            }

            match self.presenter.present(self.controller.surface().image()) {
                Ok(()) => present_failures = 0,
                Err(e) => {
                    present_failures += 1;
                    warn!(
                        "Failed to present frame ({}/{}): {}",
                        present_failures, MAX_PRESENT_FAILURES, e
                    );
                    if present_failures >= MAX_PRESENT_FAILURES {
                        error!("Display keeps failing, stopping");
                        return ShutdownReason::Error(e.to_string());
                    }
                }
            }
        }
    }
}
