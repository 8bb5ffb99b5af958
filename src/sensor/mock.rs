use super::{SensorBridge, SensorSource};
use crate::error::SensorError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Simulated sensors for bench runs: a slow walk and a turning heading
pub struct MockSensorSource {
    origin: (f64, f64),
    step_degrees: f64,
    turn_degrees: f64,
    interval: Duration,
    limit: Option<u64>,
}

impl MockSensorSource {
    pub fn new(origin: (f64, f64), interval: Duration) -> Self {
        Self {
            origin,
            step_degrees: 0.0001,
            turn_degrees: 7.5,
            interval,
            limit: None,
        }
    }

    /// Stop after `readings` location/orientation pairs
    pub fn with_limit(mut self, readings: u64) -> Self {
        self.limit = Some(readings);
        self
    }

    /// Reading number `step` of the simulated walk
    pub fn reading(&self, step: u64) -> (f64, f64, f64) {
        let n = step as f64;
        (
            self.origin.0 + n * self.step_degrees,
            self.origin.1 + n * self.step_degrees,
            (n * self.turn_degrees) % 360.0,
        )
    }
}

impl Default for MockSensorSource {
    fn default() -> Self {
        Self::new((35.6892, 51.3890), Duration::from_secs(1))
    }
}

#[async_trait]
impl SensorSource for MockSensorSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn run(&mut self, bridge: SensorBridge) -> Result<(), SensorError> {
        let mut interval = tokio::time::interval(self.interval);
        let mut step = 0;

        loop {
            if self.limit.is_some_and(|limit| step >= limit) {
                return Ok(());
            }
            interval.tick().await;

            let (latitude, longitude, heading) = self.reading(step);
            debug!("Mock reading {}: {:.4}, {:.4} @ {:.1}", step, latitude, longitude, heading);
            bridge.on_location(latitude, longitude);
            bridge.on_orientation(&[heading]);
            step += 1;
        }
    }
}
