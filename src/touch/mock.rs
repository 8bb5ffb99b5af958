use crate::error::{FieldRadarError, Result};
use crate::events::{EventBus, RadarEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Touch input stand-in for running without hardware
pub struct MockTouchInputHandler {
    event_bus: Arc<EventBus>,
}

impl MockTouchInputHandler {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self { event_bus }
    }

    /// Replay a script of (delay, position) presses in the background
    pub fn start_script(&self, script: Vec<(Duration, (i32, i32))>) -> JoinHandle<()> {
        let event_bus = Arc::clone(&self.event_bus);

        tokio::spawn(async move {
            for (delay, (x, y)) in script {
                tokio::time::sleep(delay).await;
                debug!("Mock press at ({}, {})", x, y);
                let _ = event_bus.publish(RadarEvent::pointer_down(x, y));
            }
        })
    }

    /// Publish a press immediately
    pub fn trigger_press(&self, x: i32, y: i32) -> Result<()> {
        self.event_bus
            .publish(RadarEvent::pointer_down(x, y))
            .map_err(|e| FieldRadarError::component("mock_touch".to_string(), e.to_string()))?;

        Ok(())
    }
}
