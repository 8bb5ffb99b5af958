use super::{ComponentState, FieldRadarApp, ShutdownReason};
use crate::error::Result;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

impl FieldRadarApp {
    /// Stop every background task. Rows not yet exported are reported and
    /// dropped; nothing is written implicitly.
    pub async fn shutdown(&mut self, reason: &ShutdownReason) -> Result<i32> {
        info!("Beginning graceful shutdown");

        let mut exit_code = reason.exit_code();

        if let Some(keyboard) = &self.keyboard_handler {
            self.set_component_state("keyboard", ComponentState::Stopping)
                .await;
            match keyboard.stop().await {
                Ok(()) => {
                    self.set_component_state("keyboard", ComponentState::Stopped)
                        .await
                }
                Err(e) => {
                    error!("Error stopping keyboard: {}", e);
                    self.set_component_state("keyboard", ComponentState::Failed)
                        .await;
                    exit_code = 1;
                }
            }
        }

        for (name, handle) in self.tasks.drain(..).collect::<Vec<_>>() {
            handle.abort();
            match timeout(Duration::from_secs(2), handle).await {
                Ok(Err(e)) if !e.is_cancelled() => {
                    error!("{} task ended abnormally: {}", name, e);
                }
                Err(_) => warn!("{} task did not stop in time", name),
                _ => {}
            }
            self.set_component_state(name, ComponentState::Stopped)
                .await;
        }

        let unsaved = self.controller.unexported_rows();
        if unsaved > 0 {
            warn!("{} captured rows were not exported since the last report", unsaved);
        }

        info!("Graceful shutdown completed with exit code: {}", exit_code);
        Ok(exit_code)
    }
}
