use super::{ComponentState, FieldRadarApp};
use crate::error::Result;
use crate::events::RadarEvent;
use crate::sensor::{source_from_config, spawn_source, SensorBridge};
use std::sync::Arc;
use tracing::{info, warn};

impl FieldRadarApp {
    /// Start the background producers: sensors, touch, keyboard and signals
    pub async fn start(&mut self) -> Result<()> {
        info!("Starting field radar components");

        match source_from_config(&self.config.sensor) {
            Some(source) => {
                self.set_component_state("sensor", ComponentState::Starting)
                    .await;
                let bridge = SensorBridge::new(Arc::clone(&self.state), Some(self.resolver.clone()));
                self.tasks.push(("sensor", spawn_source(source, bridge)));
                self.set_component_state("sensor", ComponentState::Running)
                    .await;
            }
            None => info!("Sensor source disabled; coordinate and bearing stay at defaults"),
        }

        if self.config.input.touch_enabled {
            self.start_touch().await;
        }

        if let Some(keyboard) = &self.keyboard_handler {
            self.set_component_state("keyboard", ComponentState::Starting)
                .await;
            keyboard.start().await?;
            self.set_component_state("keyboard", ComponentState::Running)
                .await;
        }

        self.setup_signal_handlers();

        info!("All components started");
        Ok(())
    }

    #[cfg(all(feature = "touch", target_os = "linux"))]
    async fn start_touch(&mut self) {
        use crate::touch::TouchInputHandler;

        self.set_component_state("touch", ComponentState::Starting)
            .await;
        let handler = TouchInputHandler::new(
            &self.config.input,
            self.controller.layout().size(),
            Arc::clone(&self.event_bus),
        );
        self.tasks.push(("touch", handler.start()));
        self.set_component_state("touch", ComponentState::Running)
            .await;
    }

    #[cfg(not(all(feature = "touch", target_os = "linux")))]
    async fn start_touch(&mut self) {
        warn!("Touch input requested but not supported in this build");
        self.set_component_state("touch", ComponentState::Failed)
            .await;
    }

    /// SIGINT and SIGTERM become quit events on the bus
    fn setup_signal_handlers(&mut self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let event_bus = Arc::clone(&self.event_bus);
            let handle = tokio::spawn(async move {
                let mut sigterm = match signal(SignalKind::terminate()) {
                    Ok(sigterm) => sigterm,
                    Err(e) => {
                        warn!("Failed to register SIGTERM handler: {}", e);
                        return;
                    }
                };
                if sigterm.recv().await.is_some() {
                    info!("Received SIGTERM signal");
                    let _ = event_bus.publish(RadarEvent::quit("SIGTERM"));
                }
            });
            self.tasks.push(("sigterm", handle));
        }

        let event_bus = Arc::clone(&self.event_bus);
        let handle = tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Received SIGINT signal (Ctrl+C)");
                let _ = event_bus.publish(RadarEvent::quit("SIGINT"));
            }
        });
        self.tasks.push(("sigint", handle));
    }
}
