mod bridge;
mod gpsd;
mod mock;

pub use bridge::SensorBridge;
pub use gpsd::{parse_report, GpsdReport, GpsdSource};
pub use mock::MockSensorSource;

use crate::config::{SensorConfig, SensorSourceKind};
use crate::error::SensorError;
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A host service feeding location and orientation readings into the bridge
#[async_trait]
pub trait SensorSource: Send {
    fn name(&self) -> &'static str;

    /// Deliver readings until the service goes away
    async fn run(&mut self, bridge: SensorBridge) -> Result<(), SensorError>;
}

/// Build the configured source, or `None` when sensors are disabled
pub fn source_from_config(config: &SensorConfig) -> Option<Box<dyn SensorSource>> {
    match config.source {
        SensorSourceKind::Gpsd => Some(Box::new(GpsdSource::new(config.gpsd_address.clone()))),
        SensorSourceKind::Mock => Some(Box::new(MockSensorSource::default())),
        SensorSourceKind::None => None,
    }
}

/// Run a source in the background. Any failure leaves the bridge inert:
/// the display keeps its last values and nothing else is affected.
pub fn spawn_source(mut source: Box<dyn SensorSource>, bridge: SensorBridge) -> JoinHandle<()> {
    tokio::spawn(async move {
        let name = source.name();
        info!("Starting {} sensor source", name);
        match source.run(bridge).await {
            Ok(()) => info!("Sensor source {} finished", name),
            Err(e) => warn!(
                "Sensor source {} unavailable, readings will not update: {}",
                name, e
            ),
        }
    })
}
