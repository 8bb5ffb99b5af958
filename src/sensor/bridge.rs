use crate::geocode::PlaceResolver;
use crate::state::{Coordinate, SharedState};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Normalises raw sensor callbacks into the shared state.
///
/// Every location update starts its own place lookup. Lookups are never
/// joined, deduplicated or cancelled; whichever finishes last sets the label.
#[derive(Clone)]
pub struct SensorBridge {
    state: Arc<SharedState>,
    resolver: Option<PlaceResolver>,
    runtime: Handle,
}

impl SensorBridge {
    /// Must be called from within a tokio runtime
    pub fn new(state: Arc<SharedState>, resolver: Option<PlaceResolver>) -> Self {
        Self::with_runtime(state, resolver, Handle::current())
    }

    pub fn with_runtime(
        state: Arc<SharedState>,
        resolver: Option<PlaceResolver>,
        runtime: Handle,
    ) -> Self {
        Self {
            state,
            resolver,
            runtime,
        }
    }

    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    /// Store the fix and start a background lookup for it.
    ///
    /// The returned handle may be dropped; the lookup keeps running.
    pub fn on_location(&self, latitude: f64, longitude: f64) -> Option<JoinHandle<()>> {
        let coordinate = Coordinate::new(latitude, longitude);
        self.state.set_coordinate(coordinate);
        debug!("Location update: {}", coordinate.display());

        let resolver = self.resolver.clone()?;
        let state = Arc::clone(&self.state);
        Some(self.runtime.spawn(async move {
            resolver.resolve_into(coordinate, &state).await;
        }))
    }

    /// Use the first axis as the bearing; empty readings are ignored
    pub fn on_orientation(&self, axes: &[f64]) {
        if let Some(first) = axes.first() {
            self.state.set_bearing(*first);
            trace!("Bearing update: {:.1}", first);
        }
    }
}
