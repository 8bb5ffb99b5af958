pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod fieldlog;
pub mod geocode;
pub mod keyboard_input;
pub mod pulse;
pub mod scene;
pub mod sensor;
pub mod state;
pub mod touch;

pub use app::{ComponentState, FieldRadarApp, ShutdownReason};
pub use config::FieldRadarConfig;
pub use display::{FramePresenter, FramebufferPresenter, NullPresenter, SnapshotPresenter};
pub use error::{FieldRadarError, Result};
pub use events::{EventBus, EventFilter, EventReceiver, RadarEvent};
pub use fieldlog::{FieldLogStore, FormField, LogRow, PendingEntry};
pub use geocode::{NominatimClient, PlaceResolver, ReverseGeocoder};
pub use pulse::{Pulse, PulseField};
pub use scene::{FrameOutcome, Layout, RasterSurface, SceneController, ScenePhase, Surface};
pub use sensor::{SensorBridge, SensorSource};
pub use state::{Coordinate, PlaceLabel, SharedState};
