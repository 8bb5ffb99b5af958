use super::types::ComponentState;
use crate::config::FieldRadarConfig;
use crate::display::{
    FramePresenter, FramebufferPresenter, NullPresenter, SnapshotPresenter, DEFAULT_SNAPSHOT_EVERY,
};
use crate::error::Result;
use crate::events::{EventBus, EventFilter, EventReceiver};
use crate::fieldlog::ReportClock;
use crate::geocode::{NominatimClient, PlaceResolver};
use crate::keyboard_input::KeyboardInputHandler;
use crate::scene::{FontSet, RasterSurface, SceneController};
use crate::state::SharedState;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

/// Owns every component of the overlay and drives the render loop
pub struct FieldRadarApp {
    pub(super) config: FieldRadarConfig,
    pub(super) event_bus: Arc<EventBus>,
    pub(super) receiver: EventReceiver,
    pub(super) state: Arc<SharedState>,
    pub(super) resolver: PlaceResolver,
    pub(super) controller: SceneController<RasterSurface>,
    pub(super) presenter: Box<dyn FramePresenter>,
    pub(super) keyboard_handler: Option<KeyboardInputHandler>,

    // Lifecycle management
    pub(super) tasks: Vec<(&'static str, JoinHandle<()>)>,
    pub(super) component_states: Arc<Mutex<HashMap<String, ComponentState>>>,
}

impl FieldRadarApp {
    /// Build the app with the presenter the display config asks for
    pub fn new(config: FieldRadarConfig) -> Result<Self> {
        let display = &config.display;
        let (presenter, screen): (Box<dyn FramePresenter>, (u32, u32)) = if display.headless {
            let presenter: Box<dyn FramePresenter> = match &display.snapshot_path {
                Some(path) => Box::new(SnapshotPresenter::new(path, DEFAULT_SNAPSHOT_EVERY)),
                None => Box::new(NullPresenter::new()),
            };
            (presenter, display.resolution)
        } else {
            let framebuffer = FramebufferPresenter::open(display)?;
            let geometry = framebuffer.geometry();
            (Box::new(framebuffer), (geometry.width, geometry.height))
        };

        Ok(Self::with_presenter(config, presenter, screen))
    }

    /// Build the app around an explicit presenter and screen size
    pub fn with_presenter(
        config: FieldRadarConfig,
        presenter: Box<dyn FramePresenter>,
        screen: (u32, u32),
    ) -> Self {
        let event_bus = Arc::new(EventBus::new(config.system.event_bus_capacity));
        let receiver = EventReceiver::new(
            event_bus.subscribe(),
            EventFilter::All,
            "render_loop".to_string(),
        );
        let state = Arc::new(SharedState::new());

        let geocoder = Arc::new(NominatimClient::from_config(&config.geocode));
        let resolver = PlaceResolver::new(geocoder.clone(), geocoder.timeout());

        let fonts = FontSet::load(
            &config.display.font_path,
            &config.display.fallback_font_paths,
            screen.0,
        );
        let surface = RasterSurface::new(screen.0, screen.1, fonts);
        let clock = ReportClock::from_config(config.export.timezone.as_deref());
        let controller = SceneController::new(
            config.radar.clone(),
            surface,
            Arc::clone(&state),
            config.export.directory.clone(),
            clock,
            Instant::now(),
        );

        let keyboard_handler = config.input.keyboard.then(|| {
            KeyboardInputHandler::new(Arc::clone(&event_bus), controller.layout().clone())
        });

        info!("Field radar prepared for a {}x{} screen", screen.0, screen.1);

        Self {
            config,
            event_bus,
            receiver,
            state,
            resolver,
            controller,
            presenter,
            keyboard_handler,
            tasks: Vec::new(),
            component_states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    pub fn shared_state(&self) -> Arc<SharedState> {
        Arc::clone(&self.state)
    }

    pub fn controller(&self) -> &SceneController<RasterSurface> {
        &self.controller
    }

    pub fn config(&self) -> &FieldRadarConfig {
        &self.config
    }
}
