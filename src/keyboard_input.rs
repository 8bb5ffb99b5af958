use crate::error::Result;
use crate::events::{EventBus, RadarEvent};
use crate::scene::{Button, Layout};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Bench keyboard: q/Esc quits, c presses CAPTURE, e presses CSV
pub struct KeyboardInputHandler {
    event_bus: Arc<EventBus>,
    layout: Layout,
    cancellation_token: CancellationToken,
}

impl KeyboardInputHandler {
    pub fn new(event_bus: Arc<EventBus>, layout: Layout) -> Self {
        Self {
            event_bus,
            layout,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Translate a key into the event it stands for
    pub fn event_for_key(layout: &Layout, code: KeyCode) -> Option<RadarEvent> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(RadarEvent::quit("User requested via keyboard")),
            KeyCode::Char('c') => {
                let (x, y) = layout.button_center(Button::Capture);
                Some(RadarEvent::pointer_down(x, y))
            }
            KeyCode::Char('e') => {
                let (x, y) = layout.button_center(Button::Export);
                Some(RadarEvent::pointer_down(x, y))
            }
            _ => None,
        }
    }

    /// Start listening for keyboard input
    pub async fn start(&self) -> Result<()> {
        info!("Starting keyboard input handler - q quits, c captures, e exports");

        let event_bus = Arc::clone(&self.event_bus);
        let layout = self.layout.clone();
        let cancellation_token = self.cancellation_token.clone();

        task::spawn_blocking(move || {
            if let Err(e) = enable_raw_mode() {
                error!("Failed to enable raw mode for keyboard input: {}", e);
                return;
            }

            debug!("Raw mode enabled - keyboard handler active");

            loop {
                if cancellation_token.is_cancelled() {
                    debug!("Keyboard input handler stopping");
                    break;
                }

                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => {
                        let Ok(Event::Key(key_event)) = event::read() else {
                            continue;
                        };
                        if key_event.kind != KeyEventKind::Press {
                            continue;
                        }

                        match Self::event_for_key(&layout, key_event.code) {
                            Some(radar_event) => {
                                let quitting =
                                    matches!(radar_event, RadarEvent::QuitRequested { .. });
                                debug!("Key {:?}: {}", key_event.code, radar_event.description());
                                if let Err(e) = event_bus.publish(radar_event) {
                                    warn!("Failed to publish keyboard event: {}", e);
                                }
                                if quitting {
                                    break;
                                }
                            }
                            None => debug!("Key pressed: {:?}", key_event.code),
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!("Error polling for keyboard events: {}", e);
                    }
                }
            }

            if let Err(e) = disable_raw_mode() {
                error!("Failed to disable raw mode: {}", e);
            } else {
                debug!("Raw mode disabled");
            }

            debug!("Keyboard input handler task exited");
        });

        Ok(())
    }

    /// Stop the keyboard input handler
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping keyboard input handler");
        self.cancellation_token.cancel();

        // Give the polling thread one poll interval to restore the terminal.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = disable_raw_mode();

        Ok(())
    }
}
