use crate::error::EventBusError;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Events that flow from input producers to the render loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RadarEvent {
    /// A press on the touch surface, in screen pixels
    PointerDown {
        x: i32,
        y: i32,
        timestamp: SystemTime,
    },
    /// The operator or the host asked the process to exit
    QuitRequested {
        timestamp: SystemTime,
        reason: String,
    },
    /// A background component hit an error it could not absorb locally
    SystemError { component: String, error: String },
}

impl RadarEvent {
    pub fn pointer_down(x: i32, y: i32) -> Self {
        RadarEvent::PointerDown {
            x,
            y,
            timestamp: SystemTime::now(),
        }
    }

    pub fn quit<S: Into<String>>(reason: S) -> Self {
        RadarEvent::QuitRequested {
            timestamp: SystemTime::now(),
            reason: reason.into(),
        }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            RadarEvent::PointerDown { x, y, .. } => format!("Pointer down at ({}, {})", x, y),
            RadarEvent::QuitRequested { reason, .. } => format!("Quit requested: {}", reason),
            RadarEvent::SystemError { component, error } => {
                format!("Error in {}: {}", component, error)
            }
        }
    }

    /// Get the event type as a string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            RadarEvent::PointerDown { .. } => "pointer_down",
            RadarEvent::QuitRequested { .. } => "quit_requested",
            RadarEvent::SystemError { .. } => "system_error",
        }
    }
}

/// Event bus for input producers using broadcast channels
pub struct EventBus {
    sender: broadcast::Sender<RadarEvent>,
}

impl EventBus {
    /// Create a new event bus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events and get a receiver
    pub fn subscribe(&self) -> broadcast::Receiver<RadarEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Never blocks, so blocking input threads may call it directly.
    pub fn publish(&self, event: RadarEvent) -> Result<usize, EventBusError> {
        match &event {
            RadarEvent::SystemError { component, error } => {
                error!("System error in {}: {}", component, error);
            }
            RadarEvent::QuitRequested { reason, .. } => {
                info!("Quit requested: {}", reason);
            }
            _ => debug!("Publishing event: {}", event.description()),
        }

        self.sender
            .send(event)
            .map_err(|e| EventBusError::PublishFailed {
                details: e.to_string(),
            })
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Event filter for selective event handling
#[derive(Debug, Clone)]
pub enum EventFilter {
    /// Accept all events
    All,
    /// Accept only specific event types
    EventTypes(Vec<&'static str>),
}

impl EventFilter {
    /// Check if an event passes this filter
    pub fn matches(&self, event: &RadarEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::EventTypes(types) => types.contains(&event.event_type()),
        }
    }
}

/// Filtered receiver that the render loop drains once per frame
pub struct EventReceiver {
    receiver: broadcast::Receiver<RadarEvent>,
    filter: EventFilter,
    name: String,
}

impl EventReceiver {
    pub fn new(
        receiver: broadcast::Receiver<RadarEvent>,
        filter: EventFilter,
        name: String,
    ) -> Self {
        Self {
            receiver,
            filter,
            name,
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<Option<RadarEvent>, EventBusError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        debug!(
                            "Receiver '{}' received event: {}",
                            self.name,
                            event.description()
                        );
                        return Ok(Some(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => {
                    return Ok(None);
                }
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("Receiver '{}' lagged behind by {} events", self.name, n);
                    return Err(EventBusError::Lagged { skipped: n });
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    debug!("Event bus closed for receiver '{}'", self.name);
                    return Err(EventBusError::Closed);
                }
            }
        }
    }

    /// Drain every pending event. Lag is logged and skipped; the remaining
    /// events are still delivered.
    pub fn drain(&mut self) -> Vec<RadarEvent> {
        let mut events = Vec::new();
        loop {
            match self.try_recv() {
                Ok(Some(event)) => events.push(event),
                Ok(None) | Err(EventBusError::Closed) => break,
                Err(_) => continue,
            }
        }
        events
    }
}
