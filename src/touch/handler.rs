use super::tracker::{AxisRange, PressTracker, TouchScaler, TouchSignal, DEFAULT_DEBOUNCE};
use super::types::{open_error, TouchErrorExt};
use crate::config::InputConfig;
use crate::error::TouchError;
use crate::events::{EventBus, RadarEvent};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

use evdev::{AbsoluteAxisType, Device, EventType, InputEventKind, Key, Synchronization};

const COMPONENT: &str = "touch_input";

/// Reads presses from an evdev touch controller and publishes them as
/// `PointerDown` events in screen pixels
pub struct TouchInputHandler {
    pub(crate) device_path: String,
    event_bus: Arc<EventBus>,
    touch_ranges: Option<(AxisRange, AxisRange)>,
    screen: (u32, u32),
    max_retries: u32,
    retry_delay: Duration,
}

impl TouchInputHandler {
    pub fn new(config: &InputConfig, screen: (u32, u32), event_bus: Arc<EventBus>) -> Self {
        Self {
            device_path: config.touch_device.clone(),
            event_bus,
            touch_ranges: AxisRange::from_config(config.touch_min, config.touch_max),
            screen,
            max_retries: 10,
            retry_delay: Duration::from_secs(5),
        }
    }

    /// Start monitoring in the background. Device failures are retried with
    /// exponential backoff and reported on the bus.
    pub fn start(&self) -> JoinHandle<()> {
        info!(
            "Starting touch input handler for device: {}",
            self.device_path
        );

        let device_path = self.device_path.clone();
        let event_bus = Arc::clone(&self.event_bus);
        let touch_ranges = self.touch_ranges;
        let screen = self.screen;
        let max_retries = self.max_retries;
        let retry_delay = self.retry_delay;

        tokio::spawn(async move {
            let mut retry_count = 0;

            loop {
                match Self::monitor_touch_device(&device_path, &event_bus, touch_ranges, screen)
                    .await
                {
                    Ok(()) => {
                        info!("Touch device monitoring ended normally");
                        break;
                    }
                    Err(e) => {
                        error!("Touch device error: {}", e.user_message());
                        retry_count += 1;

                        let _ = event_bus.publish(RadarEvent::SystemError {
                            component: COMPONENT.to_string(),
                            error: format!("Attempt {}/{}: {}", retry_count, max_retries, e),
                        });

                        if !e.is_recoverable() || retry_count >= max_retries {
                            error!(
                                "Touch input handler giving up after {} attempts",
                                retry_count
                            );
                            break;
                        }

                        let delay = retry_delay * 2_u32.pow(retry_count.min(5));
                        warn!(
                            "Retrying touch device connection in {:?} (attempt {}/{})",
                            delay, retry_count, max_retries
                        );
                        sleep(delay).await;
                    }
                }
            }
        })
    }

    async fn monitor_touch_device(
        device_path: &str,
        event_bus: &EventBus,
        touch_ranges: Option<(AxisRange, AxisRange)>,
        screen: (u32, u32),
    ) -> Result<(), TouchError> {
        let device = Device::open(device_path).map_err(|e| open_error(device_path, &e))?;

        info!(
            "Touch device opened successfully: {} ({})",
            device_path,
            device.name().unwrap_or("Unknown")
        );
        debug!("Device capabilities: {:?}", device.supported_events());

        Self::validate_touch_device(&device, device_path)?;

        let ranges = touch_ranges.or_else(|| Self::axis_ranges(&device));
        debug!("Touch scaling: raw ranges {:?} onto {:?}", ranges, screen);
        let mut tracker = PressTracker::new(TouchScaler::new(ranges, screen), DEFAULT_DEBOUNCE);

        let mut events = device
            .into_event_stream()
            .map_err(|e| TouchError::DeviceRead {
                details: e.to_string(),
            })?;

        let mut consecutive_errors = 0;
        const MAX_CONSECUTIVE_ERRORS: u32 = 5;

        loop {
            match events.next_event().await {
                Ok(event) => {
                    consecutive_errors = 0;

                    let Some(signal) = Self::signal_for(&event) else {
                        continue;
                    };
                    if let Some((x, y)) = tracker.feed(signal, Instant::now()) {
                        debug!("Touch press at ({}, {})", x, y);
                        if let Err(e) = event_bus.publish(RadarEvent::pointer_down(x, y)) {
                            debug!("Press dropped: {}", e);
                        }
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;

                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        return Err(TouchError::DeviceRead {
                            details: format!("Too many consecutive errors: {}", e),
                        });
                    }

                    warn!(
                        "Error reading from touch device (attempt {}): {}",
                        consecutive_errors, e
                    );
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }

    /// Validate that the device can report presses with a position
    pub(crate) fn validate_touch_device(device: &Device, device_path: &str) -> Result<(), TouchError> {
        let supported_events = device.supported_events();

        if !supported_events.contains(EventType::KEY) {
            return Err(TouchError::UnsupportedDevice(format!(
                "{} does not support key events",
                device_path
            )));
        }
        if !supported_events.contains(EventType::ABSOLUTE) {
            return Err(TouchError::UnsupportedDevice(format!(
                "{} does not report absolute positions",
                device_path
            )));
        }

        if let Some(keys) = device.supported_keys() {
            if keys.contains(Key::BTN_TOUCH) || keys.contains(Key::BTN_LEFT) {
                debug!("Device {} supports touch keys", device_path);
            } else {
                warn!(
                    "Device {} does not have standard touch keys, but will still be monitored",
                    device_path
                );
            }
        }

        Ok(())
    }

    /// Raw axis ranges reported by the controller, when it has them
    fn axis_ranges(device: &Device) -> Option<(AxisRange, AxisRange)> {
        let state = device.get_abs_state().ok()?;
        let x = &state[AbsoluteAxisType::ABS_X.0 as usize];
        let y = &state[AbsoluteAxisType::ABS_Y.0 as usize];
        (x.maximum > x.minimum && y.maximum > y.minimum).then_some((
            AxisRange::new(x.minimum, x.maximum),
            AxisRange::new(y.minimum, y.maximum),
        ))
    }

    pub(crate) fn signal_for(event: &evdev::InputEvent) -> Option<TouchSignal> {
        match event.kind() {
            InputEventKind::Key(Key::BTN_TOUCH) | InputEventKind::Key(Key::BTN_LEFT) => {
                match event.value() {
                    1 => Some(TouchSignal::Contact(true)),
                    0 => Some(TouchSignal::Contact(false)),
                    _ => None,
                }
            }
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_X)
            | InputEventKind::AbsAxis(AbsoluteAxisType::ABS_MT_POSITION_X) => {
                Some(TouchSignal::AxisX(event.value()))
            }
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_Y)
            | InputEventKind::AbsAxis(AbsoluteAxisType::ABS_MT_POSITION_Y) => {
                Some(TouchSignal::AxisY(event.value()))
            }
            InputEventKind::Synchronization(Synchronization::SYN_REPORT) => Some(TouchSignal::Sync),
            _ => None,
        }
    }
}
