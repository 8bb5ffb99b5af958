use super::*;
use crate::error::TouchError;
use crate::events::{EventBus, RadarEvent};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn tracker() -> PressTracker {
    PressTracker::new(TouchScaler::new(None, (800, 480)), DEFAULT_DEBOUNCE)
}

fn press(tracker: &mut PressTracker, x: i32, y: i32, now: Instant) -> Option<(i32, i32)> {
    tracker.feed(TouchSignal::Contact(true), now);
    tracker.feed(TouchSignal::AxisX(x), now);
    tracker.feed(TouchSignal::AxisY(y), now);
    tracker.feed(TouchSignal::Sync, now)
}

fn release(tracker: &mut PressTracker, now: Instant) {
    tracker.feed(TouchSignal::Contact(false), now);
    tracker.feed(TouchSignal::Sync, now);
}

#[tokio::test]
async fn test_mock_touch_handler() {
    let event_bus = Arc::new(EventBus::new(16));
    let mut receiver = event_bus.subscribe();

    let mock_handler = MockTouchInputHandler::new(Arc::clone(&event_bus));
    mock_handler.trigger_press(400, 290).unwrap();

    match receiver.recv().await.unwrap() {
        RadarEvent::PointerDown { x, y, .. } => assert_eq!((x, y), (400, 290)),
        other => panic!("Expected PointerDown, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_mock_script_replays_in_order() {
    let event_bus = Arc::new(EventBus::new(16));
    let mut receiver = event_bus.subscribe();

    let mock_handler = MockTouchInputHandler::new(Arc::clone(&event_bus));
    mock_handler
        .start_script(vec![
            (Duration::from_secs(1), (1, 2)),
            (Duration::from_secs(1), (3, 4)),
        ])
        .await
        .unwrap();

    let mut positions = Vec::new();
    while let Ok(RadarEvent::PointerDown { x, y, .. }) = receiver.try_recv() {
        positions.push((x, y));
    }
    assert_eq!(positions, vec![(1, 2), (3, 4)]);
}

#[test]
fn test_mock_trigger_without_subscribers_fails() {
    let event_bus = Arc::new(EventBus::new(16));
    let mock_handler = MockTouchInputHandler::new(event_bus);
    assert!(mock_handler.trigger_press(1, 1).is_err());
}

#[test]
fn test_press_resolves_after_sync() {
    let mut tracker = tracker();
    let now = Instant::now();

    assert_eq!(tracker.feed(TouchSignal::Contact(true), now), None);
    assert_eq!(tracker.feed(TouchSignal::AxisX(120), now), None);
    assert_eq!(tracker.feed(TouchSignal::AxisY(300), now), None);
    assert_eq!(tracker.feed(TouchSignal::Sync, now), Some((120, 300)));
}

#[test]
fn test_held_contact_reports_once() {
    let mut tracker = tracker();
    let now = Instant::now();

    assert!(press(&mut tracker, 10, 10, now).is_some());
    let later = now + Duration::from_secs(1);
    tracker.feed(TouchSignal::AxisX(50), later);
    assert_eq!(tracker.feed(TouchSignal::Sync, later), None);
}

#[test]
fn test_presses_within_debounce_are_dropped() {
    let mut tracker = tracker();
    let start = Instant::now();

    assert!(press(&mut tracker, 10, 10, start).is_some());
    release(&mut tracker, start);

    assert_eq!(press(&mut tracker, 10, 10, start + Duration::from_millis(100)), None);
    release(&mut tracker, start + Duration::from_millis(100));

    assert_eq!(
        press(&mut tracker, 20, 20, start + Duration::from_millis(400)),
        Some((20, 20))
    );
}

#[test]
fn test_press_waits_for_position() {
    let mut tracker = tracker();
    let now = Instant::now();

    tracker.feed(TouchSignal::Contact(true), now);
    assert_eq!(tracker.feed(TouchSignal::Sync, now), None);

    tracker.feed(TouchSignal::AxisX(5), now);
    tracker.feed(TouchSignal::AxisY(6), now);
    assert_eq!(tracker.feed(TouchSignal::Sync, now), Some((5, 6)));
}

#[test]
fn test_scaler_maps_raw_range_to_screen() {
    let scaler = TouchScaler::new(AxisRange::from_config(None, Some((4095, 4095))), (800, 480));
    assert_eq!(scaler.scale(0, 0), (0, 0));
    assert_eq!(scaler.scale(2048, 2048), (400, 240));
    assert_eq!(scaler.scale(4095, 4095), (799, 479));
}

#[test]
fn test_scaler_clamps_raw_pixels() {
    let scaler = TouchScaler::new(None, (800, 480));
    assert_eq!(scaler.scale(-5, 900), (0, 479));
    let degenerate = AxisRange::from_config(None, Some((0, 0)));
    assert_eq!(TouchScaler::new(degenerate, (800, 480)).scale(10, 20), (10, 20));
}

#[test]
fn test_scaler_offsets_by_axis_minimum() {
    let ranges = AxisRange::from_config(Some((200, 300)), Some((3900, 3800)));
    let scaler = TouchScaler::new(ranges, (800, 480));
    assert_eq!(scaler.scale(200, 300), (0, 0));
    assert_eq!(scaler.scale(2050, 2050), (400, 240));
    assert_eq!(scaler.scale(100, 100), (0, 0));
    assert_eq!(scaler.scale(3900, 3800), (799, 479));
}

#[test]
fn test_open_error_classification() {
    let missing = std::io::Error::from(std::io::ErrorKind::NotFound);
    assert!(matches!(
        open_error("/dev/input/event9", &missing),
        TouchError::DeviceNotFound(_)
    ));

    let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
    let error = open_error("/dev/input/event9", &denied);
    assert!(matches!(error, TouchError::PermissionDenied(_)));
    assert!(!error.is_recoverable());
    assert!(error.user_message().contains("/dev/input/event9"));
}

#[cfg(all(feature = "touch", target_os = "linux"))]
mod evdev_mapping {
    use super::super::TouchInputHandler;
    use super::*;
    use evdev::{AbsoluteAxisType, EventType, InputEvent, Key};

    #[test]
    fn test_signal_for_touch_events() {
        let press = InputEvent::new(EventType::KEY, Key::BTN_TOUCH.code(), 1);
        assert_eq!(
            TouchInputHandler::signal_for(&press),
            Some(TouchSignal::Contact(true))
        );

        let release = InputEvent::new(EventType::KEY, Key::BTN_TOUCH.code(), 0);
        assert_eq!(
            TouchInputHandler::signal_for(&release),
            Some(TouchSignal::Contact(false))
        );

        let other_key = InputEvent::new(EventType::KEY, Key::KEY_A.code(), 1);
        assert_eq!(TouchInputHandler::signal_for(&other_key), None);

        let x = InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_MT_POSITION_X.0, 100);
        assert_eq!(TouchInputHandler::signal_for(&x), Some(TouchSignal::AxisX(100)));

        let sync = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);
        assert_eq!(TouchInputHandler::signal_for(&sync), Some(TouchSignal::Sync));
    }

    #[tokio::test]
    async fn test_touch_handler_creation() {
        let config = crate::config::FieldRadarConfig::default().input;
        let event_bus = Arc::new(EventBus::new(16));

        let handler = TouchInputHandler::new(&config, (800, 480), event_bus);
        assert_eq!(handler.device_path, "/dev/input/event0");
    }
}
