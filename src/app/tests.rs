use super::*;
use crate::config::{FieldRadarConfig, SensorSourceKind};
use crate::display::NullPresenter;
use crate::events::RadarEvent;
use crate::scene::Button;
use crate::state::PlaceLabel;
use std::time::Duration;
use tokio::time::{sleep, timeout};

fn create_test_config(export_dir: &std::path::Path) -> FieldRadarConfig {
    let mut config = FieldRadarConfig::default();
    config.display.headless = true;
    config.display.font_path = "/nonexistent/font.ttf".to_string();
    config.display.fallback_font_paths = Vec::new();
    config.radar.splash_seconds = 0;
    config.input.touch_enabled = false;
    config.input.keyboard = false;
    config.sensor.source = SensorSourceKind::None;
    config.geocode.endpoint = "http://127.0.0.1:1/reverse".to_string();
    config.geocode.timeout_seconds = 1;
    config.export.directory = export_dir.to_string_lossy().to_string();
    config
}

fn create_app(config: FieldRadarConfig) -> FieldRadarApp {
    FieldRadarApp::with_presenter(config, Box::new(NullPresenter::new()), (800, 480))
}

#[tokio::test]
async fn test_app_creation() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_app(create_test_config(dir.path()));

    assert_eq!(app.controller().layout().size(), (800, 480));
    assert!(app.controller().log().is_empty());
    assert_eq!(app.shared_state().place_label(), PlaceLabel::Searching);
    assert!(app.get_all_component_states().await.is_empty());
}

#[tokio::test]
async fn test_quit_event_stops_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_app(create_test_config(dir.path()));
    let event_bus = app.event_bus();

    tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        event_bus.publish(RadarEvent::quit("test")).unwrap();
    });

    let exit_code = timeout(Duration::from_secs(5), app.run())
        .await
        .expect("run should stop after quit")
        .unwrap();
    assert_eq!(exit_code, 0);
}

#[tokio::test]
async fn test_press_events_reach_scene() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_app(create_test_config(dir.path()));
    let event_bus = app.event_bus();
    let (cx, cy) = app.controller().layout().button_center(Button::Capture);
    let (ex, ey) = app.controller().layout().button_center(Button::Export);

    tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        event_bus.publish(RadarEvent::pointer_down(cx, cy)).unwrap();
        sleep(Duration::from_millis(100)).await;
        event_bus.publish(RadarEvent::pointer_down(ex, ey)).unwrap();
        sleep(Duration::from_millis(100)).await;
        event_bus.publish(RadarEvent::quit("test")).unwrap();
    });

    let exit_code = timeout(Duration::from_secs(5), app.run())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(exit_code, 0);
    assert_eq!(app.controller().log().len(), 1);
    assert_eq!(app.controller().export_count(), 1);
    assert_eq!(app.controller().unexported_rows(), 0);

    let reports = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(reports, 1);
}

#[tokio::test]
async fn test_mock_sensor_feeds_shared_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(dir.path());
    config.sensor.source = SensorSourceKind::Mock;
    let mut app = create_app(config);
    let state = app.shared_state();
    let event_bus = app.event_bus();

    tokio::spawn(async move {
        sleep(Duration::from_millis(300)).await;
        event_bus.publish(RadarEvent::quit("test")).unwrap();
    });

    timeout(Duration::from_secs(5), app.run())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(state.coordinate_text(), "35.6892 N, 51.3890 E");
    assert_eq!(
        app.get_component_state("sensor").await,
        Some(ComponentState::Stopped)
    );
}

#[test]
fn test_shutdown_reason_exit_codes() {
    assert_eq!(ShutdownReason::Requested("SIGINT".to_string()).exit_code(), 0);
    assert_eq!(ShutdownReason::Error("display".to_string()).exit_code(), 1);
}
