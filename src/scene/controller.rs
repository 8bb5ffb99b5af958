use super::fonts::FontTier;
use super::layout::{cardinal_positions, Button, Layout};
use super::surface::{palette, Surface, TextAnchor};
use crate::config::RadarConfig;
use crate::events::RadarEvent;
use crate::fieldlog::{FieldLogStore, ReportClock};
use crate::pulse::PulseField;
use crate::state::SharedState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// How long an on-screen notice stays up
const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Splash,
    Radar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Screen selection flags. The log view and row selection are reserved for
/// a review screen that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneState {
    pub splash_active: bool,
    pub log_view_active: bool,
    pub selected_index: Option<usize>,
}

/// Transient message drawn above the capture button
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub until: Instant,
}

/// The per-frame loop body: input handling, animation and drawing
pub struct SceneController<S: Surface> {
    radar: RadarConfig,
    layout: Layout,
    surface: S,
    state: Arc<SharedState>,
    log: FieldLogStore,
    pulses: PulseField,
    phase: ScenePhase,
    started_at: Instant,
    radar_frames: u64,
    export_dir: PathBuf,
    clock: ReportClock,
    exports: u64,
    exported_rows: usize,
    notice: Option<Notice>,
    log_view_active: bool,
    selected_index: Option<usize>,
}

impl<S: Surface> SceneController<S> {
    pub fn new(
        radar: RadarConfig,
        surface: S,
        state: Arc<SharedState>,
        export_dir: impl Into<PathBuf>,
        clock: ReportClock,
        started_at: Instant,
    ) -> Self {
        let (width, height) = surface.size();
        let layout = Layout::new(width, height);
        let pulses = PulseField::from_config(layout.radar_origin, &radar);

        Self {
            radar,
            layout,
            surface,
            state,
            log: FieldLogStore::new(),
            pulses,
            phase: ScenePhase::Splash,
            started_at,
            radar_frames: 0,
            export_dir: export_dir.into(),
            clock,
            exports: 0,
            exported_rows: 0,
            notice: None,
            log_view_active: false,
            selected_index: None,
        }
    }

    /// Build one frame. Returns `Quit` as soon as a quit event is seen; the
    /// rest of that frame is abandoned.
    pub fn frame<I>(&mut self, events: I, now: Instant) -> FrameOutcome
    where
        I: IntoIterator<Item = RadarEvent>,
    {
        self.surface.clear(palette::BACKGROUND);

        for event in events {
            match event {
                RadarEvent::QuitRequested { reason, .. } => {
                    info!("Leaving render loop: {}", reason);
                    return FrameOutcome::Quit;
                }
                RadarEvent::PointerDown { x, y, .. } => {
                    if self.phase == ScenePhase::Radar {
                        self.handle_press(x, y, now);
                    } else {
                        debug!("Ignoring press at ({}, {}) during splash", x, y);
                    }
                }
                RadarEvent::SystemError { .. } => {}
            }
        }

        match self.phase {
            ScenePhase::Splash => self.splash_frame(now),
            ScenePhase::Radar => self.radar_frame(now),
        }

        FrameOutcome::Continue
    }

    fn handle_press(&mut self, x: i32, y: i32, now: Instant) {
        match self.layout.hit_test(x, y) {
            Some(Button::Capture) => self.capture(),
            Some(Button::Export) => self.export(now),
            None => debug!("Press at ({}, {}) hit no button", x, y),
        }
    }

    /// Snapshot the current coordinate and pending entry into a new row
    pub fn capture(&mut self) {
        let coordinate = self.state.coordinate_text();
        self.log.capture(&coordinate, self.clock.now());
    }

    /// Write every row to a report. Failures become a notice; rows are kept.
    pub fn export(&mut self, now: Instant) {
        self.exports += 1;
        match self.log.export(&self.export_dir, self.clock.now()) {
            Ok(path) => {
                self.exported_rows = self.log.len();
                debug!("Report written to {}", path.display());
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.notice = Some(Notice {
                    text: "EXPORT FAILED".to_string(),
                    until: now + NOTICE_DURATION,
                });
            }
        }
    }

    fn splash_frame(&mut self, now: Instant) {
        let splash = Duration::from_secs(self.radar.splash_seconds);
        if now.saturating_duration_since(self.started_at) < splash {
            let (cx, cy) = self.layout.screen_center();
            self.surface.text(
                &self.radar.title,
                FontTier::Huge,
                TextAnchor::Center(cx, cy),
                palette::NEON,
            );
            self.surface.text(
                &self.radar.attribution,
                FontTier::Small,
                TextAnchor::Center(cx, cy + 60),
                palette::NEON_DIM,
            );
        } else {
            info!("Splash finished, switching to radar");
            self.phase = ScenePhase::Radar;
        }
    }

    fn radar_frame(&mut self, now: Instant) {
        if self.radar_frames % self.radar.pulse_interval_frames == 0 {
            self.pulses.spawn();
        }
        self.radar_frames += 1;

        self.pulses.tick();
        for pulse in self.pulses.pulses() {
            self.surface.ring(
                (pulse.x, pulse.y),
                pulse.radius,
                2,
                palette::with_alpha(palette::NEON, pulse.stroke_alpha()),
            );
        }

        let bearing = self.state.bearing() as f32;
        for (cardinal, x, y) in
            cardinal_positions(self.layout.radar_origin, self.radar.label_radius, bearing)
        {
            self.surface.text(
                cardinal.label(),
                FontTier::Small,
                TextAnchor::TopLeft(x.round() as i32 - 10, y.round() as i32 - 10),
                palette::NEON,
            );
        }

        let (lx, ly) = self.layout.place_label_position();
        self.surface.text(
            self.state.place_label().as_str(),
            FontTier::Mid,
            TextAnchor::TopLeft(lx, ly),
            palette::NEON,
        );
        let (cx, cy) = self.layout.coordinate_position();
        self.surface.text(
            &self.state.coordinate_text(),
            FontTier::Small,
            TextAnchor::TopLeft(cx, cy),
            palette::NEON_DIM,
        );

        self.surface
            .outline_rect(self.layout.capture_button, 2, palette::NEON);
        let (bx, by) = self.layout.capture_label_position();
        self.surface.text(
            "CAPTURE & LOG",
            FontTier::Small,
            TextAnchor::TopLeft(bx, by),
            palette::NEON,
        );

        self.surface
            .outline_rect(self.layout.export_button, 1, palette::NEON_DIM);
        let (ex, ey) = self.layout.export_label_position();
        self.surface.text(
            "CSV",
            FontTier::Small,
            TextAnchor::TopLeft(ex, ey),
            palette::NEON_DIM,
        );

        if self.notice.as_ref().is_some_and(|notice| now >= notice.until) {
            self.notice = None;
        }
        if let Some(notice) = &self.notice {
            let (nx, ny) = self.layout.notice_position();
            self.surface.text(
                &notice.text,
                FontTier::Small,
                TextAnchor::Center(nx, ny),
                palette::CRITICAL,
            );
        }
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn scene_state(&self) -> SceneState {
        SceneState {
            splash_active: self.phase == ScenePhase::Splash,
            log_view_active: self.log_view_active,
            selected_index: self.selected_index,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn log(&self) -> &FieldLogStore {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut FieldLogStore {
        &mut self.log
    }

    pub fn pulses(&self) -> &PulseField {
        &self.pulses
    }

    /// Export attempts so far, successful or not
    pub fn export_count(&self) -> u64 {
        self.exports
    }

    /// Rows captured since the last successful export
    pub fn unexported_rows(&self) -> usize {
        self.log.len().saturating_sub(self.exported_rows)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}
