use std::time::{Duration, Instant};
use tracing::debug;

/// Minimum spacing between two reported presses
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Device-independent view of one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchSignal {
    AxisX(i32),
    AxisY(i32),
    Contact(bool),
    /// End of one device report
    Sync,
}

/// Raw range one controller axis reports over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Ranges from configured maxima, with minima defaulting to zero
    pub fn from_config(
        min: Option<(i32, i32)>,
        max: Option<(i32, i32)>,
    ) -> Option<(AxisRange, AxisRange)> {
        let (max_x, max_y) = max?;
        let (min_x, min_y) = min.unwrap_or((0, 0));
        Some((AxisRange::new(min_x, max_x), AxisRange::new(min_y, max_y)))
    }

    fn span(&self) -> i64 {
        self.max as i64 - self.min as i64
    }
}

/// Maps raw controller coordinates onto screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchScaler {
    ranges: Option<(AxisRange, AxisRange)>,
    screen: (u32, u32),
}

impl TouchScaler {
    /// With no usable axis ranges, raw positions are taken as pixels
    pub fn new(ranges: Option<(AxisRange, AxisRange)>, screen: (u32, u32)) -> Self {
        let ranges = ranges.filter(|(x, y)| x.span() > 0 && y.span() > 0);
        Self { ranges, screen }
    }

    pub fn scale(&self, raw_x: i32, raw_y: i32) -> (i32, i32) {
        let (width, height) = (self.screen.0 as i64, self.screen.1 as i64);
        let (x, y) = match self.ranges {
            Some((range_x, range_y)) => (
                (raw_x as i64 - range_x.min as i64) * width / range_x.span(),
                (raw_y as i64 - range_y.min as i64) * height / range_y.span(),
            ),
            None => (raw_x as i64, raw_y as i64),
        };
        (
            x.clamp(0, (width - 1).max(0)) as i32,
            y.clamp(0, (height - 1).max(0)) as i32,
        )
    }
}

/// Turns a stream of axis/contact signals into debounced presses.
///
/// Controllers commonly send the contact key before the axis values of the
/// same report, so a press is only resolved at the following `Sync`.
#[derive(Debug)]
pub struct PressTracker {
    scaler: TouchScaler,
    debounce: Duration,
    x: Option<i32>,
    y: Option<i32>,
    touching: bool,
    pending: bool,
    last_press: Option<Instant>,
}

impl PressTracker {
    pub fn new(scaler: TouchScaler, debounce: Duration) -> Self {
        Self {
            scaler,
            debounce,
            x: None,
            y: None,
            touching: false,
            pending: false,
            last_press: None,
        }
    }

    /// Feed one signal; returns the screen position when a press completes
    pub fn feed(&mut self, signal: TouchSignal, now: Instant) -> Option<(i32, i32)> {
        match signal {
            TouchSignal::AxisX(x) => self.x = Some(x),
            TouchSignal::AxisY(y) => self.y = Some(y),
            TouchSignal::Contact(true) => {
                if !self.touching {
                    self.touching = true;
                    self.pending = true;
                }
            }
            TouchSignal::Contact(false) => {
                self.touching = false;
                self.pending = false;
            }
            TouchSignal::Sync => return self.resolve(now),
        }
        None
    }

    fn resolve(&mut self, now: Instant) -> Option<(i32, i32)> {
        if !self.pending {
            return None;
        }

        let (raw_x, raw_y) = match (self.x, self.y) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                debug!("Press without a known position; waiting for axis data");
                return None;
            }
        };
        self.pending = false;

        if let Some(last) = self.last_press {
            if now.saturating_duration_since(last) < self.debounce {
                debug!("Touch press debounced");
                return None;
            }
        }
        self.last_press = Some(now);

        Some(self.scaler.scale(raw_x, raw_y))
    }
}
