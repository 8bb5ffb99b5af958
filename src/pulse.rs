use crate::config::RadarConfig;
use tracing::trace;

/// Radius a pulse is born with
pub const PULSE_INITIAL_RADIUS: f32 = 10.0;
/// Stroke alpha a pulse is born with
pub const PULSE_INITIAL_ALPHA: f32 = 200.0;

/// One expanding, fading ring
#[derive(Debug, Clone, PartialEq)]
pub struct Pulse {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    pub alpha: f32,
}

impl Pulse {
    pub fn new(x: f32, y: f32, max_radius: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            radius: PULSE_INITIAL_RADIUS,
            max_radius,
            speed,
            alpha: PULSE_INITIAL_ALPHA,
        }
    }

    /// Advance one frame. Alpha is clamped at zero.
    pub fn advance(&mut self) {
        self.radius += self.speed;
        self.alpha = (self.alpha - self.speed * 200.0 / self.max_radius).max(0.0);
    }

    pub fn is_spent(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Stroke alpha as a pixel channel value
    pub fn stroke_alpha(&self) -> u8 {
        self.alpha.round().clamp(0.0, 255.0) as u8
    }
}

/// Live set of radar pulses centered on a fixed origin
#[derive(Debug, Clone)]
pub struct PulseField {
    origin: (f32, f32),
    max_radius: f32,
    speed: f32,
    pulses: Vec<Pulse>,
}

impl PulseField {
    pub fn new(origin: (f32, f32), max_radius: f32, speed: f32) -> Self {
        Self {
            origin,
            max_radius,
            speed,
            pulses: Vec::new(),
        }
    }

    pub fn from_config(origin: (f32, f32), config: &RadarConfig) -> Self {
        Self::new(origin, config.pulse_max_radius, config.pulse_speed)
    }

    pub fn spawn(&mut self) {
        self.pulses.push(Pulse::new(
            self.origin.0,
            self.origin.1,
            self.max_radius,
            self.speed,
        ));
        trace!("Pulse spawned, {} live", self.pulses.len());
    }

    /// Advance every pulse and drop the ones that faded out this tick
    pub fn tick(&mut self) {
        for pulse in &mut self.pulses {
            pulse.advance();
        }
        self.pulses.retain(|pulse| !pulse.is_spent());
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}
