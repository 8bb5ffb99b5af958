//! Process-wide display state shared between the sensor callbacks, the
//! background place resolution tasks and the render loop.
//!
//! Each field has its own lock and a single writer kind; readers may observe
//! one field updated before another within a frame.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate text shown before the first location fix
pub const INITIAL_COORDINATE_TEXT: &str = "00.000 , 00.000";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Display form used on screen and in log rows. Southern and western
    /// values keep their sign and the N/E suffix.
    pub fn display(&self) -> String {
        format!("{:.4} N, {:.4} E", self.latitude, self.longitude)
    }
}

/// Place name shown under the radar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaceLabel {
    /// No resolution has completed yet
    #[default]
    Searching,
    /// The last lookup failed
    Offline,
    /// The last lookup succeeded without a usable place field
    Site,
    /// Upper-cased place name
    Named(String),
}

impl PlaceLabel {
    pub fn named(name: &str) -> Self {
        PlaceLabel::Named(name.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlaceLabel::Searching => "SEARCHING...",
            PlaceLabel::Offline => "OFFLINE SECTOR",
            PlaceLabel::Site => "SITE SECTOR",
            PlaceLabel::Named(name) => name,
        }
    }
}

impl fmt::Display for PlaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading in degrees, normalised into [0, 360)
pub fn normalize_bearing(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shared application state read by the render loop every frame
#[derive(Debug)]
pub struct SharedState {
    coordinate_text: RwLock<String>,
    coordinate: RwLock<Option<Coordinate>>,
    bearing_degrees: RwLock<f64>,
    place_label: RwLock<PlaceLabel>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            coordinate_text: RwLock::new(INITIAL_COORDINATE_TEXT.to_string()),
            coordinate: RwLock::new(None),
            bearing_degrees: RwLock::new(0.0),
            place_label: RwLock::new(PlaceLabel::default()),
        }
    }

    pub fn set_coordinate(&self, coordinate: Coordinate) {
        *self.coordinate_text.write() = coordinate.display();
        *self.coordinate.write() = Some(coordinate);
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        *self.coordinate.read()
    }

    /// Formatted coordinate string, or the placeholder before the first fix
    pub fn coordinate_text(&self) -> String {
        self.coordinate_text.read().clone()
    }

    pub fn set_bearing(&self, degrees: f64) {
        *self.bearing_degrees.write() = normalize_bearing(degrees);
    }

    pub fn bearing(&self) -> f64 {
        *self.bearing_degrees.read()
    }

    /// Last writer wins; a late lookup for an older fix may replace a newer one.
    pub fn set_place_label(&self, label: PlaceLabel) {
        *self.place_label.write() = label;
    }

    pub fn place_label(&self) -> PlaceLabel {
        self.place_label.read().clone()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SharedState::new();
        assert_eq!(state.coordinate_text(), "00.000 , 00.000");
        assert_eq!(state.coordinate(), None);
        assert_eq!(state.bearing(), 0.0);
        assert_eq!(state.place_label(), PlaceLabel::Searching);
        assert_eq!(state.place_label().as_str(), "SEARCHING...");
    }

    #[test]
    fn test_coordinate_display_keeps_sign() {
        assert_eq!(
            Coordinate::new(35.689_21, 51.389_01).display(),
            "35.6892 N, 51.3890 E"
        );
        assert_eq!(
            Coordinate::new(-33.868_82, -151.209_29).display(),
            "-33.8688 N, -151.2093 E"
        );
    }

    #[test]
    fn test_bearing_normalisation() {
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(359.5), 359.5);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(f64::NAN), 0.0);
    }

    #[test]
    fn test_last_writer_wins() {
        let state = SharedState::new();
        state.set_place_label(PlaceLabel::named("Downtown"));
        state.set_place_label(PlaceLabel::Offline);
        assert_eq!(state.place_label().as_str(), "OFFLINE SECTOR");
    }

    #[test]
    fn test_named_label_is_uppercased() {
        assert_eq!(PlaceLabel::named("Tajrish").as_str(), "TAJRISH");
        assert_eq!(PlaceLabel::Site.to_string(), "SITE SECTOR");
    }

    #[test]
    fn test_label_defaults_to_searching() {
        assert_eq!(PlaceLabel::default(), PlaceLabel::Searching);
    }
}
