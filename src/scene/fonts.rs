use crate::error::FontError;
use rusttype::{Font, Scale};
use std::fs;
use tracing::{info, warn};

/// The three text sizes the scene uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
    Huge,
    Mid,
    Small,
}

/// Where the loaded font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Preferred(String),
    Fallback(String),
    /// Nothing loaded; text is skipped but everything else still renders
    Missing,
}

pub struct FontSet {
    font: Option<Font<'static>>,
    source: FontSource,
    huge: f32,
    mid: f32,
    small: f32,
}

/// Sizes used with fallback fonts, independent of screen width
const FALLBACK_SIZES: (f32, f32, f32) = (50.0, 30.0, 20.0);

fn load_font(path: &str) -> Result<Font<'static>, FontError> {
    let data = fs::read(path).map_err(|source| FontError::Read {
        path: path.to_string(),
        source,
    })?;
    Font::try_from_vec(data).ok_or_else(|| FontError::Parse {
        path: path.to_string(),
    })
}

impl FontSet {
    /// Load the preferred font sized to the screen width, then each fallback at
    /// fixed sizes. Never fails; see `FontSource::Missing`.
    pub fn load(preferred: &str, fallbacks: &[String], screen_width: u32) -> Self {
        match load_font(preferred) {
            Ok(font) => {
                info!("Loaded font {}", preferred);
                let w = screen_width as f32;
                return Self {
                    font: Some(font),
                    source: FontSource::Preferred(preferred.to_string()),
                    huge: (w / 10.0).floor(),
                    mid: (w / 20.0).floor(),
                    small: (w / 30.0).floor(),
                };
            }
            Err(e) => warn!("{}; trying fallback fonts", e),
        }

        for path in fallbacks {
            match load_font(path) {
                Ok(font) => {
                    info!("Using fallback font {}", path);
                    return Self::fixed(Some(font), FontSource::Fallback(path.clone()));
                }
                Err(e) => warn!("{}", e),
            }
        }

        warn!("{}; text will not be drawn", FontError::NoneAvailable);
        Self::empty()
    }

    /// A set without any font
    pub fn empty() -> Self {
        Self::fixed(None, FontSource::Missing)
    }

    fn fixed(font: Option<Font<'static>>, source: FontSource) -> Self {
        let (huge, mid, small) = FALLBACK_SIZES;
        Self {
            font,
            source,
            huge,
            mid,
            small,
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn font(&self) -> Option<&Font<'static>> {
        self.font.as_ref()
    }

    pub fn pixel_size(&self, tier: FontTier) -> f32 {
        match tier {
            FontTier::Huge => self.huge,
            FontTier::Mid => self.mid,
            FontTier::Small => self.small,
        }
    }

    pub fn scale(&self, tier: FontTier) -> Scale {
        Scale::uniform(self.pixel_size(tier))
    }
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("source", &self.source)
            .field("huge", &self.huge)
            .field("mid", &self.mid)
            .field("small", &self.small)
            .finish()
    }
}
