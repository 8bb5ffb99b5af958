mod converter;
mod framebuffer;
mod snapshot;
#[cfg(test)]
mod tests;

pub use converter::{DisplayConverter, PixelLayout};
pub use framebuffer::{FramebufferPresenter, ScreenGeometry};
pub use snapshot::{NullPresenter, SnapshotPresenter, DEFAULT_SNAPSHOT_EVERY};

use crate::error::DisplayError;
use image::RgbaImage;

/// Puts a finished frame on screen
pub trait FramePresenter: Send {
    fn present(&mut self, frame: &RgbaImage) -> Result<(), DisplayError>;
}
