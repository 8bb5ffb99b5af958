use super::FramePresenter;
use crate::error::DisplayError;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Frames between snapshot writes in headless mode (one per second at 30 fps)
pub const DEFAULT_SNAPSHOT_EVERY: u64 = 30;

/// Headless presenter that periodically writes the latest frame as a PNG
pub struct SnapshotPresenter {
    path: PathBuf,
    every: u64,
    frames: u64,
    written: u64,
}

impl SnapshotPresenter {
    pub fn new(path: impl Into<PathBuf>, every: u64) -> Self {
        let path = path.into();
        info!("Writing frame snapshots to {}", path.display());
        Self {
            path,
            every: every.max(1),
            frames: 0,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn snapshots_written(&self) -> u64 {
        self.written
    }

    fn write_png(&self, frame: &RgbaImage) -> Result<(), DisplayError> {
        // Write beside the target then rename, so readers never see a partial PNG.
        let staging = self.path.with_extension("png.tmp");
        frame
            .save_with_format(&staging, image::ImageFormat::Png)
            .map_err(|e| DisplayError::Snapshot {
                details: format!("Failed to encode {}: {}", staging.display(), e),
            })?;
        std::fs::rename(&staging, &self.path).map_err(|e| DisplayError::Snapshot {
            details: format!("Failed to move snapshot to {}: {}", self.path.display(), e),
        })
    }
}

impl FramePresenter for SnapshotPresenter {
    fn present(&mut self, frame: &RgbaImage) -> Result<(), DisplayError> {
        let due = self.frames % self.every == 0;
        self.frames += 1;
        if !due {
            return Ok(());
        }

        self.write_png(frame)?;
        self.written += 1;
        debug!("Snapshot {} written to {}", self.written, self.path.display());
        Ok(())
    }
}

/// Presenter that discards frames
#[derive(Debug, Default)]
pub struct NullPresenter {
    frames: u64,
}

impl NullPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FramePresenter for NullPresenter {
    fn present(&mut self, _frame: &RgbaImage) -> Result<(), DisplayError> {
        self.frames += 1;
        Ok(())
    }
}
