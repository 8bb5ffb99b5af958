use super::converter::{DisplayConverter, PixelLayout};
use super::FramePresenter;
use crate::config::DisplayConfig;
use crate::error::DisplayError;
use image::RgbaImage;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use tracing::{debug, info, warn};

/// Visible framebuffer geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub line_length: usize,
    pub red_offset: u32,
    /// Panning offset of the visible area inside the virtual screen
    pub x_offset: u32,
    pub y_offset: u32,
}

impl ScreenGeometry {
    /// Geometry assumed when the device cannot be queried
    pub fn assumed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel: 16,
            line_length: width as usize * 2,
            red_offset: 11,
            x_offset: 0,
            y_offset: 0,
        }
    }

    /// Byte position of the first visible pixel in framebuffer memory
    pub fn start_offset(&self) -> u64 {
        self.y_offset as u64 * self.line_length as u64
            + self.x_offset as u64 * (self.bits_per_pixel as u64 / 8)
    }
}

#[cfg(target_os = "linux")]
mod ioctl {
    use super::ScreenGeometry;
    use crate::error::DisplayError;
    use std::fs::File;
    use std::os::unix::io::AsRawFd;

    const FBIOGET_VSCREENINFO: u64 = 0x4600;
    const FBIOGET_FSCREENINFO: u64 = 0x4602;

    #[repr(C)]
    #[derive(Default)]
    struct FbBitfield {
        offset: u32,
        length: u32,
        msb_right: u32,
    }

    /// Mirror of `struct fb_var_screeninfo` from linux/fb.h
    #[repr(C)]
    #[derive(Default)]
    struct FbVarScreeninfo {
        xres: u32,
        yres: u32,
        xres_virtual: u32,
        yres_virtual: u32,
        xoffset: u32,
        yoffset: u32,
        bits_per_pixel: u32,
        grayscale: u32,
        red: FbBitfield,
        green: FbBitfield,
        blue: FbBitfield,
        transp: FbBitfield,
        nonstd: u32,
        activate: u32,
        height: u32,
        width: u32,
        accel_flags: u32,
        pixclock: u32,
        left_margin: u32,
        right_margin: u32,
        upper_margin: u32,
        lower_margin: u32,
        hsync_len: u32,
        vsync_len: u32,
        sync: u32,
        vmode: u32,
        rotate: u32,
        colorspace: u32,
        reserved: [u32; 4],
    }

    /// Mirror of `struct fb_fix_screeninfo` from linux/fb.h
    #[repr(C)]
    #[derive(Default)]
    struct FbFixScreeninfo {
        id: [u8; 16],
        smem_start: libc::c_ulong,
        smem_len: u32,
        type_: u32,
        type_aux: u32,
        visual: u32,
        xpanstep: u16,
        ypanstep: u16,
        ywrapstep: u16,
        line_length: u32,
        mmio_start: libc::c_ulong,
        mmio_len: u32,
        accel: u32,
        capabilities: u16,
        reserved: [u16; 2],
    }

    fn query<T>(file: &File, request: u64, name: &str, info: &mut T) -> Result<(), DisplayError> {
        // The kernel fills `info`, which mirrors the struct the request expects.
        let rc = unsafe { libc::ioctl(file.as_raw_fd(), request as _, info as *mut T) };
        if rc != 0 {
            return Err(DisplayError::Framebuffer {
                details: format!("{} failed: {}", name, std::io::Error::last_os_error()),
            });
        }
        Ok(())
    }

    pub(super) fn query_geometry(file: &File) -> Result<ScreenGeometry, DisplayError> {
        let mut var = FbVarScreeninfo::default();
        query(file, FBIOGET_VSCREENINFO, "FBIOGET_VSCREENINFO", &mut var)?;
        let mut fix = FbFixScreeninfo::default();
        query(file, FBIOGET_FSCREENINFO, "FBIOGET_FSCREENINFO", &mut fix)?;

        let line_length = match fix.line_length {
            0 => var.xres_virtual as usize * (var.bits_per_pixel as usize / 8),
            stride => stride as usize,
        };

        Ok(ScreenGeometry {
            width: var.xres,
            height: var.yres,
            bits_per_pixel: var.bits_per_pixel,
            line_length,
            red_offset: var.red.offset,
            x_offset: var.xoffset,
            y_offset: var.yoffset,
        })
    }
}

#[cfg(not(target_os = "linux"))]
mod ioctl {
    use super::ScreenGeometry;
    use crate::error::DisplayError;
    use std::fs::File;

    pub(super) fn query_geometry(_file: &File) -> Result<ScreenGeometry, DisplayError> {
        Err(DisplayError::Framebuffer {
            details: "Framebuffer geometry is only available on Linux".to_string(),
        })
    }
}

/// Writes frames straight into a Linux framebuffer device
pub struct FramebufferPresenter {
    device: String,
    file: File,
    geometry: ScreenGeometry,
    layout: PixelLayout,
}

impl FramebufferPresenter {
    /// Open the configured framebuffer. When the device cannot report its
    /// geometry, the configured resolution at 16 bits per pixel is assumed.
    pub fn open(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.framebuffer_device)
            .map_err(|source| DisplayError::FramebufferOpen {
                device: config.framebuffer_device.clone(),
                source,
            })?;

        let geometry = match ioctl::query_geometry(&file) {
            Ok(geometry) => geometry,
            Err(e) => {
                warn!(
                    "{}; assuming {}x{} RGB565",
                    e, config.resolution.0, config.resolution.1
                );
                ScreenGeometry::assumed(config.resolution.0, config.resolution.1)
            }
        };
        Self::with_geometry(&config.framebuffer_device, file, geometry)
    }

    /// Present into an already opened device with a known geometry
    pub fn with_geometry(
        device: &str,
        file: File,
        geometry: ScreenGeometry,
    ) -> Result<Self, DisplayError> {
        let layout = PixelLayout::from_depth(geometry.bits_per_pixel, geometry.red_offset)?;

        info!(
            "Framebuffer {} opened: {}x{} @ {} bpp, stride {} ({:?})",
            device,
            geometry.width,
            geometry.height,
            geometry.bits_per_pixel,
            geometry.line_length,
            layout
        );

        Ok(Self {
            device: device.to_string(),
            file,
            geometry,
            layout,
        })
    }

    pub fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }
}

impl FramePresenter for FramebufferPresenter {
    fn present(&mut self, frame: &RgbaImage) -> Result<(), DisplayError> {
        let data = DisplayConverter::encode_frame(
            frame,
            self.layout,
            self.geometry.width,
            self.geometry.height,
            self.geometry.line_length,
        )?;

        let write_error = |e: std::io::Error| DisplayError::Framebuffer {
            details: format!("Failed to write {}: {}", self.device, e),
        };
        self.file
            .seek(SeekFrom::Start(self.geometry.start_offset()))
            .map_err(write_error)?;
        self.file.write_all(&data).map_err(write_error)?;

        debug!("Presented {} bytes to {}", data.len(), self.device);
        Ok(())
    }
}
