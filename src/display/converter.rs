use crate::error::DisplayError;
use image::RgbaImage;

/// Byte layout of one framebuffer pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 16-bit little-endian 5-6-5
    Rgb565,
    /// 24-bit, blue first
    Bgr24,
    /// 32-bit, blue first, alpha/pad last
    Bgra32,
    /// 32-bit, red first, alpha/pad last
    Rgba32,
}

impl PixelLayout {
    /// Pick the layout from the framebuffer depth and red channel offset
    pub fn from_depth(bits_per_pixel: u32, red_offset: u32) -> Result<Self, DisplayError> {
        match bits_per_pixel {
            16 => Ok(PixelLayout::Rgb565),
            24 => Ok(PixelLayout::Bgr24),
            32 if red_offset == 0 => Ok(PixelLayout::Rgba32),
            32 => Ok(PixelLayout::Bgra32),
            bits => Err(DisplayError::UnsupportedDepth { bits }),
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelLayout::Rgb565 => 2,
            PixelLayout::Bgr24 => 3,
            PixelLayout::Bgra32 | PixelLayout::Rgba32 => 4,
        }
    }

    fn encode(&self, pixel: [u8; 4], out: &mut Vec<u8>) {
        let [r, g, b, _] = pixel;
        match self {
            PixelLayout::Rgb565 => {
                let rgb565 = (((r >> 3) as u16) << 11) | (((g >> 2) as u16) << 5) | (b >> 3) as u16;
                out.push((rgb565 & 0xFF) as u8);
                out.push((rgb565 >> 8) as u8);
            }
            PixelLayout::Bgr24 => out.extend_from_slice(&[b, g, r]),
            PixelLayout::Bgra32 => out.extend_from_slice(&[b, g, r, 255]),
            PixelLayout::Rgba32 => out.extend_from_slice(&[r, g, b, 255]),
        }
    }
}

/// Frame format conversion for the framebuffer
pub struct DisplayConverter;

impl DisplayConverter {
    /// Encode a frame into framebuffer memory layout.
    ///
    /// Rows are padded to `line_length` bytes; the frame is clipped to
    /// `width` x `height` and missing area is left black.
    pub fn encode_frame(
        frame: &RgbaImage,
        layout: PixelLayout,
        width: u32,
        height: u32,
        line_length: usize,
    ) -> Result<Vec<u8>, DisplayError> {
        let row_bytes = width as usize * layout.bytes_per_pixel();
        if line_length < row_bytes {
            return Err(DisplayError::FormatConversion {
                details: format!(
                    "Line length {} too short for {} pixels of {} bytes",
                    line_length,
                    width,
                    layout.bytes_per_pixel()
                ),
            });
        }

        let mut out = Vec::with_capacity(line_length * height as usize);
        for y in 0..height {
            let row_start = out.len();
            for x in 0..width {
                let pixel = if x < frame.width() && y < frame.height() {
                    frame.get_pixel(x, y).0
                } else {
                    [0, 0, 0, 255]
                };
                layout.encode(pixel, &mut out);
            }
            out.resize(row_start + line_length, 0);
        }

        Ok(out)
    }
}
