use super::fonts::{FontSet, FontTier};
use super::layout::Rect;
use super::surface::{Surface, TextAnchor};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_hollow_circle_mut, draw_hollow_rect_mut, draw_text_mut, text_size, Blend,
};
use imageproc::rect::Rect as PixelRect;

/// Software surface drawing into an RGBA frame buffer
pub struct RasterSurface {
    image: RgbaImage,
    fonts: FontSet,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, fonts: FontSet) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            fonts,
        }
    }

    /// The completed frame
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    fn text(&mut self, text: &str, tier: FontTier, anchor: TextAnchor, color: Rgba<u8>) {
        let font = match self.fonts.font() {
            Some(font) => font,
            None => return,
        };
        let scale = self.fonts.scale(tier);

        let (x, y) = match anchor {
            TextAnchor::TopLeft(x, y) => (x, y),
            TextAnchor::Center(cx, cy) => {
                let (width, height) = text_size(scale, font, text);
                (cx - width / 2, cy - height / 2)
            }
        };

        draw_text_mut(&mut self.image, color, x, y, scale, font, text);
    }

    fn ring(&mut self, center: (f32, f32), radius: f32, thickness: u32, color: Rgba<u8>) {
        if color[3] == 0 || radius < 1.0 {
            return;
        }

        let center = (center.0.round() as i32, center.1.round() as i32);
        let outer = radius.round() as i32;
        let mut canvas = Blend(std::mem::take(&mut self.image));
        for inset in 0..thickness as i32 {
            let r = outer - inset;
            if r <= 0 {
                break;
            }
            draw_hollow_circle_mut(&mut canvas, center, r, color);
        }
        self.image = canvas.0;
    }

    fn outline_rect(&mut self, rect: Rect, thickness: u32, color: Rgba<u8>) {
        for inset in 0..thickness {
            let width = rect.width.saturating_sub(2 * inset);
            let height = rect.height.saturating_sub(2 * inset);
            if width == 0 || height == 0 {
                break;
            }
            let outline = PixelRect::at(rect.x + inset as i32, rect.y + inset as i32)
                .of_size(width, height);
            draw_hollow_rect_mut(&mut self.image, outline, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::palette;

    fn surface() -> RasterSurface {
        let mut surface = RasterSurface::new(200, 100, FontSet::empty());
        surface.clear(palette::BACKGROUND);
        surface
    }

    #[test]
    fn test_clear_fills_frame() {
        let surface = surface();
        assert!(surface.image().pixels().all(|p| *p == palette::BACKGROUND));
    }

    #[test]
    fn test_ring_blends_with_background() {
        let mut surface = surface();
        surface.ring((100.0, 50.0), 20.0, 2, palette::with_alpha(palette::NEON, 128));

        let on_ring = surface.image().get_pixel(120, 50);
        assert!(on_ring[1] > palette::BACKGROUND[1]);
        assert!(on_ring[1] < palette::NEON[1]);
        assert_eq!(*surface.image().get_pixel(100, 50), palette::BACKGROUND);
    }

    #[test]
    fn test_transparent_ring_is_skipped() {
        let mut surface = surface();
        surface.ring((100.0, 50.0), 20.0, 2, palette::with_alpha(palette::NEON, 0));
        assert!(surface.image().pixels().all(|p| *p == palette::BACKGROUND));
    }

    #[test]
    fn test_outline_rect_draws_border_only() {
        let mut surface = surface();
        surface.outline_rect(Rect::new(10, 10, 50, 20), 1, palette::NEON);

        assert_eq!(*surface.image().get_pixel(10, 10), palette::NEON);
        assert_eq!(*surface.image().get_pixel(59, 29), palette::NEON);
        assert_eq!(*surface.image().get_pixel(30, 20), palette::BACKGROUND);
    }

    #[test]
    fn test_text_without_font_is_skipped() {
        let mut surface = surface();
        surface.text("GA RADAR", FontTier::Huge, TextAnchor::Center(100, 50), palette::NEON);
        assert!(surface.image().pixels().all(|p| *p == palette::BACKGROUND));
    }
}
