use super::fonts::FontTier;
use super::layout::Rect;
use image::Rgba;

pub mod palette {
    use image::Rgba;

    pub const NEON: Rgba<u8> = Rgba([0, 255, 170, 255]);
    pub const NEON_DIM: Rgba<u8> = Rgba([0, 80, 60, 255]);
    pub const CRITICAL: Rgba<u8> = Rgba([255, 50, 50, 255]);
    pub const BACKGROUND: Rgba<u8> = Rgba([2, 8, 6, 255]);

    /// Same color with a different alpha channel
    pub fn with_alpha(color: Rgba<u8>, alpha: u8) -> Rgba<u8> {
        Rgba([color[0], color[1], color[2], alpha])
    }
}

/// How a text position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft(i32, i32),
    Center(i32, i32),
}

/// The drawing operations a frame is built from
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Rgba<u8>);

    fn text(&mut self, text: &str, tier: FontTier, anchor: TextAnchor, color: Rgba<u8>);

    /// Circle outline, blended with the frame by the color's alpha
    fn ring(&mut self, center: (f32, f32), radius: f32, thickness: u32, color: Rgba<u8>);

    fn outline_rect(&mut self, rect: Rect, thickness: u32, color: Rgba<u8>);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba<u8>),
    Text {
        text: String,
        tier: FontTier,
        anchor: TextAnchor,
        color: Rgba<u8>,
    },
    Ring {
        center: (f32, f32),
        radius: f32,
        thickness: u32,
        color: Rgba<u8>,
    },
    OutlineRect {
        rect: Rect,
        thickness: u32,
        color: Rgba<u8>,
    },
}

/// Surface that records the current frame's commands instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: (u32, u32),
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
        }
    }

    /// Commands issued since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rings(&self) -> Vec<(f32, u8)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Ring { radius, color, .. } => Some((*radius, color[3])),
                _ => None,
            })
            .collect()
    }

    pub fn text_anchor(&self, wanted: &str) -> Option<TextAnchor> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Text { text, anchor, .. } if text == wanted => Some(*anchor),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self, color: Rgba<u8>) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn text(&mut self, text: &str, tier: FontTier, anchor: TextAnchor, color: Rgba<u8>) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            tier,
            anchor,
            color,
        });
    }

    fn ring(&mut self, center: (f32, f32), radius: f32, thickness: u32, color: Rgba<u8>) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            thickness,
            color,
        });
    }

    fn outline_rect(&mut self, rect: Rect, thickness: u32, color: Rgba<u8>) {
        self.commands.push(DrawCommand::OutlineRect {
            rect,
            thickness,
            color,
        });
    }
}
