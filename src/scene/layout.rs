/// Axis-aligned screen rectangle. Contains its top/left edges, not its bottom/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && (x as i64) < self.x as i64 + self.width as i64
            && (y as i64) < self.y as i64 + self.height as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Capture,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [
        Cardinal::North,
        Cardinal::East,
        Cardinal::South,
        Cardinal::West,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Cardinal::North => "N",
            Cardinal::East => "E",
            Cardinal::South => "S",
            Cardinal::West => "W",
        }
    }

    /// Dial angle at zero bearing, clockwise from up
    pub fn angle(&self) -> f32 {
        match self {
            Cardinal::North => 0.0,
            Cardinal::East => 90.0,
            Cardinal::South => 180.0,
            Cardinal::West => 270.0,
        }
    }
}

/// Where each cardinal label sits for the given bearing. The dial turns
/// against the heading so N keeps pointing north.
pub fn cardinal_positions(
    origin: (f32, f32),
    radius: f32,
    bearing_degrees: f32,
) -> [(Cardinal, f32, f32); 4] {
    Cardinal::ALL.map(|cardinal| {
        let theta = (cardinal.angle() - bearing_degrees).to_radians();
        (
            cardinal,
            origin.0 + radius * theta.sin(),
            origin.1 - radius * theta.cos(),
        )
    })
}

/// Fixed screen geometry derived from the display size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub radar_origin: (f32, f32),
    pub capture_button: Rect,
    pub export_button: Rect,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;

        Self {
            width,
            height,
            radar_origin: ((w / 2) as f32, (h / 3 + 50) as f32),
            capture_button: Rect::new(w / 2 - 100, h - 220, 200, 60),
            export_button: Rect::new(w - 120, h - 60, 100, 40),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn hit_test(&self, x: i32, y: i32) -> Option<Button> {
        if self.capture_button.contains(x, y) {
            Some(Button::Capture)
        } else if self.export_button.contains(x, y) {
            Some(Button::Export)
        } else {
            None
        }
    }

    /// Center of a button, for synthesised presses
    pub fn button_center(&self, button: Button) -> (i32, i32) {
        let rect = match button {
            Button::Capture => self.capture_button,
            Button::Export => self.export_button,
        };
        (
            rect.x + rect.width as i32 / 2,
            rect.y + rect.height as i32 / 2,
        )
    }

    pub fn screen_center(&self) -> (i32, i32) {
        (self.width as i32 / 2, self.height as i32 / 2)
    }

    pub fn place_label_position(&self) -> (i32, i32) {
        (40, self.height as i32 / 2 + 50)
    }

    pub fn coordinate_position(&self) -> (i32, i32) {
        (40, self.height as i32 / 2 + 90)
    }

    pub fn capture_label_position(&self) -> (i32, i32) {
        (self.width as i32 / 2 - 80, self.height as i32 - 200)
    }

    pub fn export_label_position(&self) -> (i32, i32) {
        (self.width as i32 - 85, self.height as i32 - 50)
    }

    pub fn notice_position(&self) -> (i32, i32) {
        (self.width as i32 / 2, self.height as i32 - 250)
    }
}
