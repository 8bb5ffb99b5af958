mod controller;
mod fonts;
mod layout;
mod raster;
mod surface;

pub use controller::{FrameOutcome, Notice, SceneController, ScenePhase, SceneState};
pub use fonts::{FontSet, FontSource, FontTier};
pub use layout::{cardinal_positions, Button, Cardinal, Layout, Rect};
pub use raster::RasterSurface;
pub use surface::{palette, DrawCommand, RecordingSurface, Surface, TextAnchor};
