use crate::canvas::PixelStore;
use crate::color::Rgba;

pub mod dot;
pub mod line;

pub use dot::DotTool;
pub use line::LineTool;

/// A continuous position in image space, as produced by the screen to pixel
/// mapping of the caller. Pixel (x, y) covers `[x, x + 1) x [y, y + 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImagePosition {
    pub x: f64,
    pub y: f64,
}

impl ImagePosition {
    pub fn new(x: f64, y: f64) -> Self {
        ImagePosition { x, y }
    }

    pub fn is_inside(&self, width: u32, height: u32) -> bool {
        0.0 <= self.x && self.x < width as f64 && 0.0 <= self.y && self.y < height as f64
    }
}

/// A painting tool driven by pointer presses and releases.
///
/// Tools never keep a reference to the store; every call borrows it for its
/// own duration and performs at most one batch of pixel writes.
pub trait Tool {
    fn press(
        &mut self,
        store: &mut dyn PixelStore,
        position: ImagePosition,
        color: Rgba,
    ) -> crate::Result<()>;

    fn release(
        &mut self,
        store: &mut dyn PixelStore,
        position: ImagePosition,
        color: Rgba,
    ) -> crate::Result<()>;
}

/// The tools available to the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
    Dot,
    Line,
}

impl ToolKind {
    pub fn create(&self) -> Box<dyn Tool> {
        match self {
            Self::Dot => Box::new(DotTool),
            Self::Line => Box::new(LineTool::default()),
        }
    }
}
