use super::{ImagePosition, Tool};
use crate::canvas::PixelStore;
use crate::color::Rgba;
use crate::error::PreconditionViolation;
use crate::image::PixelCoord;
use crate::raster::line::rasterize;

/// Draws a straight line from the press position to the release position.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineTool {
    start: Option<PixelCoord>,
}

impl LineTool {
    pub fn start(&self) -> Option<PixelCoord> {
        self.start
    }

    /// Pixels that a release at `position` would paint, without painting them.
    ///
    /// Empty while no line is in progress.
    pub fn preview(
        &self,
        position: ImagePosition,
        size: (u32, u32),
    ) -> crate::Result<Vec<PixelCoord>> {
        let (width, height) = size;
        match self.start {
            Some(start) => {
                let end = PixelCoord::containing(position.x, position.y);
                Ok(clip(rasterize(start, end)?, width, height))
            }
            None => Ok(Vec::new()),
        }
    }
}

impl Tool for LineTool {
    fn press(
        &mut self,
        store: &mut dyn PixelStore,
        position: ImagePosition,
        _color: Rgba,
    ) -> crate::Result<()> {
        let (width, height) = store.image_size();
        if !position.is_inside(width, height) {
            log::debug!(
                "Line start ({}, {}) misses the image",
                position.x,
                position.y
            );
            self.start = None;
            return Ok(());
        }
        self.start = Some(PixelCoord::containing(position.x, position.y));
        Ok(())
    }

    fn release(
        &mut self,
        store: &mut dyn PixelStore,
        position: ImagePosition,
        color: Rgba,
    ) -> crate::Result<()> {
        let (width, height) = store.image_size();
        if !position.is_inside(width, height) {
            log::debug!("Line cancelled, released outside of the image");
            self.start = None;
            return Ok(());
        }
        let start = self.start.take().ok_or(PreconditionViolation::LineNotStarted)?;
        let end = PixelCoord::containing(position.x, position.y);
        let pixels = clip(rasterize(start, end)?, width, height);
        log::debug!(
            "Drawing line from ({}, {}) to ({}, {}) with {} pixels",
            start.x,
            start.y,
            end.x,
            end.y,
            pixels.len()
        );
        for pixel in pixels {
            store.set_pixel(pixel, color)?;
        }
        Ok(())
    }
}

fn clip(pixels: Vec<PixelCoord>, width: u32, height: u32) -> Vec<PixelCoord> {
    let total = pixels.len();
    let inside: Vec<PixelCoord> = pixels
        .into_iter()
        .filter(|pixel| pixel.is_inside(width, height))
        .collect();
    if inside.len() != total {
        log::debug!("Clipped {} pixels outside of the image", total - inside.len());
    }
    inside
}

#[cfg(test)]
mod test {
    use super::LineTool;
    use crate::canvas::{Canvas, PixelStore};
    use crate::color::Rgba;
    use crate::error::{Error, PreconditionViolation};
    use crate::image::PixelCoord;
    use crate::tool::{ImagePosition, Tool};

    const BLACK: Rgba = Rgba::BLACK;

    fn painted(canvas: &Canvas) -> Vec<(i32, i32)> {
        let (width, height) = canvas.image_size();
        let mut pixels = Vec::new();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if canvas.pixel(PixelCoord::new(x, y)) == Some(BLACK) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    fn draw(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) -> crate::Result<()> {
        let mut tool = LineTool::default();
        tool.press(canvas, ImagePosition::new(from.0, from.1), BLACK)?;
        tool.release(canvas, ImagePosition::new(to.0, to.1), BLACK)
    }

    #[test]
    fn draw_shallow_line() {
        let mut canvas = Canvas::new(6, 3);
        draw(&mut canvas, (0.2, 0.9), (4.5, 1.1)).unwrap();
        assert_eq!(painted(&canvas), vec![(0, 0), (1, 0), (2, 0), (3, 1), (4, 1)]);
    }

    #[test]
    fn press_records_start_only() {
        let mut canvas = Canvas::new(4, 4);
        let mut tool = LineTool::default();
        tool.press(&mut canvas, ImagePosition::new(1.5, 2.5), BLACK)
            .unwrap();
        assert_eq!(tool.start(), Some(PixelCoord::new(1, 2)));
        assert!(painted(&canvas).is_empty());
    }

    #[test]
    fn release_clears_start() {
        let mut canvas = Canvas::new(4, 4);
        let mut tool = LineTool::default();
        tool.press(&mut canvas, ImagePosition::new(0.0, 0.0), BLACK)
            .unwrap();
        tool.release(&mut canvas, ImagePosition::new(3.0, 0.0), BLACK)
            .unwrap();
        assert_eq!(tool.start(), None);
    }

    #[test]
    fn leftward_line_is_clipped_to_image() {
        // rasterizing (0, 0) -> (-4, 1) shifted by 4 starts at (5, -1)
        let mut canvas = Canvas::new(5, 2);
        draw(&mut canvas, (4.0, 0.0), (0.0, 1.0)).unwrap();
        assert_eq!(painted(&canvas), vec![(3, 0), (4, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn release_outside_cancels_line() {
        let mut canvas = Canvas::new(4, 4);
        draw(&mut canvas, (0.0, 0.0), (4.0, 4.0)).unwrap();
        assert!(painted(&canvas).is_empty());
    }

    #[test]
    fn release_without_press_fails() {
        let mut canvas = Canvas::new(4, 4);
        let mut tool = LineTool::default();
        let result = tool.release(&mut canvas, ImagePosition::new(1.0, 1.0), BLACK);
        assert!(matches!(
            result,
            Err(Error::Precondition(PreconditionViolation::LineNotStarted))
        ));
    }

    #[test]
    fn preview_does_not_paint() {
        let mut canvas = Canvas::new(8, 8);
        let mut tool = LineTool::default();
        assert!(tool
            .preview(ImagePosition::new(3.0, 3.0), canvas.image_size())
            .unwrap()
            .is_empty());
        tool.press(&mut canvas, ImagePosition::new(0.0, 0.0), BLACK)
            .unwrap();
        let preview = tool
            .preview(ImagePosition::new(3.5, 3.5), canvas.image_size())
            .unwrap();
        assert_eq!(
            preview,
            vec![
                PixelCoord::new(0, 0),
                PixelCoord::new(1, 1),
                PixelCoord::new(2, 2),
                PixelCoord::new(3, 3)
            ]
        );
        assert!(painted(&canvas).is_empty());
        assert_eq!(tool.start(), Some(PixelCoord::new(0, 0)));
    }

    #[test]
    fn preview_towards_far_position_fails() {
        let mut canvas = Canvas::new(4, 4);
        let mut tool = LineTool::default();
        tool.press(&mut canvas, ImagePosition::new(1.0, 1.0), BLACK)
            .unwrap();
        let result = tool.preview(ImagePosition::new(1.0e12, 1.0), canvas.image_size());
        assert!(matches!(
            result,
            Err(Error::Precondition(
                PreconditionViolation::CoordinateOutOfRange { .. }
            ))
        ));
        assert_eq!(tool.start(), Some(PixelCoord::new(1, 1)));
    }
}
