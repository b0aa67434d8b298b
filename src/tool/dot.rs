use super::{ImagePosition, Tool};
use crate::canvas::PixelStore;
use crate::color::Rgba;
use crate::image::PixelCoord;

/// Paints the single pixel under the pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct DotTool;

impl Tool for DotTool {
    fn press(
        &mut self,
        store: &mut dyn PixelStore,
        position: ImagePosition,
        color: Rgba,
    ) -> crate::Result<()> {
        let (width, height) = store.image_size();
        if !position.is_inside(width, height) {
            log::debug!("Dot at ({}, {}) misses the image", position.x, position.y);
            return Ok(());
        }
        store.set_pixel(PixelCoord::containing(position.x, position.y), color)
    }

    fn release(
        &mut self,
        _store: &mut dyn PixelStore,
        _position: ImagePosition,
        _color: Rgba,
    ) -> crate::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::DotTool;
    use crate::canvas::Canvas;
    use crate::color::Rgba;
    use crate::image::PixelCoord;
    use crate::tool::{ImagePosition, Tool};

    const GREEN: Rgba = Rgba::opaque(0x00, 0xFF, 0x00);

    #[test]
    fn paint_pixel_under_pointer() {
        let mut canvas = Canvas::new(3, 3);
        DotTool
            .press(&mut canvas, ImagePosition::new(2.99, 0.01), GREEN)
            .unwrap();
        assert_eq!(canvas.pixel(PixelCoord::new(2, 0)), Some(GREEN));
    }

    #[test]
    fn ignore_press_outside_of_image() {
        let mut canvas = Canvas::new(3, 3);
        let before = canvas.clone();
        DotTool
            .press(&mut canvas, ImagePosition::new(3.0, 1.0), GREEN)
            .unwrap();
        DotTool
            .press(&mut canvas, ImagePosition::new(1.0, -0.5), GREEN)
            .unwrap();
        assert_eq!(canvas, before);
    }

    #[test]
    fn release_paints_nothing() {
        let mut canvas = Canvas::new(1, 1);
        DotTool
            .release(&mut canvas, ImagePosition::new(0.5, 0.5), GREEN)
            .unwrap();
        assert_eq!(canvas.pixel(PixelCoord::new(0, 0)), Some(Rgba::WHITE));
    }
}
