use crate::color::Rgba;
use crate::error::PreconditionViolation;
use crate::image::{Image, ImageOptions, PixelCoord};

/// The mutation surface tools paint through.
pub trait PixelStore {
    fn set_pixel(&mut self, coord: PixelCoord, color: Rgba) -> crate::Result<()>;

    /// (width, height) in pixels
    fn image_size(&self) -> (u32, u32);

    /// Keeps the overlapping top-left rectangle; new area gets the background.
    fn resize(&mut self, width: u32, height: u32);
}

/// An RGBA pixel grid, row-major with y = 0 as the top row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    background: Rgba,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas::with_background(width, height, Rgba::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: Rgba) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
            background,
        }
    }

    /// Imports a decoded image. Fails when a channel does not cover the image.
    pub fn from_image(image: &Image) -> crate::Result<Self> {
        image.check_channel_lengths()?;
        let pixels = image
            .red_channel()
            .iter()
            .zip(image.green_channel())
            .zip(image.blue_channel())
            .zip(image.alpha_channel())
            .map(|(((red, green), blue), alpha)| Rgba::new(*red, *green, *blue, *alpha))
            .collect();
        Ok(Canvas {
            width: image.width(),
            height: image.height(),
            pixels,
            background: Rgba::WHITE,
        })
    }

    pub fn to_image(&self) -> Image {
        let plane = |sample: fn(&Rgba) -> u8| -> Option<Vec<u8>> {
            Some(self.pixels.iter().map(sample).collect())
        };
        Image::create(ImageOptions {
            width: self.width,
            height: self.height,
            red_channel: plane(|pixel| pixel.red),
            green_channel: plane(|pixel| pixel.green),
            blue_channel: plane(|pixel| pixel.blue),
            alpha_channel: plane(|pixel| pixel.alpha),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn contains(&self, coord: PixelCoord) -> bool {
        coord.is_inside(self.width, self.height)
    }

    pub fn pixel(&self, coord: PixelCoord) -> Option<Rgba> {
        self.index_of(coord).map(|index| self.pixels[index])
    }

    fn index_of(&self, coord: PixelCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }
}

impl PixelStore for Canvas {
    fn set_pixel(&mut self, coord: PixelCoord, color: Rgba) -> crate::Result<()> {
        let index = self
            .index_of(coord)
            .ok_or(PreconditionViolation::PixelOutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })?;
        self.pixels[index] = color;
        Ok(())
    }

    fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!(
            "Resizing canvas from {}x{} to {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        let mut pixels = vec![self.background; width as usize * height as usize];
        let kept_width = self.width.min(width) as usize;
        let kept_height = self.height.min(height) as usize;
        for y in 0..kept_height {
            let old_row = y * self.width as usize;
            let new_row = y * width as usize;
            pixels[new_row..new_row + kept_width]
                .copy_from_slice(&self.pixels[old_row..old_row + kept_width]);
        }
        self.width = width;
        self.height = height;
        self.pixels = pixels;
    }
}
