use crate::color::Rgba;
use crate::error::PreconditionViolation;

pub mod bmp;
pub mod reader;
pub mod writer;

/// A raster image stored as four separate byte planes.
///
/// All planes are row-major with y = 0 as the top row, a.k.a. y-positive = down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    red: Vec<u8>,
    green: Vec<u8>,
    blue: Vec<u8>,
    alpha: Vec<u8>,
}

/// Settings for [`Image::create`]; anything left out falls back to zero.
#[derive(Clone, Debug, Default)]
pub struct ImageOptions {
    pub width: u32,
    pub height: u32,
    pub red_channel: Option<Vec<u8>>,
    pub green_channel: Option<Vec<u8>>,
    pub blue_channel: Option<Vec<u8>>,
    pub alpha_channel: Option<Vec<u8>>,
}

impl ImageOptions {
    pub fn with_size(width: u32, height: u32) -> Self {
        ImageOptions {
            width,
            height,
            ..Default::default()
        }
    }
}

impl Image {
    /// Builds an image, filling every channel that was not given with zeros.
    ///
    /// Given channels are taken as they are; their length is only checked
    /// when the image gets encoded.
    pub fn create(options: ImageOptions) -> Self {
        let pixel_count = options.width as usize * options.height as usize;
        let blank = || vec![0_u8; pixel_count];
        Image {
            width: options.width,
            height: options.height,
            red: options.red_channel.unwrap_or_else(blank),
            green: options.green_channel.unwrap_or_else(blank),
            blue: options.blue_channel.unwrap_or_else(blank),
            alpha: options.alpha_channel.unwrap_or_else(blank),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn red_channel(&self) -> &[u8] {
        &self.red
    }

    pub fn green_channel(&self) -> &[u8] {
        &self.green
    }

    pub fn blue_channel(&self) -> &[u8] {
        &self.blue
    }

    pub fn alpha_channel(&self) -> &[u8] {
        &self.alpha
    }

    /// Color at column x, row y, or `None` outside of the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        Some(Rgba::new(
            *self.red.get(index)?,
            *self.green.get(index)?,
            *self.blue.get(index)?,
            *self.alpha.get(index)?,
        ))
    }

    /// Every channel must hold exactly `width * height` samples.
    pub fn check_channel_lengths(&self) -> crate::Result<()> {
        let expected = self.pixel_count();
        let channels = [
            ("red", &self.red),
            ("green", &self.green),
            ("blue", &self.blue),
            ("alpha", &self.alpha),
        ];
        for (channel, samples) in channels {
            if samples.len() != expected {
                return Err(PreconditionViolation::ChannelLengthMismatch {
                    channel,
                    expected,
                    actual: samples.len(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for Image {
    fn default() -> Self {
        Image::create(ImageOptions::default())
    }
}

/// Integer pixel address in image space: origin top-left, x right, y down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: i32,
    pub y: i32,
}

impl PixelCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        PixelCoord { x, y }
    }

    /// The pixel containing a continuous image-space position.
    pub fn containing(x: f64, y: f64) -> Self {
        PixelCoord {
            x: x.floor() as i32,
            y: y.floor() as i32,
        }
    }

    pub fn is_inside(&self, width: u32, height: u32) -> bool {
        0 <= self.x
            && (self.x as i64) < width as i64
            && 0 <= self.y
            && (self.y as i64) < height as i64
    }
}

impl From<(i32, i32)> for PixelCoord {
    fn from((x, y): (i32, i32)) -> Self {
        PixelCoord { x, y }
    }
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}
