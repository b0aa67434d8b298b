//! Uncompressed 24-bit BMP files with a plain BITMAPINFOHEADER.
//!
//! Only this single layout is written and accepted:
//!
//! | field             | offset | size |
//! |-------------------|--------|------|
//! | signature "BM"    | 0x00   | 2    |
//! | file size         | 0x02   | 4    |
//! | pixel data offset | 0x0A   | 4    |
//! | DIB header size   | 0x0E   | 4    |
//! | width             | 0x12   | 4    |
//! | height            | 0x16   | 4    |
//! | color planes      | 0x1A   | 2    |
//! | bits per pixel    | 0x1C   | 2    |
//! | compression       | 0x1E   | 4    |
//!
//! Pixel rows follow at 0x36, bottom row first, as BGR triples padded to a
//! multiple of 4 bytes. Alpha is not stored.

use super::{Image, ImageOptions};
use crate::binary_stream::Field;

pub use super::reader::bmp::{decode, BmpImageReader};
pub use super::writer::bmp::{encode, BmpImageWriter};

pub(crate) const SIGNATURE: [u8; 2] = *b"BM";
pub(crate) const COMBINED_HEADER_SIZE: usize = 0x36;
pub(crate) const DIB_HEADER_SIZE: u32 = 0x28;
pub(crate) const COLOR_PLANES: u32 = 1;
pub(crate) const BITS_PER_PIXEL: u16 = 24;
pub(crate) const BYTES_PER_PIXEL: usize = 3;
pub(crate) const BI_RGB: u32 = 0;

pub(crate) const SIGNATURE_FIELD: Field = Field::new(0x00, 2);
pub(crate) const FILE_SIZE_FIELD: Field = Field::new(0x02, 4);
pub(crate) const PIXEL_DATA_OFFSET_FIELD: Field = Field::new(0x0A, 4);
pub(crate) const DIB_HEADER_SIZE_FIELD: Field = Field::new(0x0E, 4);
pub(crate) const WIDTH_FIELD: Field = Field::new(0x12, 4);
pub(crate) const HEIGHT_FIELD: Field = Field::new(0x16, 4);
pub(crate) const COLOR_PLANES_FIELD: Field = Field::new(0x1A, 2);
pub(crate) const BITS_PER_PIXEL_FIELD: Field = Field::new(0x1C, 2);
pub(crate) const COMPRESSION_FIELD: Field = Field::new(0x1E, 4);

/// Convenience constructor for images handed to [`encode`].
///
/// Same as [`Image::create`]: only `width` and `height` given yields a black,
/// fully transparent image.
pub fn create(options: ImageOptions) -> Image {
    Image::create(options)
}

/// Bytes occupied by one pixel row including its padding.
pub fn row_stride(width: u32) -> u64 {
    let unpadded = BYTES_PER_PIXEL as u64 * width as u64;
    4 * unpadded.div_ceil(4)
}

/// Bytes of pixel data stored for an image of the given size.
pub fn image_data_size(width: u32, height: u32) -> u64 {
    row_stride(width) * height as u64
}
