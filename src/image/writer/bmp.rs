use std::io::Write;

use super::super::bmp::{
    image_data_size, row_stride, BITS_PER_PIXEL, BITS_PER_PIXEL_FIELD, BI_RGB, BYTES_PER_PIXEL,
    COLOR_PLANES, COLOR_PLANES_FIELD, COMBINED_HEADER_SIZE, COMPRESSION_FIELD, DIB_HEADER_SIZE,
    DIB_HEADER_SIZE_FIELD, FILE_SIZE_FIELD, HEIGHT_FIELD, PIXEL_DATA_OFFSET_FIELD, SIGNATURE,
    SIGNATURE_FIELD, WIDTH_FIELD,
};
use super::super::{Image, ImageWriter};
use crate::binary_stream::write_little_endian;
use crate::error::{Error, PreconditionViolation};
use crate::logger::log_header;

pub struct BmpImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Image,
}

impl<'a, T: Write> BmpImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Image) -> Self {
        Self { writer, image }
    }
}

impl<T: Write> ImageWriter for BmpImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let bytes = encode(self.image)?;
        self.writer
            .write_all(&bytes)
            .map_err(Error::FailedToWriteImageData)?;
        self.writer.flush().map_err(Error::FailedToWriteImageData)
    }
}

/// Encodes an image as an uncompressed 24-bit BMP file.
///
/// Fails fast when a channel does not hold exactly `width * height` samples
/// or when the dimensions do not fit the 32-bit header fields.
pub fn encode(image: &Image) -> crate::Result<Vec<u8>> {
    image.check_channel_lengths()?;
    let file_size = check_file_size(image)?;
    let mut bytes = vec![0_u8; file_size];
    write_file_header(&mut bytes);
    write_dib_header(&mut bytes, image);
    log_header("Encoding", &bytes[..COMBINED_HEADER_SIZE]);
    write_pixel_data(&mut bytes, image);
    Ok(bytes)
}

fn check_file_size(image: &Image) -> crate::Result<usize> {
    let too_large = PreconditionViolation::ImageTooLarge {
        width: image.width(),
        height: image.height(),
    };
    if image.width() > i32::MAX as u32 || image.height() > i32::MAX as u32 {
        return Err(too_large.into());
    }
    let file_size = COMBINED_HEADER_SIZE as u64 + image_data_size(image.width(), image.height());
    if file_size > u32::MAX as u64 {
        return Err(too_large.into());
    }
    Ok(file_size as usize)
}

fn write_file_header(bytes: &mut [u8]) {
    let file_size = bytes.len() as u32;
    bytes[SIGNATURE_FIELD.offset..SIGNATURE_FIELD.end()].copy_from_slice(&SIGNATURE);
    write_little_endian(bytes, FILE_SIZE_FIELD, file_size);
    // no palette or extra masks, pixels follow the headers directly
    write_little_endian(bytes, PIXEL_DATA_OFFSET_FIELD, COMBINED_HEADER_SIZE as u32);
}

fn write_dib_header(bytes: &mut [u8], image: &Image) {
    write_little_endian(bytes, DIB_HEADER_SIZE_FIELD, DIB_HEADER_SIZE);
    write_little_endian(bytes, WIDTH_FIELD, image.width());
    write_little_endian(bytes, HEIGHT_FIELD, image.height());
    write_little_endian(bytes, COLOR_PLANES_FIELD, COLOR_PLANES);
    write_little_endian(bytes, BITS_PER_PIXEL_FIELD, BITS_PER_PIXEL as u32);
    write_little_endian(bytes, COMPRESSION_FIELD, BI_RGB);
}

/// Image row y lands in file row height - 1 - y. Padding bytes stay zero.
fn write_pixel_data(bytes: &mut [u8], image: &Image) {
    let width = image.width() as usize;
    let height = image.height() as usize;
    if width == 0 {
        return;
    }
    let stride = row_stride(image.width()) as usize;
    let red = image.red_channel();
    let green = image.green_channel();
    let blue = image.blue_channel();
    for y in 0..height {
        let y_flipped = height - 1 - y;
        let row_start = COMBINED_HEADER_SIZE + stride * y_flipped;
        let row = &mut bytes[row_start..row_start + BYTES_PER_PIXEL * width];
        for (x, bgr) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let index = y * width + x;
            bgr[0] = blue[index];
            bgr[1] = green[index];
            bgr[2] = red[index];
        }
    }
}
