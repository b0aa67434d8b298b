use std::io::Read;

use super::super::bmp::{
    image_data_size, row_stride, BITS_PER_PIXEL, BITS_PER_PIXEL_FIELD, BI_RGB,
    BYTES_PER_PIXEL, COMBINED_HEADER_SIZE, COMPRESSION_FIELD, FILE_SIZE_FIELD, HEIGHT_FIELD,
    PIXEL_DATA_OFFSET_FIELD, SIGNATURE, SIGNATURE_FIELD, WIDTH_FIELD,
};
use super::super::{Image, ImageOptions, ImageReader};
use crate::binary_stream::{read_little_endian, read_little_endian_signed};
use crate::error::{Error, FormatError};
use crate::logger::log_header;

const OPAQUE: u8 = 0xFF;

pub struct BmpImageReader<T: Read> {
    reader: T,
}

impl<T: Read> BmpImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for BmpImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(Error::FailedToReadImageData)?;
        decode(&bytes)
    }
}

/// Decodes a BMP file into a freshly allocated [`Image`].
///
/// The whole header is verified before any pixel is read. Since the format
/// carries no alpha, every pixel of the result is fully opaque.
pub fn decode(bytes: &[u8]) -> crate::Result<Image> {
    let parser = BmpParser::new(bytes);
    let header = parser.verify()?;
    log_header("Decoding", &bytes[..COMBINED_HEADER_SIZE]);
    Ok(parser.parse_verified(&header))
}

/// Header values that passed verification.
struct VerifiedHeader {
    width: u32,
    height: u32,
    pixel_data_offset: usize,
}

struct BmpParser<'a> {
    bytes: &'a [u8],
}

impl<'a> BmpParser<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn verify(&self) -> Result<VerifiedHeader, FormatError> {
        self.check_not_empty()?;
        self.check_header_fits()?;
        self.check_signature()?;
        self.check_stated_file_size()?;
        let pixel_data_offset = self.check_pixel_data_offset()?;
        self.check_bits_per_pixel()?;
        self.check_compression()?;
        let (width, height) = self.check_dimensions()?;
        self.check_image_data_size(pixel_data_offset, width, height)?;
        Ok(VerifiedHeader {
            width,
            height,
            pixel_data_offset: pixel_data_offset as usize,
        })
    }

    fn check_not_empty(&self) -> Result<(), FormatError> {
        if self.bytes.is_empty() {
            return Err(FormatError::EmptyFile);
        }
        Ok(())
    }

    fn check_header_fits(&self) -> Result<(), FormatError> {
        if self.bytes.len() < COMBINED_HEADER_SIZE {
            return Err(FormatError::TooShort(self.bytes.len()));
        }
        Ok(())
    }

    fn check_signature(&self) -> Result<(), FormatError> {
        let signature = [
            self.bytes[SIGNATURE_FIELD.offset],
            self.bytes[SIGNATURE_FIELD.offset + 1],
        ];
        if signature != SIGNATURE {
            return Err(FormatError::BadSignature(signature));
        }
        Ok(())
    }

    fn check_stated_file_size(&self) -> Result<(), FormatError> {
        let stated = read_little_endian(self.bytes, FILE_SIZE_FIELD);
        if stated as usize != self.bytes.len() {
            return Err(FormatError::SizeMismatch {
                stated,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    fn check_pixel_data_offset(&self) -> Result<u32, FormatError> {
        let offset = read_little_endian(self.bytes, PIXEL_DATA_OFFSET_FIELD);
        if (offset as usize) < COMBINED_HEADER_SIZE {
            return Err(FormatError::UnsupportedOffset(offset));
        }
        Ok(offset)
    }

    fn check_bits_per_pixel(&self) -> Result<(), FormatError> {
        let bits_per_pixel = read_little_endian(self.bytes, BITS_PER_PIXEL_FIELD) as u16;
        if bits_per_pixel != BITS_PER_PIXEL {
            return Err(FormatError::UnsupportedBitDepth(bits_per_pixel));
        }
        Ok(())
    }

    fn check_compression(&self) -> Result<(), FormatError> {
        let compression = read_little_endian(self.bytes, COMPRESSION_FIELD);
        if compression != BI_RGB {
            return Err(FormatError::UnsupportedCompression(compression));
        }
        Ok(())
    }

    fn check_dimensions(&self) -> Result<(u32, u32), FormatError> {
        let width = read_little_endian_signed(self.bytes, WIDTH_FIELD);
        let height = read_little_endian_signed(self.bytes, HEIGHT_FIELD);
        if width < 0 || height < 0 {
            return Err(FormatError::NegativeDimension { width, height });
        }
        Ok((width as u32, height as u32))
    }

    fn check_image_data_size(
        &self,
        offset: u32,
        width: u32,
        height: u32,
    ) -> Result<(), FormatError> {
        let stated = self.bytes.len() as i64 - offset as i64;
        let expected = image_data_size(width, height);
        if stated != expected as i64 {
            return Err(FormatError::ImageDataSizeMismatch { stated, expected });
        }
        Ok(())
    }

    /// File row r holds image row height - 1 - r.
    fn parse_verified(&self, header: &VerifiedHeader) -> Image {
        let width = header.width as usize;
        let height = header.height as usize;
        let stride = row_stride(header.width) as usize;
        let pixel_count = width * height;
        let mut red = vec![0_u8; pixel_count];
        let mut green = vec![0_u8; pixel_count];
        let mut blue = vec![0_u8; pixel_count];
        // a zero width image may still state any height
        let file_rows = if width == 0 { 0 } else { height };
        for file_row in 0..file_rows {
            let y = height - 1 - file_row;
            let row_start = header.pixel_data_offset + stride * file_row;
            let row = &self.bytes[row_start..row_start + BYTES_PER_PIXEL * width];
            for (x, bgr) in row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
                let index = y * width + x;
                blue[index] = bgr[0];
                green[index] = bgr[1];
                red[index] = bgr[2];
            }
        }
        Image::create(ImageOptions {
            width: header.width,
            height: header.height,
            red_channel: Some(red),
            green_channel: Some(green),
            blue_channel: Some(blue),
            alpha_channel: Some(vec![OPAQUE; pixel_count]),
        })
    }
}
