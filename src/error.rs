use std::fmt::Display;

/// Reasons a byte sequence is rejected by the BMP decoder.
///
/// Every variant is terminal: decoding never yields a partial image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    EmptyFile,
    TooShort(usize),
    BadSignature([u8; 2]),
    SizeMismatch { stated: u32, actual: usize },
    UnsupportedOffset(u32),
    UnsupportedBitDepth(u16),
    UnsupportedCompression(u32),
    NegativeDimension { width: i32, height: i32 },
    ImageDataSizeMismatch { stated: i64, expected: u64 },
}

/// Contract violations by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionViolation {
    ChannelLengthMismatch {
        channel: &'static str,
        expected: usize,
        actual: usize,
    },
    ImageTooLarge { width: u32, height: u32 },
    PixelOutOfBounds { x: i32, y: i32, width: u32, height: u32 },
    CoordinateOutOfRange { x: i32, y: i32 },
    LineNotStarted,
}

#[derive(Debug)]
pub enum Error {
    Format(FormatError),
    Precondition(PreconditionViolation),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadImageData(std::io::Error),
    FailedToWriteImageData(std::io::Error),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "Cannot read an empty BMP file"),
            Self::TooShort(length) => {
                write!(
                    f,
                    "Malformed BMP file: {} bytes cannot fit the combined header",
                    length
                )
            }
            Self::BadSignature(signature) => {
                write!(
                    f,
                    "Bad signature: expected 'BM', found {:02X} {:02X}",
                    signature[0], signature[1]
                )
            }
            Self::SizeMismatch { stated, actual } => {
                write!(
                    f,
                    "Stated size mismatch: header says {} bytes, file has {}",
                    stated, actual
                )
            }
            Self::UnsupportedOffset(offset) => {
                write!(
                    f,
                    "Pixel data offset {:#X} lies inside the combined header",
                    offset
                )
            }
            Self::UnsupportedBitDepth(bits_per_pixel) => {
                write!(
                    f,
                    "Unsupported bpp: {} (only 24 bits per pixel are supported)",
                    bits_per_pixel
                )
            }
            Self::UnsupportedCompression(method) => {
                write!(
                    f,
                    "Unsupported compression method {} (only BI_RGB is supported)",
                    method
                )
            }
            Self::NegativeDimension { width, height } => {
                write!(
                    f,
                    "Negative image dimensions {}x{} are not supported",
                    width, height
                )
            }
            Self::ImageDataSizeMismatch { stated, expected } => {
                write!(
                    f,
                    "Image data size inconsistent with declared dimensions: {} bytes present, {} expected",
                    stated, expected
                )
            }
        }
    }
}

impl Display for PreconditionViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChannelLengthMismatch {
                channel,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "The {} channel holds {} samples, but the image needs {}",
                    channel, actual, expected
                )
            }
            Self::ImageTooLarge { width, height } => {
                write!(
                    f,
                    "An image of {}x{} pixels does not fit into a BMP file",
                    width, height
                )
            }
            Self::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Pixel ({}, {}) lies outside of the {}x{} image",
                    x, y, width, height
                )
            }
            Self::CoordinateOutOfRange { x, y } => {
                write!(
                    f,
                    "Line endpoint ({}, {}) exceeds the supported coordinate range",
                    x, y
                )
            }
            Self::LineNotStarted => write!(f, "Line released before it was started"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(error) => write!(f, "Invalid BMP file: {}", error),
            Self::Precondition(violation) => write!(f, "{}", violation),
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadImageData(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
        }
    }
}

impl std::error::Error for FormatError {}

impl std::error::Error for PreconditionViolation {}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(error) => Some(error),
            Self::Precondition(violation) => Some(violation),
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadImageData(error)
            | Self::FailedToWriteImageData(error) => Some(error),
        }
    }
}

impl From<FormatError> for Error {
    fn from(value: FormatError) -> Self {
        Error::Format(value)
    }
}

impl From<PreconditionViolation> for Error {
    fn from(value: PreconditionViolation) -> Self {
        Error::Precondition(value)
    }
}
