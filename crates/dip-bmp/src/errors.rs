/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use dip_core::bytestream::ByteIoError;
use dip_core::layout::LayoutError;

/// BMP errors that can occur during decoding and encoding
#[non_exhaustive]
pub enum BmpErrors {
    /// The file/bytes do not start with `BM`, contains the two bytes found
    InvalidMagicBytes([u8; 2]),
    /// The DIB header is not the 40 byte `BITMAPINFOHEADER`
    UnsupportedHeaderSize(u32),
    /// Compression is not `BI_RGB` (0)
    UnsupportedCompression(u32),
    /// Bits per pixel is not 8
    UnsupportedDepth(u16),
    /// Width or height is zero or negative, (width, height)
    ///
    /// Negative heights mark top-down bitmaps, which are not supported
    InvalidDimensions(i32, i32),
    /// Too large dimensions for a given width or
    /// height, (dimension, limit, found)
    TooLargeDimensions(&'static str, usize, usize),
    /// The pixel data offset points inside the headers or the palette
    ///
    /// Such files can be read by seeking to the offset, but the pixels then
    /// alias header or palette bytes and no [`Bitmap`](crate::Bitmap) can write
    /// them back byte for byte, so every offset below 1078 is refused.
    InvalidPixelOffset(u32),
    /// Declared image size is smaller than the pixel data, (expected, found)
    ///
    /// Only returned in strict mode
    InvalidImageSize(usize, usize),
    /// Palette color count is larger than 256
    ///
    /// Only returned in strict mode
    TooManyColors(u32),
    /// A buffer does not have the size its layout needs, (expected, found)
    TooSmallBuffer(usize, usize),
    /// Replacement pixels have other dimensions than the bitmap,
    /// (expected, found) as (width, height)
    MismatchedDimensions((usize, usize), (usize, usize)),
    /// A calculation overflowed
    OverFlowOccurred,
    /// Reading or writing bytes failed
    IoErrors(ByteIoError),
    /// An error that happened while loading or storing `path`
    FileError {
        path:   PathBuf,
        source: Box<BmpErrors>
    }
}

impl BmpErrors {
    /// Attach the path of the file being read or written
    pub fn with_path<P: Into<PathBuf>>(self, path: P) -> BmpErrors {
        BmpErrors::FileError {
            path:   path.into(),
            source: Box::new(self)
        }
    }

    /// Whether the error comes from the file contents rather than
    /// from reading or writing it
    pub fn is_format_error(&self) -> bool {
        match self {
            BmpErrors::IoErrors(_) => false,
            BmpErrors::FileError { source, .. } => source.is_format_error(),
            _ => true
        }
    }
}

impl Debug for BmpErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes(found) => {
                writeln!(
                    f,
                    "Invalid magic bytes, file does not start with BM but with {:?}",
                    found
                )
            }
            Self::UnsupportedHeaderSize(found) => {
                writeln!(
                    f,
                    "Unsupported DIB header size, expected 40 but found {found}"
                )
            }
            Self::UnsupportedCompression(found) => {
                writeln!(
                    f,
                    "Unsupported compression, expected 0 (uncompressed) but found {found}"
                )
            }
            Self::UnsupportedDepth(found) => {
                writeln!(
                    f,
                    "Unsupported color depth, expected 8 bits/pixel but found {found}"
                )
            }
            Self::InvalidDimensions(width, height) => {
                writeln!(
                    f,
                    "Invalid dimensions, width={width} height={height}, both must be positive"
                )
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::InvalidPixelOffset(offset) => {
                writeln!(
                    f,
                    "Invalid pixel data offset {offset}, pixels must start after the palette at 1078"
                )
            }
            Self::InvalidImageSize(expected, found) => {
                writeln!(
                    f,
                    "Declared image size {found} is smaller than the pixel data size {expected}"
                )
            }
            Self::TooManyColors(found) => {
                writeln!(f, "Palette declares {found} colors, an 8-bit palette holds 256")
            }
            Self::TooSmallBuffer(expected, found) => {
                writeln!(
                    f,
                    "Too small of buffer, expected {} but found {}",
                    expected, found
                )
            }
            Self::MismatchedDimensions(expected, found) => {
                writeln!(
                    f,
                    "Pixel dimensions {}x{} do not match bitmap dimensions {}x{}",
                    found.0, found.1, expected.0, expected.1
                )
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::FileError { path, source } => {
                write!(f, "{}: {:?}", path.display(), source)
            }
        }
    }
}

impl Display for BmpErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for BmpErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BmpErrors::IoErrors(err) => Some(err),
            BmpErrors::FileError { source, .. } => Some(source.as_ref()),
            _ => None
        }
    }
}

impl From<ByteIoError> for BmpErrors {
    fn from(value: ByteIoError) -> Self {
        BmpErrors::IoErrors(value)
    }
}

impl From<std::io::Error> for BmpErrors {
    fn from(value: std::io::Error) -> Self {
        BmpErrors::IoErrors(ByteIoError::from(value))
    }
}

impl From<LayoutError> for BmpErrors {
    fn from(value: LayoutError) -> Self {
        match value {
            LayoutError::ZeroDimension(width, height) => {
                BmpErrors::InvalidDimensions(width as i32, height as i32)
            }
            LayoutError::OverFlowOccurred => BmpErrors::OverFlowOccurred,
            LayoutError::SizeMismatch(expected, found) => BmpErrors::TooSmallBuffer(expected, found)
        }
    }
}
