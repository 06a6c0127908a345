/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use dip_core::layout::{PixelBuffer, PixelLayout};

use crate::BmpErrors;

/// Size of the `BITMAPFILEHEADER`
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the `BITMAPINFOHEADER`, the only DIB header we accept
pub const INFO_HEADER_SIZE: u32 = 40;
/// 256 entries, 4 bytes (BGR0) each
pub const PALETTE_SIZE: usize = 1024;
/// Where pixels start when nothing sits between the palette and the pixels
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE as usize + PALETTE_SIZE;

/// The 14 byte file header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitmapFileHeader {
    /// Always `BM` for headers we decoded
    pub magic:     [u8; 2],
    pub file_size: u32,
    pub reserved:  u32,
    /// Byte offset from the start of the file to the pixel data
    pub offset:    u32
}

/// The 40 byte `BITMAPINFOHEADER`
///
/// Fields are kept exactly as stored so that writing them back
/// reproduces the original bytes, e.g a zero `image_size` stays zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitmapInfoHeader {
    pub header_size:        u32,
    pub width:              i32,
    /// Positive for bottom-up bitmaps
    pub height:             i32,
    pub planes:             u16,
    pub bits_per_pixel:     u16,
    pub compression:        u32,
    /// Declared pixel data size, may be zero
    pub image_size:         u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used:        u32,
    pub important_colors:   u32
}

impl BitmapInfoHeader {
    /// Header describing an uncompressed 8-bit bitmap with `layout`'s geometry
    pub fn for_layout(layout: PixelLayout) -> Result<BitmapInfoHeader, BmpErrors> {
        let width = i32::try_from(layout.width()).map_err(|_| BmpErrors::OverFlowOccurred)?;
        let height = i32::try_from(layout.height()).map_err(|_| BmpErrors::OverFlowOccurred)?;
        let image_size =
            u32::try_from(layout.pixel_data_size()).map_err(|_| BmpErrors::OverFlowOccurred)?;

        Ok(BitmapInfoHeader {
            header_size: INFO_HEADER_SIZE,
            width,
            height,
            planes: 1,
            bits_per_pixel: 8,
            compression: 0,
            image_size,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 256,
            important_colors: 0
        })
    }

    /// Geometry of the pixel data this header describes
    ///
    /// # Errors
    /// [`BmpErrors::InvalidDimensions`] if width or height is not positive
    pub fn layout(&self) -> Result<PixelLayout, BmpErrors> {
        if self.width <= 0 || self.height <= 0 {
            return Err(BmpErrors::InvalidDimensions(self.width, self.height));
        }
        Ok(PixelLayout::new(self.width as usize, self.height as usize)?)
    }
}

impl Display for BitmapFileHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(
            f,
            "Format: {}{}",
            char::from(self.magic[0]),
            char::from(self.magic[1])
        )?;
        writeln!(f, "File size: {} bytes", self.file_size)?;
        write!(f, "Offset: {} bytes", self.offset)
    }
}

impl Display for BitmapInfoHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "DIB header size: {} bytes", self.header_size)?;
        writeln!(f, "Width: {} pixels", self.width)?;
        writeln!(f, "Height: {} pixels", self.height)?;
        writeln!(f, "Color planes: {}", self.planes)?;
        writeln!(f, "Color depth: {} bits/pixel", self.bits_per_pixel)?;
        writeln!(f, "Compression: {}", self.compression)?;
        writeln!(f, "Image size: {} bytes", self.image_size)?;
        writeln!(f, "Horizontal resolution: {} pixels/meter", self.x_pixels_per_meter)?;
        writeln!(f, "Vertical resolution: {} pixels/meter", self.y_pixels_per_meter)?;
        writeln!(f, "Number of colors: {}", self.colors_used)?;
        write!(f, "Number of important colors: {}", self.important_colors)
    }
}

/// The 256 entry color table
///
/// Opaque to processing, it is carried from the decoded file to every
/// file written from it.
#[derive(Clone, Eq, PartialEq)]
pub struct Palette([u8; PALETTE_SIZE]);

impl Palette {
    pub const fn from_bytes(bytes: [u8; PALETTE_SIZE]) -> Palette {
        Palette(bytes)
    }

    /// Entry `i` maps to gray level `i`
    pub fn grayscale() -> Palette {
        let mut bytes = [0; PALETTE_SIZE];

        for (i, entry) in bytes.chunks_exact_mut(4).enumerate() {
            let level = i as u8;
            entry.copy_from_slice(&[level, level, level, 0]);
        }
        Palette(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; PALETTE_SIZE] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::grayscale()
    }
}

impl Debug for Palette {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let is_gray = *self == Palette::grayscale();
        f.debug_struct("Palette")
            .field("entries", &256)
            .field("grayscale", &is_gray)
            .finish()
    }
}

/// A decoded 8-bit bitmap
///
/// Holds everything needed to write the file back unchanged: headers as
/// stored, the palette, any bytes between the palette and the pixel data
/// (the gap), the padded pixel rows and any bytes after them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bitmap {
    file_header: BitmapFileHeader,
    info_header: BitmapInfoHeader,
    palette:     Palette,
    gap:         Vec<u8>,
    pixels:      PixelBuffer,
    trailer:     Vec<u8>
}

impl Bitmap {
    /// Create a bitmap with fresh headers and a grayscale palette around `pixels`
    ///
    /// ```
    /// use dip_bmp::Bitmap;
    /// use dip_core::layout::{PixelBuffer, PixelLayout};
    ///
    /// let layout = PixelLayout::new(3, 2).unwrap();
    /// let bitmap = Bitmap::new_grayscale(PixelBuffer::new(layout)).unwrap();
    /// assert_eq!(bitmap.file_header().offset, 1078);
    /// assert_eq!(bitmap.encoded_size(), 1078 + 8);
    /// ```
    pub fn new_grayscale(pixels: PixelBuffer) -> Result<Bitmap, BmpErrors> {
        let info_header = BitmapInfoHeader::for_layout(pixels.layout())?;
        let file_size = PIXEL_DATA_OFFSET
            .checked_add(pixels.layout().pixel_data_size())
            .and_then(|size| u32::try_from(size).ok())
            .ok_or(BmpErrors::OverFlowOccurred)?;

        let file_header = BitmapFileHeader {
            magic: *b"BM",
            file_size,
            reserved: 0,
            offset: PIXEL_DATA_OFFSET as u32
        };

        Ok(Bitmap {
            file_header,
            info_header,
            palette: Palette::grayscale(),
            gap: vec![],
            pixels,
            trailer: vec![]
        })
    }

    pub(crate) fn from_parts(
        file_header: BitmapFileHeader, info_header: BitmapInfoHeader, palette: Palette,
        gap: Vec<u8>, pixels: PixelBuffer, trailer: Vec<u8>
    ) -> Bitmap {
        Bitmap {
            file_header,
            info_header,
            palette,
            gap,
            pixels,
            trailer
        }
    }

    /// A copy of this bitmap with its pixels replaced
    ///
    /// Headers, palette, gap and trailer are kept, so the new pixels
    /// must have exactly the same geometry.
    ///
    /// # Errors
    /// [`BmpErrors::MismatchedDimensions`] if `pixels` has other dimensions
    pub fn with_pixels(&self, pixels: PixelBuffer) -> Result<Bitmap, BmpErrors> {
        let (expected, found) = (self.layout(), pixels.layout());

        if expected != found {
            return Err(BmpErrors::MismatchedDimensions(
                (expected.width(), expected.height()),
                (found.width(), found.height())
            ));
        }
        Ok(Bitmap {
            file_header: self.file_header,
            info_header: self.info_header,
            palette: self.palette.clone(),
            gap: self.gap.clone(),
            pixels,
            trailer: self.trailer.clone()
        })
    }

    pub const fn file_header(&self) -> &BitmapFileHeader {
        &self.file_header
    }

    pub const fn info_header(&self) -> &BitmapInfoHeader {
        &self.info_header
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Bytes stored between the palette and the pixel data
    pub fn gap(&self) -> &[u8] {
        &self.gap
    }

    /// Bytes stored after the pixel data
    pub fn trailer(&self) -> &[u8] {
        &self.trailer
    }

    pub const fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub const fn layout(&self) -> PixelLayout {
        self.pixels.layout()
    }

    pub const fn width(&self) -> usize {
        self.pixels.layout().width()
    }

    pub const fn height(&self) -> usize {
        self.pixels.layout().height()
    }

    /// Number of bytes [`BmpEncoder`](crate::BmpEncoder) writes for this bitmap
    pub fn encoded_size(&self) -> usize {
        PIXEL_DATA_OFFSET
            + self.gap.len()
            + self.pixels.layout().pixel_data_size()
            + self.trailer.len()
    }
}

#[cfg(test)]
mod tests {
    use dip_core::layout::{PixelBuffer, PixelLayout};

    use crate::common::{BitmapInfoHeader, Palette};
    use crate::{Bitmap, BmpErrors};

    #[test]
    fn grayscale_palette_entries() {
        let palette = Palette::grayscale();
        let bytes = palette.as_bytes();
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[800..804], &[200, 200, 200, 0]);
        assert_eq!(&bytes[1020..1024], &[255, 255, 255, 0]);
    }

    #[test]
    fn info_header_layout_rejects_top_down() {
        let mut header = BitmapInfoHeader::for_layout(PixelLayout::new(4, 4).unwrap()).unwrap();
        header.height = -4;

        assert!(matches!(
            header.layout(),
            Err(BmpErrors::InvalidDimensions(4, -4))
        ));
    }

    #[test]
    fn with_pixels_checks_dimensions() {
        let bitmap = Bitmap::new_grayscale(PixelBuffer::new(PixelLayout::new(4, 4).unwrap())).unwrap();

        // same byte count, different geometry
        let other = PixelBuffer::new(PixelLayout::new(2, 4).unwrap());
        assert!(matches!(
            bitmap.with_pixels(other),
            Err(BmpErrors::MismatchedDimensions((4, 4), (2, 4)))
        ));

        let replaced = bitmap
            .with_pixels(PixelBuffer::from_fn(bitmap.layout(), |x, _| x as u8))
            .unwrap();
        assert_eq!(replaced.file_header(), bitmap.file_header());
        assert_eq!(replaced.pixels().get(3, 0), Some(3));
    }

    #[test]
    fn summary_has_one_field_per_line() {
        let bitmap = Bitmap::new_grayscale(PixelBuffer::new(PixelLayout::new(5, 3).unwrap())).unwrap();
        let summary = format!("{}\n{}", bitmap.file_header(), bitmap.info_header());

        assert_eq!(summary.lines().count(), 14);
        assert!(summary.contains("Format: BM"));
        assert!(summary.contains("Width: 5 pixels"));
        assert!(summary.contains("Image size: 24 bytes"));
    }
}
