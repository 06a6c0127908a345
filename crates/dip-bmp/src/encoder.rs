/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use dip_core::bytestream::{ByteWriter, ByteWriterTrait};

use crate::common::{Bitmap, BitmapFileHeader, BitmapInfoHeader};
use crate::BmpErrors;

/// An 8-bit BMP encoder
///
/// Writes the headers exactly as they are stored in the bitmap, nothing is
/// recomputed. A bitmap fresh from [`BmpDecoder`](crate::BmpDecoder) is thus
/// written back byte for byte.
///
/// # Example
/// ```
/// use dip_bmp::{Bitmap, BmpEncoder};
/// use dip_core::layout::{PixelBuffer, PixelLayout};
///
/// fn main() -> Result<(), dip_bmp::BmpErrors> {
///     let layout = PixelLayout::new(10, 10).unwrap();
///     let bitmap = Bitmap::new_grayscale(PixelBuffer::from_fn(layout, |x, y| (x * y) as u8))?;
///
///     let mut sink: Vec<u8> = vec![];
///     let written = BmpEncoder::new(&bitmap).encode(&mut sink)?;
///     assert_eq!(written, sink.len());
///     Ok(())
/// }
/// ```
pub struct BmpEncoder<'a> {
    bitmap: &'a Bitmap
}

impl<'a> BmpEncoder<'a> {
    pub const fn new(bitmap: &'a Bitmap) -> BmpEncoder<'a> {
        BmpEncoder { bitmap }
    }

    fn encode_file_header<T: ByteWriterTrait>(
        header: &BitmapFileHeader, writer: &mut ByteWriter<T>
    ) -> Result<(), BmpErrors> {
        writer.write_const_bytes(&header.magic)?;
        writer.write_u32_le_err(header.file_size)?;
        writer.write_u32_le_err(header.reserved)?;
        writer.write_u32_le_err(header.offset)?;
        Ok(())
    }

    fn encode_info_header<T: ByteWriterTrait>(
        header: &BitmapInfoHeader, writer: &mut ByteWriter<T>
    ) -> Result<(), BmpErrors> {
        writer.write_u32_le_err(header.header_size)?;
        writer.write_i32_le_err(header.width)?;
        writer.write_i32_le_err(header.height)?;
        writer.write_u16_le_err(header.planes)?;
        writer.write_u16_le_err(header.bits_per_pixel)?;
        writer.write_u32_le_err(header.compression)?;
        writer.write_u32_le_err(header.image_size)?;
        writer.write_i32_le_err(header.x_pixels_per_meter)?;
        writer.write_i32_le_err(header.y_pixels_per_meter)?;
        writer.write_u32_le_err(header.colors_used)?;
        writer.write_u32_le_err(header.important_colors)?;
        Ok(())
    }

    /// Encode the bitmap into `sink`
    ///
    /// Order: file header, info header, palette, gap, pixel rows, trailer.
    ///
    /// # Returns
    /// - Ok(size): Bytes written
    /// - Err: The error encountered while writing
    pub fn encode<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, BmpErrors> {
        let mut writer = ByteWriter::new(sink);

        writer.reserve(self.bitmap.encoded_size())?;

        Self::encode_file_header(self.bitmap.file_header(), &mut writer)?;
        Self::encode_info_header(self.bitmap.info_header(), &mut writer)?;
        writer.write_const_bytes(self.bitmap.palette().as_bytes())?;
        writer.write_all(self.bitmap.gap())?;
        writer.write_all(self.bitmap.pixels().as_bytes())?;
        writer.write_all(self.bitmap.trailer())?;
        writer.flush()?;

        Ok(writer.bytes_written())
    }

    /// Encode into a fresh vector
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, BmpErrors> {
        let mut sink: Vec<u8> = Vec::with_capacity(self.bitmap.encoded_size());
        self.encode(&mut sink)?;
        Ok(sink)
    }
}
