/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// Only one flavour of BMP is handled here, WinBMPv3 with 8 bits per pixel.
//
// - A 14 byte file header: the magic number ("BM"), file size, 4 reserved
//   bytes and the offset to the pixel data.
// - A 40 byte info header: width, height, planes, bits per pixel,
//   compression, image size, resolution and color counts.
// - A 256 entry color table, 4 bytes per entry (BGR0).
// - An optional gap, up to the declared pixel offset.
// - Pixel rows, bottom-up, each padded to a multiple of 4 bytes.
//
// Everything else (RLE, bitfields, OS/2 headers, V4/V5 headers, top-down
// images) is refused instead of guessed at.

use dip_core::bytestream::{ByteReader, ByteReaderTrait};
use dip_core::layout::{PixelBuffer, PixelLayout};
use dip_core::log::{info, trace, warn};
use dip_core::options::DecoderOptions;

use crate::common::{
    Bitmap, BitmapFileHeader, BitmapInfoHeader, Palette, INFO_HEADER_SIZE, PALETTE_SIZE,
    PIXEL_DATA_OFFSET
};
use crate::BmpErrors;

/// Probe some bytes to see
/// if they consist of a BMP image we can decode
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        if magic_bytes == b"BM" {
            // skip file_size   -> 4
            // skip reserved    -> 4
            // skip data offset -> 4
            // read sz
            if let Some(sz) = bytes.get(14..18) {
                let sz = u32::from_le_bytes([sz[0], sz[1], sz[2], sz[3]]);

                return sz == INFO_HEADER_SIZE;
            }
        }
    }
    false
}

/// An 8-bit grayscale BMP decoder.
///
/// # Usage
/// The decoder can be used to read image information and or get the bitmap out of a valid bmp
/// image.
///
/// ## Extracting image metadata
/// ```no_run
/// use dip_bmp::BmpDecoder;
/// use dip_core::bytestream::ByteCursor;
///
/// fn main() -> Result<(), dip_bmp::BmpErrors> {
///     let source = ByteCursor::new(std::fs::read("image.bmp")?);
///     let mut decoder = BmpDecoder::new(source);
///     decoder.decode_headers()?;
///     // after decoding headers, we can safely access the image metadata
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}", w, h);
///     Ok(())
/// }
/// ```
///
/// ## Getting the bitmap
///
/// ```no_run
/// use dip_bmp::BmpDecoder;
/// use dip_core::bytestream::ByteCursor;
///
/// fn main() -> Result<(), dip_bmp::BmpErrors> {
///     let source = ByteCursor::new(std::fs::read("image.bmp")?);
///     let bitmap = BmpDecoder::new(source).decode()?;
///     println!("Pixel data: {} bytes", bitmap.pixels().as_bytes().len());
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<T>
where
    T: ByteReaderTrait
{
    bytes:   ByteReader<T>,
    options: DecoderOptions,
    headers: Option<(BitmapFileHeader, BitmapInfoHeader, PixelLayout)>
}

impl<T> BmpDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a new bmp decoder that reads data from
    /// `data`
    ///
    /// # Arguments
    /// - `data`: The buffer from which we will read bytes from
    ///
    /// # Returns
    /// - A BMP decoder instance
    pub fn new(data: T) -> BmpDecoder<T> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The buffer from which we will read data from
    /// * `options`:  Specialized options for this decoder
    ///
    /// returns: A BMP Decoder instance
    ///
    pub fn new_with_options(data: T, options: DecoderOptions) -> BmpDecoder<T> {
        BmpDecoder {
            bytes: ByteReader::new(data),
            options,
            headers: None
        }
    }

    /// Decode headers stored in the bmp file and store
    /// information in the decode context
    ///
    /// After calling this, header and geometry accessors return `Some`
    ///
    /// Besides format checks, a pixel data offset below 1078 (pixels starting
    /// inside the headers or palette) is refused with
    /// [`BmpErrors::InvalidPixelOffset`] even though the offset alone would
    /// be enough to locate the pixels.
    ///
    /// # Returns
    /// - Ok(()) Indicates everything was okay during header parsing
    /// - Err: Error that occurred when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), BmpErrors> {
        if self.headers.is_none() {
            self.headers = Some(self.read_headers()?);
        }
        Ok(())
    }

    fn read_headers(
        &mut self
    ) -> Result<(BitmapFileHeader, BitmapInfoHeader, PixelLayout), BmpErrors> {
        self.bytes.set_position(0)?;

        let magic = self.bytes.read_fixed_bytes_or_error::<2>()?;

        if &magic != b"BM" {
            return Err(BmpErrors::InvalidMagicBytes(magic));
        }
        let file_header = BitmapFileHeader {
            magic,
            file_size: self.bytes.get_u32_le_err()?,
            reserved: self.bytes.get_u32_le_err()?,
            offset: self.bytes.get_u32_le_err()?
        };

        let header_size = self.bytes.get_u32_le_err()?;

        if header_size != INFO_HEADER_SIZE {
            return Err(BmpErrors::UnsupportedHeaderSize(header_size));
        }

        let info_header = BitmapInfoHeader {
            header_size,
            width: self.bytes.get_i32_le_err()?,
            height: self.bytes.get_i32_le_err()?,
            planes: self.bytes.get_u16_le_err()?,
            bits_per_pixel: self.bytes.get_u16_le_err()?,
            compression: self.bytes.get_u32_le_err()?,
            image_size: self.bytes.get_u32_le_err()?,
            x_pixels_per_meter: self.bytes.get_i32_le_err()?,
            y_pixels_per_meter: self.bytes.get_i32_le_err()?,
            colors_used: self.bytes.get_u32_le_err()?,
            important_colors: self.bytes.get_u32_le_err()?
        };

        if info_header.compression != 0 {
            return Err(BmpErrors::UnsupportedCompression(info_header.compression));
        }
        if info_header.bits_per_pixel != 8 {
            return Err(BmpErrors::UnsupportedDepth(info_header.bits_per_pixel));
        }
        let layout = info_header.layout()?;

        if layout.height() > self.options.max_height() {
            return Err(BmpErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                layout.height()
            ));
        }
        if layout.width() > self.options.max_width() {
            return Err(BmpErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                layout.width()
            ));
        }

        trace!("Width: {}", layout.width());
        trace!("Height: {}", layout.height());
        trace!("Row stride: {}", layout.row_stride());

        if info_header.planes != 1 {
            warn!("Color planes is {}, expected 1", info_header.planes);
        }

        if info_header.colors_used > 256 {
            if self.options.strict_mode() {
                return Err(BmpErrors::TooManyColors(info_header.colors_used));
            }
            warn!(
                "Palette declares {} colors, only 256 will be used",
                info_header.colors_used
            );
        }

        let pixel_data_size = layout.pixel_data_size();
        let declared_size = info_header.image_size as usize;

        if declared_size == 0 {
            trace!("Image size not stored, derived {} bytes", pixel_data_size);
        } else if declared_size < pixel_data_size {
            if self.options.strict_mode() {
                return Err(BmpErrors::InvalidImageSize(pixel_data_size, declared_size));
            }
            warn!(
                "Declared image size {} is smaller than the pixel data ({} bytes), using the latter",
                declared_size, pixel_data_size
            );
        }

        if (file_header.offset as usize) < PIXEL_DATA_OFFSET {
            return Err(BmpErrors::InvalidPixelOffset(file_header.offset));
        }

        info!("{}", file_header);
        info!("{}", info_header);

        Ok((file_header, info_header, layout))
    }

    /// Get dimensions of the image
    ///
    /// This is a tuple of width,height
    ///
    /// # Returns
    /// - `Some((width,height))`  - The image dimensions
    /// - `None`: Indicates that the image headers weren't decoded
    ///    or an error occurred during decoding the headers
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.layout()
            .map(|layout| (layout.width(), layout.height()))
    }

    /// Geometry of the pixel data or `None` if headers weren't decoded
    pub fn layout(&self) -> Option<PixelLayout> {
        self.headers.map(|(_, _, layout)| layout)
    }

    pub fn file_header(&self) -> Option<&BitmapFileHeader> {
        self.headers.as_ref().map(|(file_header, _, _)| file_header)
    }

    pub fn info_header(&self) -> Option<&BitmapInfoHeader> {
        self.headers.as_ref().map(|(_, info_header, _)| info_header)
    }

    /// Decode the whole file into a [`Bitmap`]
    ///
    /// Headers are decoded first if they haven't been.
    pub fn decode(&mut self) -> Result<Bitmap, BmpErrors> {
        let (file_header, info_header, layout) = match self.headers {
            Some(headers) => headers,
            None => {
                let headers = self.read_headers()?;
                self.headers = Some(headers);
                headers
            }
        };

        // palette sits right after the info header
        self.bytes.set_position(PIXEL_DATA_OFFSET - PALETTE_SIZE)?;
        let palette = Palette::from_bytes(self.bytes.read_fixed_bytes_or_error::<PALETTE_SIZE>()?);

        let mut gap = vec![0; file_header.offset as usize - PIXEL_DATA_OFFSET];
        self.bytes.read_exact_bytes(&mut gap)?;

        if !gap.is_empty() {
            trace!("{} bytes between palette and pixel data", gap.len());
        }

        let mut pixels = vec![0; layout.pixel_data_size()];
        self.bytes.read_exact_bytes(&mut pixels)?;

        let trailer = self.bytes.remaining_bytes()?.to_vec();

        if !trailer.is_empty() {
            trace!("{} bytes after pixel data", trailer.len());
        }
        let pixels = PixelBuffer::from_vec(layout, pixels)?;

        Ok(Bitmap::from_parts(
            file_header,
            info_header,
            palette,
            gap,
            pixels,
            trailer
        ))
    }
}

#[cfg(test)]
mod tests {
    use dip_core::bytestream::ByteCursor;

    use crate::decoder::probe_bmp;
    use crate::{BmpDecoder, BmpErrors};

    #[test]
    fn probe_needs_magic_and_dib_size() {
        let mut header = [0_u8; 18];
        header[0..2].copy_from_slice(b"BM");
        header[14] = 40;

        assert!(probe_bmp(&header));
        header[14] = 124;
        assert!(!probe_bmp(&header));
        assert!(!probe_bmp(b"BM"));
        assert!(!probe_bmp(b"PK\x03\x04"));
    }

    #[test]
    fn short_input_is_an_io_error() {
        let mut decoder = BmpDecoder::new(ByteCursor::new(b"BM\x00\x00"));
        let err = decoder.decode_headers().unwrap_err();

        assert!(matches!(err, BmpErrors::IoErrors(_)));
        assert!(decoder.dimensions().is_none());
    }
}
