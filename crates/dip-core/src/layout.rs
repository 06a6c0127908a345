/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Padded 8-bit pixel layout
//!
//! An 8-bit bitmap stores its scanlines bottom to top, each one
//! padded on the right to a multiple of 4 bytes.
//!
//! ```text
//!  buffer row h-1  ┌───────────────┬──┐  image row 0 (top)
//!                  │               │  │
//!                  │               │  │
//!  buffer row 0    └───────────────┴──┘  image row h-1 (bottom)
//!                         width     pad
//!                  <─── row_stride ───>
//! ```
//!
//! Every access to such a buffer goes through [`PixelLayout`],
//! callers address pixels by image coordinates where `y = 0` is the top scanline.
use core::fmt::{Debug, Display, Formatter};

/// Errors from building a layout or wrapping a buffer in one
pub enum LayoutError {
    /// Width or height is zero
    ZeroDimension(usize, usize),
    /// `row_stride * height` does not fit in a usize
    OverFlowOccurred,
    /// The buffer length does not match the layout,
    /// expected, found
    SizeMismatch(usize, usize)
}

impl Debug for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroDimension(width, height) => {
                writeln!(f, "Zero dimension in layout, width={width}, height={height}")
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred when calculating the pixel data size")
            }
            Self::SizeMismatch(expected, found) => {
                writeln!(
                    f,
                    "Pixel buffer length mismatch, expected {expected} bytes but found {found}"
                )
            }
        }
    }
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for LayoutError {}

/// Geometry of an 8-bit, bottom-up, 4-byte aligned pixel buffer
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PixelLayout {
    width:      usize,
    height:     usize,
    row_stride: usize
}

impl PixelLayout {
    /// Create the layout of a `width` by `height` 8-bit image
    ///
    /// # Errors
    /// - [`LayoutError::ZeroDimension`] if either dimension is zero
    /// - [`LayoutError::OverFlowOccurred`] if the buffer size does not fit a usize
    ///
    /// ```
    /// use dip_core::layout::PixelLayout;
    /// let layout = PixelLayout::new(5, 3).unwrap();
    /// assert_eq!(layout.row_stride(), 8);
    /// assert_eq!(layout.pixel_data_size(), 24);
    /// ```
    pub fn new(width: usize, height: usize) -> Result<PixelLayout, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::ZeroDimension(width, height));
        }
        let row_stride = row_stride(width).ok_or(LayoutError::OverFlowOccurred)?;
        // make sure every later offset computation fits
        row_stride
            .checked_mul(height)
            .ok_or(LayoutError::OverFlowOccurred)?;

        Ok(PixelLayout {
            width,
            height,
            row_stride
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Bytes per scanline, padding included
    pub const fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Size of the whole padded buffer, `row_stride * height`
    pub const fn pixel_data_size(&self) -> usize {
        self.row_stride * self.height
    }

    /// Number of pixels, padding excluded
    pub const fn num_pixels(&self) -> usize {
        self.width * self.height
    }

    /// Offset of the pixel at image coordinates `(x, y)` inside the padded buffer
    ///
    /// `y = 0` is the top scanline, which is stored last.
    ///
    /// Returns `None` when the coordinate lies outside the image
    #[inline]
    pub const fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((self.height - 1 - y) * self.row_stride + x)
    }
}

/// `floor((width * 8 + 31) / 32) * 4`, or `None` on overflow
#[inline]
pub fn row_stride(width: usize) -> Option<usize> {
    Some((width.checked_mul(8)?.checked_add(31)? / 32) * 4)
}

/// An owned 8-bit pixel buffer in bitmap order
///
/// The backing bytes have exactly [`PixelLayout::pixel_data_size`] bytes,
/// padding included, so they can be written out verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    layout: PixelLayout,
    data:   Vec<u8>
}

impl PixelBuffer {
    /// Create a buffer with every byte, padding included, set to zero
    pub fn new(layout: PixelLayout) -> PixelBuffer {
        PixelBuffer {
            layout,
            data: vec![0; layout.pixel_data_size()]
        }
    }

    /// Wrap raw bitmap bytes
    ///
    /// # Errors
    /// [`LayoutError::SizeMismatch`] if `data` is not exactly `pixel_data_size` bytes
    pub fn from_vec(layout: PixelLayout, data: Vec<u8>) -> Result<PixelBuffer, LayoutError> {
        if data.len() != layout.pixel_data_size() {
            return Err(LayoutError::SizeMismatch(
                layout.pixel_data_size(),
                data.len()
            ));
        }
        Ok(PixelBuffer { layout, data })
    }

    /// Create a buffer whose pixel at `(x, y)` is `function(x, y)`
    ///
    /// Padding bytes are zero
    pub fn from_fn<F>(layout: PixelLayout, mut function: F) -> PixelBuffer
    where
        F: FnMut(usize, usize) -> u8
    {
        let mut buffer = PixelBuffer::new(layout);

        for y in 0..layout.height() {
            for x in 0..layout.width() {
                buffer.set(x, y, function(x, y));
            }
        }
        buffer
    }

    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Pixel at image coordinates `(x, y)` or `None` if out of bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.layout
            .offset(x, y)
            .and_then(|offset| self.data.get(offset).copied())
    }

    /// Set the pixel at `(x, y)`, returning false if out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) -> bool {
        match self
            .layout
            .offset(x, y)
            .and_then(|offset| self.data.get_mut(offset))
        {
            Some(pixel) => {
                *pixel = value;
                true
            }
            None => false
        }
    }

    /// Visit every pixel top to bottom, left to right
    pub fn for_each_pixel<F>(&self, mut function: F)
    where
        F: FnMut(usize, usize, u8)
    {
        let (width, stride) = (self.layout.width(), self.layout.row_stride());

        // rows are stored bottom up, walk them in reverse to get top down order
        for (y, row) in self.data.rchunks_exact(stride).enumerate() {
            for (x, pixel) in row[..width].iter().enumerate() {
                function(x, y, *pixel);
            }
        }
    }

    /// Raw bytes in file order, padding included
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::layout::{row_stride, LayoutError, PixelBuffer, PixelLayout};

    #[test]
    fn stride_is_padded_to_four_bytes() {
        assert_eq!(row_stride(1), Some(4));
        assert_eq!(row_stride(4), Some(4));
        assert_eq!(row_stride(5), Some(8));
        assert_eq!(row_stride(1023), Some(1024));
        assert_eq!(row_stride(1024), Some(1024));
        assert_eq!(row_stride(usize::MAX), None);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            PixelLayout::new(0, 10),
            Err(LayoutError::ZeroDimension(0, 10))
        ));
        assert!(matches!(
            PixelLayout::new(10, 0),
            Err(LayoutError::ZeroDimension(10, 0))
        ));
    }

    #[test]
    fn top_row_is_stored_last() {
        let layout = PixelLayout::new(3, 2).unwrap();
        // stride 4, rows bottom up
        assert_eq!(layout.offset(0, 1), Some(0));
        assert_eq!(layout.offset(2, 1), Some(2));
        assert_eq!(layout.offset(0, 0), Some(4));
        assert_eq!(layout.offset(3, 0), None);
        assert_eq!(layout.offset(0, 2), None);
    }

    #[test]
    fn from_fn_and_get_agree() {
        let layout = PixelLayout::new(7, 5).unwrap();
        let buffer = PixelBuffer::from_fn(layout, |x, y| (x * 10 + y) as u8);

        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(buffer.get(x, y), Some((x * 10 + y) as u8));
            }
        }
        // padding is untouched
        for row in buffer.as_bytes().chunks_exact(layout.row_stride()) {
            assert_eq!(row[7], 0);
        }
    }

    #[test]
    fn from_fn_writes_bottom_row_first() {
        let layout = PixelLayout::new(3, 2).unwrap();
        let buffer = PixelBuffer::from_fn(layout, |x, y| (10 * y + x + 1) as u8);

        assert_eq!(buffer.as_bytes(), &[11, 12, 13, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn for_each_pixel_walks_top_down() {
        let layout = PixelLayout::new(6, 4).unwrap();
        let mut data = vec![0_u8; layout.pixel_data_size()];
        nanorand::WyRand::new().fill(&mut data);

        let buffer = PixelBuffer::from_vec(layout, data).unwrap();
        let mut visited = 0;

        buffer.for_each_pixel(|x, y, value| {
            assert_eq!(buffer.get(x, y), Some(value));
            assert_eq!(visited, y * 6 + x);
            visited += 1;
        });
        assert_eq!(visited, 24);
    }

    #[test]
    fn from_vec_checks_length() {
        let layout = PixelLayout::new(5, 5).unwrap();
        assert!(matches!(
            PixelBuffer::from_vec(layout, vec![0; 25]),
            Err(LayoutError::SizeMismatch(40, 25))
        ));
    }
}
