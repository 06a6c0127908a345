/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use dip_core::layout::PixelBuffer;
use num_complex::Complex64;

use crate::FftErrors;

/// A `width` by `height` grid of complex samples
///
/// Samples are stored row major, top row first, without any padding.
/// `(x, y)` here names the same pixel as `(x, y)` in the
/// [`PixelBuffer`] the plane was made from.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexPlane {
    width:   usize,
    height:  usize,
    samples: Vec<Complex64>
}

impl ComplexPlane {
    /// Wrap `samples`, which must hold exactly `width * height` entries
    ///
    /// # Errors
    /// - [`FftErrors::DimensionError`] if either dimension is zero
    /// - [`FftErrors::SizeMismatch`] if the sample count is wrong
    pub fn new(
        width: usize, height: usize, samples: Vec<Complex64>
    ) -> Result<ComplexPlane, FftErrors> {
        if width == 0 || height == 0 {
            return Err(FftErrors::DimensionError { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(FftErrors::DimensionError { width, height })?;

        if samples.len() != expected {
            return Err(FftErrors::SizeMismatch {
                expected,
                found: samples.len()
            });
        }
        Ok(ComplexPlane {
            width,
            height,
            samples
        })
    }

    /// A plane where every sample is zero
    pub fn zeros(width: usize, height: usize) -> Result<ComplexPlane, FftErrors> {
        let size = width
            .checked_mul(height)
            .ok_or(FftErrors::DimensionError { width, height })?;
        ComplexPlane::new(width, height, vec![Complex64::new(0.0, 0.0); size])
    }

    /// Real part of each sample is the pixel value, imaginary parts are zero
    pub fn from_pixels(pixels: &PixelBuffer) -> ComplexPlane {
        let layout = pixels.layout();
        let mut samples = Vec::with_capacity(layout.num_pixels());

        pixels.for_each_pixel(|_, _, value| {
            samples.push(Complex64::new(f64::from(value), 0.0));
        });

        ComplexPlane {
            width: layout.width(),
            height: layout.height(),
            samples
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Sample at `(x, y)` or `None` when out of bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Complex64> {
        self.index(x, y).map(|i| self.samples[i])
    }

    /// Set the sample at `(x, y)`, returning false when out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: Complex64) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.samples[i] = value;
                true
            }
            None => false
        }
    }

    /// All samples, row major
    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [Complex64] {
        &mut self.samples
    }

    /// Iterate over `(x, y, sample)` row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Complex64)> + '_ {
        let width = self.width;
        self.samples
            .iter()
            .enumerate()
            .map(move |(i, sample)| (i % width, i / width, *sample))
    }
}
