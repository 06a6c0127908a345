/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Turning complex planes back into 8-bit images
//!
//! Every function here lays its output out as a [`PixelBuffer`], so sample
//! `(x, y)` of the plane lands on pixel `(x, y)` of the image, top row first.
use core::f64::consts::PI;

use dip_core::layout::{PixelBuffer, PixelLayout};
use dip_core::utils::clamp_to_u8;
use num_complex::Complex64;

use crate::{ComplexPlane, FftErrors};

/// Gain applied to the normalized magnitude before taking the logarithm
const SPECTRUM_GAIN: f64 = 10000.0;
/// Scale of the logarithm, `30 * ln(1 + 10000)` is just above 255
const SPECTRUM_SCALE: f64 = 30.0;

fn render<F>(plane: &ComplexPlane, mut function: F) -> Result<PixelBuffer, FftErrors>
where
    F: FnMut(usize, usize, Complex64) -> u8
{
    let layout = PixelLayout::new(plane.width(), plane.height())?;
    let mut samples = plane.iter();

    // PixelBuffer::from_fn visits pixels in the same row major order
    Ok(PixelBuffer::from_fn(layout, |x, y| {
        samples
            .next()
            .map_or(0, |(_, _, sample)| function(x, y, sample))
    }))
}

/// Log scaled magnitude of every sample
///
/// Each pixel is `30 * ln(1 + 10000 * |z| / M)` rounded and clamped,
/// where `M` is the largest magnitude in the plane. An all zero plane
/// renders as an all zero image.
pub fn render_spectrum(plane: &ComplexPlane) -> Result<PixelBuffer, FftErrors> {
    let max = plane
        .samples()
        .iter()
        .map(|x| x.norm())
        .fold(0.0_f64, f64::max);

    if max == 0.0 {
        return render(plane, |_, _, _| 0);
    }
    render(plane, |_, _, sample| {
        clamp_to_u8(SPECTRUM_SCALE * (SPECTRUM_GAIN * sample.norm() / max).ln_1p())
    })
}

/// Phase angle of every sample, `-π..=π` mapped linearly onto `0..=254`
///
/// A purely positive real sample renders as 127.
pub fn render_phase(plane: &ComplexPlane) -> Result<PixelBuffer, FftErrors> {
    render(plane, |_, _, sample| {
        clamp_to_u8(127.0 * sample.im.atan2(sample.re) / PI + 127.0)
    })
}

/// Real part of a centred plane after an inverse transform
///
/// The centring is undone on the fly, the input plane is left as is.
/// Values are rounded to the nearest integer and clamped to `0..=255`.
pub fn reconstruct(plane: &ComplexPlane) -> Result<PixelBuffer, FftErrors> {
    render(plane, |x, y, sample| {
        let value = if (x + y) & 1 == 1 { -sample.re } else { sample.re };
        clamp_to_u8(value)
    })
}
