/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Frequency centring and ideal radial filtering
use num_complex::Complex64;

use crate::ComplexPlane;

/// Multiply every sample whose `x + y` is odd by `-1`
///
/// Done before a forward transform this moves the zero frequency
/// term to `(width / 2, height / 2)`. The operation is its own inverse.
pub fn centre(plane: &mut ComplexPlane) {
    let width = plane.width();

    for (y, row) in plane.samples_mut().chunks_exact_mut(width).enumerate() {
        // first odd sample of the row
        for sample in row.iter_mut().skip((y & 1) ^ 1).step_by(2) {
            *sample = -*sample;
        }
    }
}

/// Undo [`centre`]
#[inline]
pub fn uncentre(plane: &mut ComplexPlane) {
    centre(plane);
}

/// The two halves of a plane split by [`radial_partition`]
///
/// For every position `pass_band + stop_band` is exactly the sample that was split.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// Samples further than the cutoff from the centre, zero elsewhere
    pub pass_band: ComplexPlane,
    /// Samples within the cutoff, the ideal low pass result
    pub stop_band: ComplexPlane
}

/// Split `plane` into the samples within `radius` of its centre and the rest
///
/// The centre is `(width / 2, height / 2)` in integer arithmetic. A sample
/// at distance `d` goes to the stop band when `d <= radius`.
///
/// A radius of zero therefore keeps only the centre sample in the stop band,
/// any radius past the half diagonal moves the whole plane there.
pub fn radial_partition(plane: &ComplexPlane, radius: f64) -> Partition {
    let mut pass_band = plane.clone();
    let mut stop_band = plane.clone();

    let centre_x = (plane.width() / 2) as f64;
    let centre_y = (plane.height() / 2) as f64;
    let zero = Complex64::new(0.0, 0.0);

    let width = plane.width();

    for (i, (pass, stop)) in pass_band
        .samples_mut()
        .iter_mut()
        .zip(stop_band.samples_mut().iter_mut())
        .enumerate()
    {
        let dx = (i % width) as f64 - centre_x;
        let dy = (i / width) as f64 - centre_y;

        if dx.hypot(dy) <= radius {
            *pass = zero;
        } else {
            *stop = zero;
        }
    }
    Partition {
        pass_band,
        stop_band
    }
}
