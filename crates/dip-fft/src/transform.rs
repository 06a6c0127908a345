/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Separable 2D transform
//!
//! The plane is transformed row by row, transposed so its columns become rows,
//! transformed row by row again and transposed back.
//!
//! The column pass only starts once every row is done. With the `threads`
//! feature each pass is spread over scoped threads and the end of the scope
//! is that barrier.
use std::sync::Once;

use dip_core::log::trace;
use dip_core::utils::is_power_of_two;
use num_complex::Complex64;

use crate::kernel::{Direction, Radix2};
use crate::transpose::transpose;
use crate::{ComplexPlane, FftErrors};

static START: Once = Once::new();

/// Planes smaller than this are never split across threads
#[cfg(feature = "threads")]
const MIN_THREADED_SAMPLES: usize = 1 << 14;

/// Transform `plane` in place
///
/// The inverse direction scales every sample by `1 / (width * height)`,
/// so `inverse(forward(x)) == x` up to rounding.
///
/// # Errors
/// [`FftErrors::DimensionError`] when the width or height is not a power of two.
/// The plane is not modified in that case.
pub fn transform(plane: &mut ComplexPlane, direction: Direction) -> Result<(), FftErrors> {
    let (width, height) = plane.dimensions();

    if !is_power_of_two(width) || !is_power_of_two(height) {
        return Err(FftErrors::DimensionError { width, height });
    }
    let row_plan = Radix2::new(width, direction)?;
    let column_plan = Radix2::new(height, direction)?;

    let mut scratch = vec![Complex64::default(); width * height];

    rows_pass(plane.samples_mut(), &row_plan);
    transpose(plane.samples(), &mut scratch, width, height);
    // columns of the plane are rows of the scratch matrix
    rows_pass(&mut scratch, &column_plan);
    transpose(&scratch, plane.samples_mut(), height, width);

    if direction == Direction::Inverse {
        let scale = 1.0 / (width * height) as f64;

        for sample in plane.samples_mut() {
            *sample *= scale;
        }
    }
    Ok(())
}

/// Forward transform, see [`transform`]
pub fn forward(plane: &mut ComplexPlane) -> Result<(), FftErrors> {
    transform(plane, Direction::Forward)
}

/// Normalized inverse transform, see [`transform`]
pub fn inverse(plane: &mut ComplexPlane) -> Result<(), FftErrors> {
    transform(plane, Direction::Inverse)
}

/// Run `plan` over every `plan.len()` sized row of `samples`
fn rows_pass(samples: &mut [Complex64], plan: &Radix2) {
    let row_len = plan.len();

    #[cfg(feature = "threads")]
    {
        let threads = std::thread::available_parallelism().map_or(1, |x| x.get());
        let rows = samples.len() / row_len;

        if threads > 1 && rows > 1 && samples.len() >= MIN_THREADED_SAMPLES {
            START.call_once(|| {
                trace!("Using threaded row pass over {threads} threads");
            });
            let rows_per_thread = rows.div_ceil(threads);

            std::thread::scope(|s| {
                for chunk in samples.chunks_mut(rows_per_thread * row_len) {
                    s.spawn(move || {
                        for row in chunk.chunks_exact_mut(row_len) {
                            plan.process_exact(row);
                        }
                    });
                }
            });
            return;
        }
    }
    START.call_once(|| {
        trace!("Using single threaded row pass");
    });
    for row in samples.chunks_exact_mut(row_len) {
        plan.process_exact(row);
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use nanorand::Rng;
    use num_complex::Complex64;

    use crate::{forward, inverse, ComplexPlane, FftErrors};

    fn random_plane(width: usize, height: usize, seed: u64) -> ComplexPlane {
        let mut rng = nanorand::WyRand::new_seed(seed);
        let samples = (0..width * height)
            .map(|_| Complex64::new(f64::from(rng.generate_range(0_u32..=255)), 0.0))
            .collect();
        ComplexPlane::new(width, height, samples).unwrap()
    }

    fn brute_force_dft(plane: &ComplexPlane) -> ComplexPlane {
        let (width, height) = plane.dimensions();
        let mut out = ComplexPlane::zeros(width, height).unwrap();

        for v in 0..height {
            for u in 0..width {
                let mut sum = Complex64::default();

                for (x, y, sample) in plane.iter() {
                    let angle = -2.0
                        * PI
                        * ((u * x) as f64 / width as f64 + (v * y) as f64 / height as f64);
                    sum += sample * Complex64::from_polar(1.0, angle);
                }
                out.set(u, v, sum);
            }
        }
        out
    }

    fn assert_close(a: &ComplexPlane, b: &ComplexPlane) {
        for (x, y) in a.samples().iter().zip(b.samples()) {
            assert!((*x - *y).norm() <= 1e-9 * y.norm().max(1.0), "{x} vs {y}");
        }
    }

    #[test]
    fn forward_matches_brute_force() {
        for (width, height) in [(4, 4), (8, 2), (1, 16)] {
            let input = random_plane(width, height, 42);
            let expected = brute_force_dft(&input);

            let mut plane = input.clone();
            forward(&mut plane).unwrap();
            assert_close(&plane, &expected);
        }
    }

    #[test]
    fn inverse_undoes_forward() {
        let input = random_plane(16, 8, 3);
        let mut plane = input.clone();

        forward(&mut plane).unwrap();
        inverse(&mut plane).unwrap();
        assert_close(&plane, &input);
    }

    #[test]
    fn large_plane_round_trips() {
        // big enough to take the threaded path when it is compiled in
        let input = random_plane(256, 128, 11);
        let mut plane = input.clone();

        forward(&mut plane).unwrap();
        inverse(&mut plane).unwrap();
        assert_close(&plane, &input);
    }

    #[test]
    fn rejects_non_power_of_two_without_touching_the_plane() {
        let input = random_plane(100, 100, 5);
        let mut plane = input.clone();

        assert!(matches!(
            forward(&mut plane),
            Err(FftErrors::DimensionError {
                width:  100,
                height: 100
            })
        ));
        assert_eq!(plane, input);

        let mut tall = random_plane(8, 12, 5);
        assert!(inverse(&mut tall).is_err());
    }
}
