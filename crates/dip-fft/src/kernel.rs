/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Iterative radix-2 Cooley-Tukey kernel
use core::f64::consts::PI;

use dip_core::utils::is_power_of_two;
use num_complex::Complex64;

use crate::FftErrors;

/// Sign of the exponent used by the twiddle factors
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// `e^{-2πik/N}`
    Forward,
    /// `e^{+2πik/N}`
    Inverse
}

impl Direction {
    const fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0
        }
    }
}

/// A reusable plan for transforms of one fixed length
///
/// Holds the `N/2` twiddle factors of the length, so transforming
/// every row of a plane computes them only once.
#[derive(Clone, Debug)]
pub struct Radix2 {
    len:       usize,
    direction: Direction,
    twiddles:  Vec<Complex64>
}

impl Radix2 {
    /// Create a plan for sequences of `len` samples
    ///
    /// # Errors
    /// [`FftErrors::DimensionError`] when `len` is not a power of two
    pub fn new(len: usize, direction: Direction) -> Result<Radix2, FftErrors> {
        if !is_power_of_two(len) {
            return Err(FftErrors::DimensionError {
                width:  len,
                height: 1
            });
        }
        let step = direction.sign() * 2.0 * PI / len as f64;

        let twiddles = (0..len / 2)
            .map(|k| Complex64::from_polar(1.0, step * k as f64))
            .collect();

        Ok(Radix2 {
            len,
            direction,
            twiddles
        })
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Transform `buffer` in place
    ///
    /// The output is not normalized in either direction.
    ///
    /// # Errors
    /// [`FftErrors::SizeMismatch`] if `buffer` is not exactly [`len`](Self::len) samples
    pub fn process(&self, buffer: &mut [Complex64]) -> Result<(), FftErrors> {
        if buffer.len() != self.len {
            return Err(FftErrors::SizeMismatch {
                expected: self.len,
                found:    buffer.len()
            });
        }
        self.process_exact(buffer);
        Ok(())
    }

    /// [`process`](Self::process) for callers that already sliced `buffer`
    /// into chunks of `len`
    pub(crate) fn process_exact(&self, buffer: &mut [Complex64]) {
        debug_assert_eq!(buffer.len(), self.len);

        if self.len < 2 {
            return;
        }
        bit_reverse_permute(buffer);

        let mut size = 2;

        while size <= self.len {
            let half = size / 2;
            // twiddle for butterfly k of this stage is w_N^{k * N/size}
            let stride = self.len / size;

            for block in buffer.chunks_exact_mut(size) {
                let (top, bottom) = block.split_at_mut(half);

                for (k, (a, b)) in top.iter_mut().zip(bottom.iter_mut()).enumerate() {
                    let t = *b * self.twiddles[k * stride];
                    *b = *a - t;
                    *a += t;
                }
            }
            size *= 2;
        }
    }
}

/// Reorder `buffer` so index `i` holds the sample from index `reverse_bits(i)`
fn bit_reverse_permute(buffer: &mut [Complex64]) {
    let bits = buffer.len().trailing_zeros();
    let shift = usize::BITS - bits;

    for i in 0..buffer.len() {
        let j = i.reverse_bits() >> shift;
        if j > i {
            buffer.swap(i, j);
        }
    }
}

/// Unnormalized in-place 1D transform of `samples`
///
/// The length of `samples` must be a power of two.
///
/// # Errors
/// [`FftErrors::DimensionError`] when it is not, `samples` is then left untouched
///
/// # Example
/// ```
/// use dip_fft::{fft_1d, Complex64, Direction};
///
/// let mut samples = vec![Complex64::new(1.0, 0.0); 4];
/// fft_1d(&mut samples, Direction::Forward).unwrap();
///
/// assert!((samples[0].re - 4.0).abs() < 1e-12);
/// assert!(samples[1].norm() < 1e-12);
/// ```
pub fn fft_1d(samples: &mut [Complex64], direction: Direction) -> Result<(), FftErrors> {
    Radix2::new(samples.len(), direction)?.process(samples)
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use nanorand::Rng;
    use num_complex::Complex64;

    use crate::kernel::{fft_1d, Direction, Radix2};
    use crate::FftErrors;

    fn naive_dft(input: &[Complex64], direction: Direction) -> Vec<Complex64> {
        let n = input.len();
        let sign = match direction {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0
        };
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .map(|(j, x)| {
                        let angle = sign * 2.0 * PI * (j * k % n) as f64 / n as f64;
                        *x * Complex64::from_polar(1.0, angle)
                    })
                    .sum::<Complex64>()
            })
            .collect()
    }

    fn random_samples(len: usize, seed: u64) -> Vec<Complex64> {
        let mut rng = nanorand::WyRand::new_seed(seed);
        (0..len)
            .map(|_| {
                Complex64::new(
                    f64::from(rng.generate_range(0_u32..=255)),
                    f64::from(rng.generate_range(0_u32..=255)) - 128.0
                )
            })
            .collect()
    }

    #[test]
    fn matches_naive_dft() {
        for len in [1, 2, 4, 8, 16, 64] {
            for direction in [Direction::Forward, Direction::Inverse] {
                let input = random_samples(len, len as u64);
                let expected = naive_dft(&input, direction);

                let mut output = input.clone();
                fft_1d(&mut output, direction).unwrap();

                for (a, b) in output.iter().zip(expected.iter()) {
                    assert!((*a - *b).norm() <= 1e-9 * b.norm().max(1.0), "len {len}");
                }
            }
        }
    }

    #[test]
    fn forward_then_inverse_scales_by_len() {
        let input = random_samples(32, 7);
        let mut samples = input.clone();

        fft_1d(&mut samples, Direction::Forward).unwrap();
        fft_1d(&mut samples, Direction::Inverse).unwrap();

        for (a, b) in samples.iter().zip(input.iter()) {
            assert!((*a / 32.0 - *b).norm() < 1e-9);
        }
    }

    #[test]
    fn rejects_other_lengths() {
        let mut samples = vec![Complex64::new(1.0, 0.0); 6];

        assert!(matches!(
            fft_1d(&mut samples, Direction::Forward),
            Err(FftErrors::DimensionError {
                width:  6,
                height: 1
            })
        ));
        assert!(samples.iter().all(|x| *x == Complex64::new(1.0, 0.0)));
        assert!(Radix2::new(0, Direction::Forward).is_err());
    }

    #[test]
    fn plan_checks_buffer_length() {
        let plan = Radix2::new(8, Direction::Forward).unwrap();
        let mut short = vec![Complex64::default(); 4];

        assert!(matches!(
            plan.process(&mut short),
            Err(FftErrors::SizeMismatch {
                expected: 8,
                found:    4
            })
        ));
    }
}
