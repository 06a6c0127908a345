/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Frequency domain processing of 8-bit images
//!
//! This crate contains
//! - [`ComplexPlane`], a grid of complex samples made from a [`PixelBuffer`](dip_core::layout::PixelBuffer)
//! - A radix-2 1D kernel ([`fft_1d`], [`Radix2`]) and the separable 2D
//!   [`transform`] built on it
//! - Centring, ideal radial filtering and rendering of planes back to images
//!
//! Both dimensions of a plane must be powers of two before it can be transformed.
//!
//! # Features
//! - `threads`: Spread the row and column passes over scoped threads, on by default
//! - `log`: Trace the chosen execution path through the `log` crate
//!
//! # Example
//! Ideal low pass filtering of an image
//! ```
//! use dip_core::layout::{PixelBuffer, PixelLayout};
//! use dip_fft::{centre, forward, inverse, radial_partition, reconstruct, ComplexPlane};
//!
//! let layout = PixelLayout::new(16, 16).unwrap();
//! let image = PixelBuffer::from_fn(layout, |x, y| ((x * y) % 256) as u8);
//!
//! let mut plane = ComplexPlane::from_pixels(&image);
//! centre(&mut plane);
//! forward(&mut plane).unwrap();
//!
//! let mut low_pass = radial_partition(&plane, 4.0).stop_band;
//! inverse(&mut low_pass).unwrap();
//!
//! let smoothed = reconstruct(&low_pass).unwrap();
//! assert_eq!(smoothed.layout(), layout);
//! ```
pub use dip_core::utils::clamp_to_u8;
pub use num_complex::Complex64;

pub use crate::errors::FftErrors;
pub use crate::filter::{centre, radial_partition, uncentre, Partition};
pub use crate::kernel::{fft_1d, Direction, Radix2};
pub use crate::plane::ComplexPlane;
pub use crate::render::{reconstruct, render_phase, render_spectrum};
pub use crate::transform::{forward, inverse, transform};

mod errors;
mod filter;
mod kernel;
mod plane;
mod render;
mod transform;
mod transpose;
