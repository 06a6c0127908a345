/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An 8-bit grayscale BMP codec
//!
//! This crate reads and writes uncompressed, 8 bits per pixel, bottom-up
//! BMP files with a 40 byte info header and a 256 entry palette.
//!
//! Decoding keeps every byte of the file: headers exactly as stored, the palette,
//! whatever sits between the palette and the pixels and whatever follows them.
//! Encoding a decoded bitmap therefore reproduces the input file byte for byte.
//!
//! # Features
//! - `log`: Log the header summary and decoding details through the `log` crate
//! - `serde`: Serialize the header structs
//!
//! # Example
//! ```no_run
//! use dip_core::layout::PixelBuffer;
//!
//! fn main() -> Result<(), dip_bmp::BmpErrors> {
//!     let bitmap = dip_bmp::load("input.bmp")?;
//!     // invert every pixel
//!     let inverted = PixelBuffer::from_fn(bitmap.layout(), |x, y| {
//!         255 - bitmap.pixels().get(x, y).unwrap_or(0)
//!     });
//!     dip_bmp::store("inverted.bmp", &bitmap.with_pixels(inverted)?)?;
//!     Ok(())
//! }
//! ```

pub use crate::common::{Bitmap, BitmapFileHeader, BitmapInfoHeader, Palette};
pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::encoder::BmpEncoder;
pub use crate::errors::BmpErrors;
pub use crate::file::{load, load_with_options, store};

pub mod common;
mod decoder;
mod encoder;
mod errors;
mod file;
