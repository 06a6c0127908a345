/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by all dip libraries
//!
//! This crate provides the pieces the bitmap codec and the
//! frequency-domain crates both need
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Decoder options
//! - The padded pixel layout of 8-bit bitmaps and an owned pixel buffer
//!   that is only ever indexed through that layout
//! - Logging macros which forward to the `log` crate when the `log` feature is on
//!
//! # Features
//!  - `log`: Route `dip_core::log::*` macros to the `log` crate.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![macro_use]

pub mod bytestream;
pub mod layout;
pub mod log;
pub mod options;
pub mod utils;
