/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use dip_core::layout::LayoutError;

/// Errors from building planes and transforming them
pub enum FftErrors {
    /// Width or height is not a power of two (or is zero)
    DimensionError { width: usize, height: usize },
    /// A sample buffer does not hold `width * height` samples
    SizeMismatch { expected: usize, found: usize },
    /// A plane could not be laid out as an 8-bit image
    LayoutError(LayoutError)
}

impl Debug for FftErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DimensionError { width, height } => {
                writeln!(
                    f,
                    "Dimensions {width}x{height} are not powers of two, cannot transform"
                )
            }
            Self::SizeMismatch { expected, found } => {
                writeln!(f, "Expected {expected} samples but found {found}")
            }
            Self::LayoutError(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for FftErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for FftErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LayoutError(err) => Some(err),
            _ => None
        }
    }
}

impl From<LayoutError> for FftErrors {
    fn from(value: LayoutError) -> Self {
        FftErrors::LayoutError(value)
    }
}
