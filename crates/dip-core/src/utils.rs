/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Small numeric helpers

/// Round `value` to the nearest integer and saturate it into `0..=255`
///
/// Ties round away from zero. `NaN` maps to zero.
///
/// ```
/// use dip_core::utils::clamp_to_u8;
/// assert_eq!(clamp_to_u8(127.5), 128);
/// assert_eq!(clamp_to_u8(-3.0), 0);
/// assert_eq!(clamp_to_u8(1e9), 255);
/// ```
#[inline]
pub fn clamp_to_u8(value: f64) -> u8 {
    // `as` on floats saturates and sends NaN to zero
    value.round().clamp(0.0, 255.0) as u8
}

/// Whether `value` is a power of two
///
/// Zero is not.
#[inline]
pub const fn is_power_of_two(value: usize) -> bool {
    value != 0 && (value & (value - 1)) == 0
}
