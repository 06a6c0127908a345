/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use dip_bmp::{Bitmap, BmpDecoder, BmpEncoder, BmpErrors};
use dip_core::bytestream::{ByteCursor, ByteIoError};
use dip_core::layout::{PixelBuffer, PixelLayout};
use dip_core::options::DecoderOptions;

fn valid_file(width: usize, height: usize) -> Vec<u8> {
    let layout = PixelLayout::new(width, height).unwrap();
    let bitmap = Bitmap::new_grayscale(PixelBuffer::from_fn(layout, |x, y| (x ^ y) as u8)).unwrap();
    BmpEncoder::new(&bitmap).encode_to_vec().unwrap()
}

fn patch(file: &mut [u8], offset: usize, bytes: &[u8]) {
    file[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn decode_err(file: Vec<u8>) -> BmpErrors {
    BmpDecoder::new(ByteCursor::new(file)).decode().unwrap_err()
}

fn decode_strict_err(file: Vec<u8>) -> BmpErrors {
    let options = DecoderOptions::default().set_strict_mode(true);
    BmpDecoder::new_with_options(ByteCursor::new(file), options)
        .decode()
        .unwrap_err()
}

#[test]
fn bad_magic() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 0, b"MB");

    let err = decode_err(file);
    assert!(matches!(err, BmpErrors::InvalidMagicBytes(x) if &x == b"MB"));
    assert!(err.is_format_error());
}

#[test]
fn v5_header_is_refused() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 14, &124_u32.to_le_bytes());

    assert!(matches!(
        decode_err(file),
        BmpErrors::UnsupportedHeaderSize(124)
    ));
}

#[test]
fn rle8_is_refused() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 30, &1_u32.to_le_bytes());

    assert!(matches!(
        decode_err(file),
        BmpErrors::UnsupportedCompression(1)
    ));
}

#[test]
fn rgb24_is_refused() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 28, &24_u16.to_le_bytes());

    assert!(matches!(decode_err(file), BmpErrors::UnsupportedDepth(24)));
}

#[test]
fn top_down_is_refused() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 22, &(-4_i32).to_le_bytes());

    assert!(matches!(
        decode_err(file),
        BmpErrors::InvalidDimensions(4, -4)
    ));
}

#[test]
fn zero_width_is_refused() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 18, &0_i32.to_le_bytes());

    assert!(matches!(
        decode_err(file),
        BmpErrors::InvalidDimensions(0, 4)
    ));
}

#[test]
fn offset_inside_palette_is_refused() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 10, &54_u32.to_le_bytes());

    assert!(matches!(
        decode_err(file),
        BmpErrors::InvalidPixelOffset(54)
    ));
}

#[test]
fn offset_right_after_a_short_palette_is_refused() {
    // 54 byte headers followed by a 16 entry palette
    let mut file = valid_file(4, 4);
    patch(&mut file, 10, &118_u32.to_le_bytes());

    let err = decode_err(file);
    assert!(matches!(err, BmpErrors::InvalidPixelOffset(118)));
    assert!(err.is_format_error());
    assert!(format!("{err}").contains("1078"));
}

#[test]
fn truncated_pixels_are_an_io_error() {
    let mut file = valid_file(8, 8);
    file.truncate(file.len() - 3);

    let err = decode_err(file);
    assert!(matches!(
        err,
        BmpErrors::IoErrors(ByteIoError::NotEnoughBytes(64, 61))
    ));
    assert!(!err.is_format_error());
}

#[test]
fn limits_are_respected() {
    let options = DecoderOptions::default().set_max_width(16);
    let err = BmpDecoder::new_with_options(ByteCursor::new(valid_file(32, 4)), options)
        .decode()
        .unwrap_err();

    assert!(matches!(
        err,
        BmpErrors::TooLargeDimensions("width", 16, 32)
    ));
}

#[test]
fn small_image_size_depends_on_strictness() {
    let mut file = valid_file(6, 6);
    patch(&mut file, 34, &10_u32.to_le_bytes());

    assert!(matches!(
        decode_strict_err(file.clone()),
        BmpErrors::InvalidImageSize(48, 10)
    ));

    let bitmap = BmpDecoder::new(ByteCursor::new(file.clone()))
        .decode()
        .unwrap();
    assert_eq!(bitmap.info_header().image_size, 10);
    assert_eq!(BmpEncoder::new(&bitmap).encode_to_vec().unwrap(), file);
}

#[test]
fn too_many_colors_depends_on_strictness() {
    let mut file = valid_file(4, 4);
    patch(&mut file, 46, &300_u32.to_le_bytes());

    assert!(matches!(
        decode_strict_err(file.clone()),
        BmpErrors::TooManyColors(300)
    ));
    assert!(BmpDecoder::new(ByteCursor::new(file)).decode().is_ok());
}

#[test]
fn headers_are_available_after_decode_headers() {
    let mut decoder = BmpDecoder::new(ByteCursor::new(valid_file(5, 3)));

    assert!(decoder.dimensions().is_none());
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((5, 3)));
    assert_eq!(decoder.info_header().unwrap().bits_per_pixel, 8);
    assert_eq!(decoder.file_header().unwrap().offset, 1078);
    assert_eq!(decoder.layout().unwrap().row_stride(), 8);

    // decoding after the headers still reads the whole file
    let bitmap = decoder.decode().unwrap();
    assert_eq!(bitmap.pixels().get(4, 2), Some(4 ^ 2));
}
