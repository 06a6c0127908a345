/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading and writing bitmaps
//!
//! This exposes the traits and implementations for readers
//! and writers used by the dip decoders and encoders.

use crate::bytestream::reader::{ByteIoError, ByteSeekFrom};

/// The Input trait implemented for readers.
///
/// This provides the basic functions needed for quick and heap free
/// I/O, implemented for in memory buffers ([`ByteCursor`](crate::bytestream::ByteCursor))
/// and for buffered files ([`BufReader`](std::io::BufReader)).
pub trait ByteReaderTrait {
    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    ///  ## Errors
    /// A short source is [`NotEnoughBytes`](ByteIoError::NotEnoughBytes) carrying
    /// the requested and available byte counts.
    /// In case of an error, the implementation should not increment the internal position
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Same as [`read_exact_bytes`](Self::read_exact_bytes) but for a fixed size array,
    /// which lets the compiler constant fold the copy
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError>;

    /// Seek into a new position from the buffer
    ///
    /// Returns the new position from the start of the stream
    fn byte_seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError>;

    /// Read all bytes remaining in this input to `sink` until we hit eof
    ///
    /// # Returns
    /// - `Ok(usize)` The actual number of bytes added to the sink
    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError>;
}

/// The writer trait implemented for the dip encoders
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded bitmaps
pub trait ByteWriterTrait {
    /// Write all bytes to the buffer or return an error if something occurred
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Write a fixed number of bytes and error out if we can't write the bytes
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError>;
    /// Ensure bytes are written to the sink.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
    /// A hint to tell the implementation how big of a size we expect the output to be
    ///
    /// This is just a hint, akin to calling `Vec::reserve` and should be treated as such.
    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError>;
}
