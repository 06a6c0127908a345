/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use core::mem::size_of;

use crate::bytestream::{ByteIoError, ByteWriterTrait};

mod std_writer;

/// Encapsulates a simple Byte writer with
/// support for Endian aware writes
pub struct ByteWriter<T: ByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer for the sink
    pub fn new(data: T) -> ByteWriter<T> {
        ByteWriter {
            buffer:        data,
            bytes_written: 0
        }
    }

    /// Write all bytes from `buf` into the sink
    ///
    /// Returns an error if not all bytes could be written
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    pub fn write_const_bytes<const N: usize>(&mut self, byte: &[u8; N]) -> Result<(), ByteIoError> {
        self.buffer.write_const_bytes(byte)?;
        self.bytes_written += N;
        Ok(())
    }

    /// Return the number of bytes the writer has written
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Pass a size hint down to the sink
    pub fn reserve(&mut self, additional: usize) -> Result<(), ByteIoError> {
        self.buffer.reserve_capacity(additional)
    }

    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.buffer.flush_bytes()
    }
}

macro_rules! write_single_type {
    ($name:tt,$int_type:tt) => {
        impl<T:ByteWriterTrait> ByteWriter<T>
        {
            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name(&mut self, byte: $int_type) -> Result<(), ByteIoError>
            {
                const SIZE: usize = size_of::<$int_type>();

                let bytes: [u8; SIZE] = byte.to_le_bytes();

                self.write_const_bytes(&bytes)
            }
        }
    };
}

write_single_type!(write_u16_le_err, u16);
write_single_type!(write_u32_le_err, u32);
write_single_type!(write_i32_le_err, i32);

#[cfg(test)]
mod tests {
    use crate::bytestream::ByteWriter;

    #[test]
    fn little_endian_writes() {
        let mut sink: Vec<u8> = vec![];
        let mut writer = ByteWriter::new(&mut sink);

        writer.write_u16_le_err(0x0201).unwrap();
        writer.write_const_bytes(b"BM").unwrap();
        writer.write_i32_le_err(-2).unwrap();
        writer.write_u32_le_err(54).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.bytes_written(), 12);

        assert_eq!(
            sink,
            [1, 2, b'B', b'M', 0xFE, 0xFF, 0xFF, 0xFF, 54, 0, 0, 0]
        );
    }
}
