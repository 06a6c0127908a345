/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use std::io;
use std::io::{BufReader, Read, Seek};

use crate::bytestream::reader::{ByteIoError, ByteSeekFrom};
use crate::bytestream::ByteReaderTrait;

impl<T: io::Read + io::Seek> ByteReaderTrait for BufReader<T> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        // read_exact leaves the position unspecified on failure, restore it
        let start = self.stream_position()?;

        if let Err(err) = self.read_exact(buf) {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                let end = self.seek(io::SeekFrom::End(0))?;
                self.seek(io::SeekFrom::Start(start))?;

                let available = usize::try_from(end.saturating_sub(start))?;
                return Err(ByteIoError::NotEnoughBytes(buf.len(), available));
            }
            self.seek(io::SeekFrom::Start(start))?;
            return Err(ByteIoError::from(err));
        }
        Ok(())
    }

    #[inline]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    fn byte_seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        self.read_to_end(sink).map_err(ByteIoError::from)
    }
}
