/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::reader::{ByteIoError, ByteSeekFrom};
use crate::bytestream::ByteReaderTrait;

/// A cursor over an in memory buffer
///
/// Reads past the end of the buffer fail without moving the cursor
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(buffer: T) -> ByteCursor<T> {
        ByteCursor {
            stream:   buffer,
            position: 0
        }
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.stream.as_ref().len()
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let available = self.len().saturating_sub(self.position);

        if available < buf.len() {
            return Err(ByteIoError::NotEnoughBytes(buf.len(), available));
        }
        buf.copy_from_slice(&self.stream.as_ref()[self.position..self.position + buf.len()]);
        self.position += buf.len();

        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    fn byte_seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError> {
        let new_position = match from {
            ByteSeekFrom::Start(position) => i64::try_from(position)?,
            ByteSeekFrom::End(position) => i64::try_from(self.len())? + position,
            ByteSeekFrom::Current(position) => i64::try_from(self.position)? + position
        };
        if new_position < 0 {
            return Err(ByteIoError::SeekError("Cannot seek before the start of the stream"));
        }
        self.position = usize::try_from(new_position)?;

        Ok(self.position as u64)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        let start = core::cmp::min(self.position, self.len());
        let remaining = &self.stream.as_ref()[start..];

        sink.extend_from_slice(remaining);
        self.position = self.len();

        Ok(remaining.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::{ByteCursor, ByteIoError, ByteReaderTrait, ByteSeekFrom};

    #[test]
    fn short_exact_read_reports_counts() {
        let mut cursor = ByteCursor::new([1_u8, 2, 3]);
        let mut buf = [0; 5];

        assert!(matches!(
            cursor.read_exact_bytes(&mut buf),
            Err(ByteIoError::NotEnoughBytes(5, 3))
        ));
        let mut sink: Vec<u8> = vec![];
        assert_eq!(cursor.read_remaining(&mut sink).unwrap(), 3);
        assert_eq!(sink, [1, 2, 3]);
    }

    #[test]
    fn seeking_past_the_end_is_allowed_but_reads_fail() {
        let mut cursor = ByteCursor::new(vec![0_u8; 4]);

        assert_eq!(cursor.byte_seek(ByteSeekFrom::Start(10)).unwrap(), 10);
        assert!(cursor.read_exact_bytes(&mut [0; 1]).is_err());

        let mut sink: Vec<u8> = vec![];
        assert_eq!(cursor.read_remaining(&mut sink).unwrap(), 0);

        assert_eq!(cursor.byte_seek(ByteSeekFrom::End(-1)).unwrap(), 3);
        assert_eq!(cursor.byte_seek(ByteSeekFrom::Current(-3)).unwrap(), 0);
        assert!(cursor.byte_seek(ByteSeekFrom::Current(-1)).is_err());
    }
}
