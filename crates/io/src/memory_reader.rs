//! Cursor over borrowed canonical bytes.

use crate::{IoError, IoResult, MAX_SEQUENCE_LENGTH};
use byteorder::{ByteOrder, LittleEndian};
use std::mem::size_of;
use tracing::trace;

/// Reads canonical values from a byte slice, failing on premature end of input.
pub struct MemoryReader<'a> {
    memory: &'a [u8],
    pos: usize,
}

impl<'a> MemoryReader<'a> {
    pub fn new(memory: &'a [u8]) -> Self {
        Self { memory, pos: 0 }
    }

    #[inline(always)]
    fn ensure_position(&self, move_by: usize, context: &'static str) -> IoResult<()> {
        let remaining = self.remaining();
        if move_by > remaining {
            Err(IoError::UnexpectedEof {
                context,
                needed: move_by,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.memory.len() - self.pos
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails unless every byte has been consumed.
    pub fn ensure_end(&self) -> IoResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(IoError::TrailingBytes { remaining }),
        }
    }

    #[inline(always)]
    pub fn peek(&self) -> IoResult<u8> {
        self.ensure_position(1, "u8")?;
        Ok(self.memory[self.pos])
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(IoError::invalid_data(format!(
                "invalid boolean value {other}"
            ))),
        }
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> IoResult<u8> {
        self.ensure_position(1, "u8")?;
        let value = self.memory[self.pos];
        self.pos += 1;
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u16(&mut self) -> IoResult<u16> {
        self.ensure_position(size_of::<u16>(), "u16")?;
        let value = LittleEndian::read_u16(&self.memory[self.pos..]);
        self.pos += size_of::<u16>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> IoResult<u32> {
        self.ensure_position(size_of::<u32>(), "u32")?;
        let value = LittleEndian::read_u32(&self.memory[self.pos..]);
        self.pos += size_of::<u32>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u64(&mut self) -> IoResult<u64> {
        self.ensure_position(size_of::<u64>(), "u64")?;
        let value = LittleEndian::read_u64(&self.memory[self.pos..]);
        self.pos += size_of::<u64>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u128(&mut self) -> IoResult<u128> {
        self.ensure_position(size_of::<u128>(), "u128")?;
        let value = LittleEndian::read_u128(&self.memory[self.pos..]);
        self.pos += size_of::<u128>();
        Ok(value)
    }

    /// Reads an unsigned LEB128 value that must fit in 32 bits and be minimally encoded.
    pub fn read_uleb128(&mut self) -> IoResult<u32> {
        let mut value: u64 = 0;
        for shift in (0..32).step_by(7) {
            let byte = self.read_u8()?;
            let digit = u64::from(byte & 0x7F);
            value |= digit << shift;
            if byte & 0x80 == 0 {
                if shift > 0 && digit == 0 {
                    return Err(IoError::NonCanonicalUleb128);
                }
                return u32::try_from(value).map_err(|_| IoError::Uleb128Overflow);
            }
        }
        Err(IoError::Uleb128Overflow)
    }

    /// Reads a sequence length prefix.
    pub fn read_length(&mut self) -> IoResult<usize> {
        let length = self.read_uleb128()? as usize;
        if length > MAX_SEQUENCE_LENGTH {
            return Err(IoError::SequenceTooLong {
                length,
                max: MAX_SEQUENCE_LENGTH,
            });
        }
        trace!(length, position = self.pos, "read sequence length");
        Ok(length)
    }

    /// Reads an enum tag.
    pub fn read_variant_index(&mut self) -> IoResult<u32> {
        self.read_uleb128()
    }

    /// Reads exactly `count` raw bytes.
    #[inline(always)]
    pub fn read_memory(&mut self, count: usize) -> IoResult<&'a [u8]> {
        self.ensure_position(count, "bytes")?;
        let result = &self.memory[self.pos..self.pos + count];
        self.pos += count;
        Ok(result)
    }

    /// Reads a fixed-size byte array with no length prefix.
    pub fn read_fixed<const N: usize>(&mut self) -> IoResult<[u8; N]> {
        self.ensure_position(N, "fixed array")?;
        let mut result = [0u8; N];
        result.copy_from_slice(&self.memory[self.pos..self.pos + N]);
        self.pos += N;
        Ok(result)
    }

    /// Reads a length-prefixed byte vector.
    pub fn read_var_bytes(&mut self) -> IoResult<Vec<u8>> {
        let length = self.read_length()?;
        Ok(self.read_memory(length)?.to_vec())
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_var_string(&mut self) -> IoResult<String> {
        let bytes = self.read_var_bytes()?;
        String::from_utf8(bytes).map_err(|_| IoError::invalid_data("invalid UTF-8 sequence"))
    }

    /// Consumes and returns every unread byte.
    #[inline(always)]
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let result = &self.memory[self.pos..];
        self.pos = self.memory.len();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_width() {
        let data = [0x34, 0x12, 0xef, 0xbe, 0xad, 0xde, 0x01];
        let mut reader = MemoryReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0xdead_beef);
        assert!(reader.read_bool().unwrap());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_truncated_input_reports_eof() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = MemoryReader::new(&data);
        let err = reader.read_u64().unwrap_err();
        assert_eq!(
            err,
            IoError::UnexpectedEof {
                context: "u64",
                needed: 8,
                remaining: 3
            }
        );
        // A failed read does not advance the cursor.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_invalid_bool() {
        let mut reader = MemoryReader::new(&[2]);
        assert!(matches!(reader.read_bool(), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_uleb128_decode() {
        let mut reader = MemoryReader::new(&[0xac, 0x02, 0x7f]);
        assert_eq!(reader.read_uleb128().unwrap(), 300);
        assert_eq!(reader.read_uleb128().unwrap(), 127);
    }

    #[test]
    fn test_uleb128_rejects_overlong() {
        let mut reader = MemoryReader::new(&[0x80, 0x00]);
        assert_eq!(reader.read_uleb128(), Err(IoError::NonCanonicalUleb128));

        let mut reader = MemoryReader::new(&[0x81, 0x80, 0x00]);
        assert_eq!(reader.read_uleb128(), Err(IoError::NonCanonicalUleb128));
    }

    #[test]
    fn test_uleb128_rejects_overflow() {
        let mut reader = MemoryReader::new(&[0xff, 0xff, 0xff, 0xff, 0x10]);
        assert_eq!(reader.read_uleb128(), Err(IoError::Uleb128Overflow));

        let mut reader = MemoryReader::new(&[0xff, 0xff, 0xff, 0xff, 0x80, 0x01]);
        assert_eq!(reader.read_uleb128(), Err(IoError::Uleb128Overflow));
    }

    #[test]
    fn test_length_limit() {
        // 2^31 encodes as 80 80 80 80 08
        let mut reader = MemoryReader::new(&[0x80, 0x80, 0x80, 0x80, 0x08]);
        assert!(matches!(
            reader.read_length(),
            Err(IoError::SequenceTooLong { .. })
        ));
    }

    #[test]
    fn test_var_bytes_short_payload() {
        let mut reader = MemoryReader::new(&[0x04, 0x01, 0x02]);
        assert!(matches!(
            reader.read_var_bytes(),
            Err(IoError::UnexpectedEof { needed: 4, remaining: 2, .. })
        ));
    }

    #[test]
    fn test_ensure_end() {
        let mut reader = MemoryReader::new(&[0x01, 0x02]);
        reader.read_u8().unwrap();
        assert_eq!(
            reader.ensure_end(),
            Err(IoError::TrailingBytes { remaining: 1 })
        );
        reader.read_to_end();
        assert!(reader.ensure_end().is_ok());
    }
}
