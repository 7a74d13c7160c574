//! Growable little-endian writer for canonical bytes.

use crate::{IoError, IoResult, MAX_SEQUENCE_LENGTH};

/// A binary writer that appends canonical encodings to an owned buffer.
///
/// # Examples
///
/// ```rust
/// use ptb_io::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_u16(0x0102);
/// writer.write_var_bytes(b"ab").unwrap();
///
/// assert_eq!(writer.to_bytes(), vec![0x02, 0x01, 0x02, b'a', b'b']);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Borrows the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Copies the written bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    /// Consumes the writer and returns the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(u8::from(value));
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u128(&mut self, value: u128) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw bytes with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes an unsigned LEB128 value, seven bits per byte, low group first.
    pub fn write_uleb128(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.buffer.push((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
        self.buffer.push(value as u8);
    }

    /// Writes a sequence length prefix.
    pub fn write_length(&mut self, length: usize) -> IoResult<()> {
        if length > MAX_SEQUENCE_LENGTH {
            return Err(IoError::SequenceTooLong {
                length,
                max: MAX_SEQUENCE_LENGTH,
            });
        }
        self.write_uleb128(length as u32);
        Ok(())
    }

    /// Writes an enum tag.
    pub fn write_variant_index(&mut self, index: u32) {
        self.write_uleb128(index);
    }

    /// Writes a length-prefixed byte vector.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> IoResult<()> {
        self.write_length(bytes.len())?;
        self.write_bytes(bytes);
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_var_string(&mut self, value: &str) -> IoResult<()> {
        self.write_var_bytes(value.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_little_endian() {
        let mut writer = BinaryWriter::new();
        writer.write_bool(true);
        writer.write_u8(42);
        writer.write_u16(0x1234);
        writer.write_u32(0xdead_beef);
        writer.write_u64(1);

        let mut expected = vec![1, 42, 0x34, 0x12, 0xef, 0xbe, 0xad, 0xde];
        expected.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(writer.into_bytes(), expected);
    }

    #[test]
    fn test_uleb128_boundaries() {
        let cases: [(u32, &[u8]); 6] = [
            (0, &[0x00]),
            (127, &[0x7f]),
            (128, &[0x80, 0x01]),
            (300, &[0xac, 0x02]),
            (16_384, &[0x80, 0x80, 0x01]),
            (u32::MAX, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
        ];
        for (value, bytes) in cases {
            let mut writer = BinaryWriter::new();
            writer.write_uleb128(value);
            assert_eq!(writer.as_bytes(), bytes, "value {value}");
        }
    }

    #[test]
    fn test_var_string_prefix() {
        let mut writer = BinaryWriter::new();
        writer.write_var_string("coin").unwrap();
        assert_eq!(writer.as_bytes(), &[4, b'c', b'o', b'i', b'n']);
    }
}
