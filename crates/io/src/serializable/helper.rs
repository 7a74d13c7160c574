//! Helper utilities for sequence encoding and size accounting.

use super::Serializable;
use crate::{BinaryWriter, IoError, IoResult, MemoryReader};

/// Returns the number of bytes required to encode `value` as ULEB128.
#[inline]
pub fn uleb128_size(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0x0FFF_FFFF => 4,
        _ => 5,
    }
}

/// Returns the size contribution of a length-prefixed byte slice.
#[inline]
pub fn var_bytes_size(bytes: &[u8]) -> usize {
    uleb128_size(bytes.len() as u32) + bytes.len()
}

/// Serializes a slice of `Serializable` items with a ULEB128 length prefix.
pub fn serialize_array<T: Serializable>(values: &[T], writer: &mut BinaryWriter) -> IoResult<()> {
    writer.write_length(values.len())?;
    for value in values {
        value.serialize(writer)?;
    }
    Ok(())
}

/// Deserializes a length-prefixed sequence with an upper bound check.
pub fn deserialize_array<T: Serializable>(
    reader: &mut MemoryReader,
    max: usize,
) -> IoResult<Vec<T>> {
    let count = reader.read_length()?;
    if count > max {
        return Err(IoError::SequenceTooLong { length: count, max });
    }

    // Every element occupies at least one byte, so the remaining input bounds
    // the allocation for hostile length prefixes.
    let mut result = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        result.push(T::deserialize(reader)?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uleb128_size() {
        assert_eq!(uleb128_size(0), 1);
        assert_eq!(uleb128_size(127), 1);
        assert_eq!(uleb128_size(128), 2);
        assert_eq!(uleb128_size(16_383), 2);
        assert_eq!(uleb128_size(16_384), 3);
        assert_eq!(uleb128_size(u32::MAX), 5);
    }

    #[test]
    fn test_uleb128_size_matches_writer() {
        for value in [0u32, 1, 127, 128, 300, 16_384, 2_097_151, 2_097_152, u32::MAX] {
            let mut writer = BinaryWriter::new();
            writer.write_uleb128(value);
            assert_eq!(writer.len(), uleb128_size(value), "value {value}");
        }
    }

    #[test]
    fn test_deserialize_array_respects_max() {
        let mut writer = BinaryWriter::new();
        serialize_array(&[1u8, 2, 3], &mut writer).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = MemoryReader::new(&bytes);
        let result: IoResult<Vec<u8>> = deserialize_array(&mut reader, 2);
        assert_eq!(
            result,
            Err(IoError::SequenceTooLong { length: 3, max: 2 })
        );

        let mut reader = MemoryReader::new(&bytes);
        let values: Vec<u8> = deserialize_array(&mut reader, 3).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_hostile_length_prefix() {
        // Claims 2^20 elements but carries only two bytes of payload.
        let bytes = [0x80, 0x80, 0x40, 0x01, 0x02];
        let mut reader = MemoryReader::new(&bytes);
        let result: IoResult<Vec<u16>> = deserialize_array(&mut reader, usize::MAX);
        assert!(matches!(result, Err(IoError::UnexpectedEof { .. })));
    }
}
