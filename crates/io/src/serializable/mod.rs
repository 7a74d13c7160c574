//! Serialization traits for canonical objects.

use crate::{BinaryWriter, IoError, IoResult, MemoryReader};

pub mod helper;
mod primitives;

/// Represents objects with a canonical binary form.
///
/// Encoding is infallible for well-formed values except where a length or
/// numeric range limit is crossed; decoding is the exact inverse and never
/// yields a partially populated value.
pub trait Serializable: Sized {
    /// Appends the canonical encoding of `self` to the writer.
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()>;

    /// Reads one value from the reader.
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self>;
}

/// Declaration-ordered variant table of a tagged union.
///
/// The position of a name in [`EnumSchema::VARIANTS`] is its wire tag.
/// Reordering the table changes the wire format.
pub trait EnumSchema {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Variant names in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Wire tag of this value's variant.
    fn variant_index(&self) -> u32;

    /// Declared name of this value's variant.
    fn variant_name(&self) -> &'static str {
        Self::VARIANTS
            .get(self.variant_index() as usize)
            .copied()
            .unwrap_or("<unknown>")
    }

    /// Looks up a variant name by wire tag.
    fn variant_for_index(index: u32) -> IoResult<&'static str> {
        Self::VARIANTS
            .get(index as usize)
            .copied()
            .ok_or(IoError::VariantOutOfRange {
                type_name: Self::TYPE_NAME,
                index,
                count: Self::VARIANTS.len(),
            })
    }

    /// Looks up a wire tag by variant name.
    fn index_of_variant(name: &str) -> Option<u32> {
        Self::VARIANTS
            .iter()
            .position(|variant| *variant == name)
            .map(|index| index as u32)
    }
}

/// Convenience conversions between values and byte vectors.
pub trait SerializableExt: Serializable {
    /// Encodes the value into a new byte vector.
    fn to_bytes(&self) -> IoResult<Vec<u8>> {
        let mut writer = BinaryWriter::new();
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decodes a value that must span the whole input.
    fn from_bytes(data: &[u8]) -> IoResult<Self> {
        let mut reader = MemoryReader::new(data);
        let value = Self::deserialize(&mut reader)?;
        reader.ensure_end()?;
        Ok(value)
    }

    /// Length of the canonical encoding in bytes.
    fn serialized_size(&self) -> IoResult<usize> {
        self.to_bytes().map(|bytes| bytes.len())
    }
}

impl<T: Serializable> SerializableExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct TestStruct {
        value: u32,
        tags: Vec<u8>,
    }

    crate::impl_serializable_struct!(TestStruct { value, tags });

    #[test]
    fn test_serializable_roundtrip() {
        let original = TestStruct {
            value: 0x1234_5678,
            tags: vec![1, 2, 3],
        };
        let bytes = original.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x78, 0x56, 0x34, 0x12, 3, 1, 2, 3]);
        assert_eq!(TestStruct::from_bytes(&bytes).unwrap(), original);
        assert_eq!(original.serialized_size().unwrap(), 8);
    }

    #[test]
    fn test_from_bytes_rejects_trailing() {
        let mut bytes = TestStruct {
            value: 1,
            tags: vec![],
        }
        .to_bytes()
        .unwrap();
        bytes.push(0);
        assert_eq!(
            TestStruct::from_bytes(&bytes),
            Err(IoError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn test_from_bytes_rejects_truncated() {
        let bytes = TestStruct {
            value: 9,
            tags: vec![10, 20, 30],
        }
        .to_bytes()
        .unwrap();
        let result = TestStruct::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(IoError::UnexpectedEof { .. })));
    }
}
