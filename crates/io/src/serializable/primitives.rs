//! `Serializable` implementations for scalars and standard containers.

use super::Serializable;
use crate::{BinaryWriter, IoError, IoResult, MemoryReader};

macro_rules! impl_fixed_width {
    ($($ty:ty => $write:ident, $read:ident;)+) => {
        $(
            impl Serializable for $ty {
                fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
                    writer.$write(*self);
                    Ok(())
                }

                fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
                    reader.$read()
                }
            }
        )+
    };
}

impl_fixed_width! {
    bool => write_bool, read_bool;
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    u128 => write_u128, read_u128;
}

impl Serializable for String {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_var_string(self)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_var_string()
    }
}

impl<const N: usize> Serializable for [u8; N] {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self);
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_fixed::<N>()
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        super::helper::serialize_array(self, writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        super::helper::deserialize_array(reader, crate::MAX_SEQUENCE_LENGTH)
    }
}

impl<T: Serializable> Serializable for Option<T> {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        match self {
            None => {
                writer.write_u8(0);
                Ok(())
            }
            Some(value) => {
                writer.write_u8(1);
                value.serialize(writer)
            }
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::deserialize(reader)?)),
            flag => Err(IoError::invalid_data(format!(
                "invalid option presence flag {flag}"
            ))),
        }
    }
}

impl<T: Serializable> Serializable for Box<T> {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.as_ref().serialize(writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        T::deserialize(reader).map(Box::new)
    }
}

impl<A: Serializable, B: Serializable> Serializable for (A, B) {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.0.serialize(writer)?;
        self.1.serialize(writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let first = A::deserialize(reader)?;
        let second = B::deserialize(reader)?;
        Ok((first, second))
    }
}

#[cfg(test)]
mod tests {
    use crate::{IoError, SerializableExt};

    #[test]
    fn test_option_encoding() {
        assert_eq!(None::<u16>.to_bytes().unwrap(), vec![0]);
        assert_eq!(Some(7u16).to_bytes().unwrap(), vec![1, 7, 0]);
        assert!(matches!(
            Option::<u16>::from_bytes(&[2, 7, 0]),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_fixed_array_has_no_prefix() {
        let value = [0xabu8; 4];
        assert_eq!(value.to_bytes().unwrap(), vec![0xab; 4]);
        assert!(<[u8; 4]>::from_bytes(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_nested_vectors() {
        let value: Vec<Vec<u8>> = vec![vec![1], vec![], vec![2, 3]];
        let bytes = value.to_bytes().unwrap();
        assert_eq!(bytes, vec![3, 1, 1, 0, 2, 2, 3]);
        assert_eq!(Vec::<Vec<u8>>::from_bytes(&bytes).unwrap(), value);
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        assert!(matches!(
            String::from_bytes(&[2, 0xc3, 0x28]),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_u128_and_tuple() {
        let value = (1u128, 2u16);
        let bytes = value.to_bytes().unwrap();
        assert_eq!(bytes.len(), 18);
        assert_eq!(bytes[0], 1);
        assert_eq!(<(u128, u16)>::from_bytes(&bytes).unwrap(), value);
    }
}
