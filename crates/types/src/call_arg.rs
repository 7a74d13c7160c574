//! Transaction inputs.

use crate::object::ObjectArg;
use ptb_io::{BinaryWriter, EnumSchema, IoError, IoResult, MemoryReader, Serializable};

/// One entry of a transaction's input table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CallArg {
    /// Already-encoded bytes of a pure value.
    Pure(Vec<u8>),
    Object(ObjectArg),
}

impl CallArg {
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Encoded length of a pure payload, `None` for objects.
    pub fn pure_len(&self) -> Option<usize> {
        match self {
            Self::Pure(bytes) => Some(bytes.len()),
            Self::Object(_) => None,
        }
    }
}

impl From<ObjectArg> for CallArg {
    fn from(arg: ObjectArg) -> Self {
        Self::Object(arg)
    }
}

impl EnumSchema for CallArg {
    const TYPE_NAME: &'static str = "CallArg";
    const VARIANTS: &'static [&'static str] = &["Pure", "Object"];

    fn variant_index(&self) -> u32 {
        match self {
            Self::Pure(_) => 0,
            Self::Object(_) => 1,
        }
    }
}

impl Serializable for CallArg {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        match self {
            Self::Pure(bytes) => writer.write_var_bytes(bytes),
            Self::Object(arg) => arg.serialize(writer),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_variant_index()? {
            0 => Ok(Self::Pure(reader.read_var_bytes()?)),
            1 => Ok(Self::Object(ObjectArg::deserialize(reader)?)),
            index => Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        }
    }
}
