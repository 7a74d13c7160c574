//! References to values inside a programmable transaction.

use ptb_io::{BinaryWriter, EnumSchema, IoError, IoResult, MemoryReader, Serializable};
use std::fmt;

/// Identifies a value a command consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Argument {
    /// The gas coin.
    GasCoin,
    /// Index into the input table.
    Input(u16),
    /// Whole result of an earlier command.
    Result(u16),
    /// One element of an earlier command's multi-value result.
    NestedResult(u16, u16),
}

impl Argument {
    /// Selects element `element` of this command result.
    ///
    /// Returns `None` unless `self` is `Result`.
    pub fn nested(&self, element: u16) -> Option<Self> {
        match self {
            Self::Result(command) => Some(Self::NestedResult(*command, element)),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GasCoin => f.write_str("GasCoin"),
            Self::Input(index) => write!(f, "Input({index})"),
            Self::Result(index) => write!(f, "Result({index})"),
            Self::NestedResult(command, element) => write!(f, "NestedResult({command}, {element})"),
        }
    }
}

impl EnumSchema for Argument {
    const TYPE_NAME: &'static str = "Argument";
    const VARIANTS: &'static [&'static str] = &["GasCoin", "Input", "Result", "NestedResult"];

    fn variant_index(&self) -> u32 {
        match self {
            Self::GasCoin => 0,
            Self::Input(_) => 1,
            Self::Result(_) => 2,
            Self::NestedResult(..) => 3,
        }
    }
}

impl Serializable for Argument {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        match self {
            Self::GasCoin => {}
            Self::Input(index) | Self::Result(index) => writer.write_u16(*index),
            Self::NestedResult(command, element) => {
                writer.write_u16(*command);
                writer.write_u16(*element);
            }
        }
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_variant_index()? {
            0 => Ok(Self::GasCoin),
            1 => Ok(Self::Input(reader.read_u16()?)),
            2 => Ok(Self::Result(reader.read_u16()?)),
            3 => Ok(Self::NestedResult(reader.read_u16()?, reader.read_u16()?)),
            index => Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        }
    }
}
