//! Move type tags and their textual parser.

use crate::address::Address;
use crate::error::{SchemaError, SchemaResult};
use ptb_io::{BinaryWriter, EnumSchema, IoError, IoResult, MemoryReader, Serializable};
use std::fmt;
use std::str::FromStr;

/// Nesting limit applied while decoding type tags from untrusted bytes.
pub const MAX_TYPE_TAG_DEPTH: usize = 64;

/// A Move type.
///
/// Variant order is the wire tag order and does not follow the natural
/// width order of the integer types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

/// A fully qualified Move struct type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    /// Wraps `inner` in a vector type.
    pub fn vector(inner: TypeTag) -> Self {
        Self::Vector(Box::new(inner))
    }

    /// Parses the textual form of a type tag.
    ///
    /// Accepts the scalar names (case-insensitive), text containing
    /// `vector<...>` with any depth of nesting ahead of any `::`, `address::module::name` struct tags and bare
    /// `0x`-prefixed strings, which denote the `address` type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnrecognizedTypeTag` when no form matches, or the
    /// struct tag error for a malformed struct.
    pub fn from_text(s: &str) -> SchemaResult<Self> {
        let lower = s.to_ascii_lowercase();
        if let Some(scalar) = Self::scalar_from_name(&lower) {
            return Ok(scalar);
        }

        let vector_at = lower.find("vector<");
        if vector_at.is_some_and(|at| !lower[..at].contains("::")) {
            let start = s.rfind('<').map(|i| i + 1);
            let end = s.find('>');
            let inner = match (start, end) {
                (Some(start), Some(end)) if start <= end => &s[start..end],
                _ => return Err(SchemaError::UnrecognizedTypeTag(s.to_string())),
            };
            let mut tag = Self::from_text(inner)?;
            for _ in 0..lower.matches("vector").count() {
                tag = Self::vector(tag);
            }
            return Ok(tag);
        }

        if s.matches("::").count() >= 2 {
            return StructTag::from_text(s).map(|tag| Self::Struct(Box::new(tag)));
        }

        if s.starts_with("0x") || s.starts_with("0X") {
            return Ok(Self::Address);
        }

        Err(SchemaError::UnrecognizedTypeTag(s.to_string()))
    }

    fn scalar_from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => Self::Bool,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "u256" => Self::U256,
            "address" => Self::Address,
            "signer" => Self::Signer,
            _ => return None,
        })
    }

    fn decode_at_depth(reader: &mut MemoryReader, depth: usize) -> IoResult<Self> {
        if depth > MAX_TYPE_TAG_DEPTH {
            return Err(IoError::invalid_data(format!(
                "type tag nesting exceeds {MAX_TYPE_TAG_DEPTH}"
            )));
        }
        Ok(match reader.read_variant_index()? {
            0 => Self::Bool,
            1 => Self::U8,
            2 => Self::U64,
            3 => Self::U128,
            4 => Self::Address,
            5 => Self::Signer,
            6 => Self::Vector(Box::new(Self::decode_at_depth(reader, depth + 1)?)),
            7 => Self::Struct(Box::new(StructTag::decode_at_depth(reader, depth + 1)?)),
            8 => Self::U16,
            9 => Self::U32,
            10 => Self::U256,
            index => return Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        })
    }
}

impl StructTag {
    pub fn new(address: Address, module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address,
            module: module.into(),
            name: name.into(),
            type_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type_params(mut self, type_params: Vec<TypeTag>) -> Self {
        self.type_params = type_params;
        self
    }

    /// Parses `address::module::name`.
    ///
    /// Type parameters are not parsed; the result always has none.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MalformedStructTag` unless the text has exactly
    /// two `::` separators around non-empty parts, and propagates address
    /// parse errors.
    pub fn from_text(s: &str) -> SchemaResult<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        match parts.as_slice() {
            [address, module, name] if !module.is_empty() && !name.is_empty() => {
                Ok(Self::new(Address::parse(address)?, *module, *name))
            }
            _ => Err(SchemaError::MalformedStructTag(s.to_string())),
        }
    }

    fn decode_at_depth(reader: &mut MemoryReader, depth: usize) -> IoResult<Self> {
        let address = Address::deserialize(reader)?;
        let module = reader.read_var_string()?;
        let name = reader.read_var_string()?;
        let count = reader.read_length()?;
        let mut type_params = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            type_params.push(TypeTag::decode_at_depth(reader, depth)?);
        }
        Ok(Self {
            address,
            module,
            name,
            type_params,
        })
    }
}

impl FromStr for TypeTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl FromStr for StructTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::U8 => f.write_str("u8"),
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
            Self::U64 => f.write_str("u64"),
            Self::U128 => f.write_str("u128"),
            Self::U256 => f.write_str("u256"),
            Self::Address => f.write_str("address"),
            Self::Signer => f.write_str("signer"),
            Self::Vector(inner) => write!(f, "vector<{inner}>"),
            Self::Struct(tag) => fmt::Display::fmt(tag, f),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if let Some((first, rest)) = self.type_params.split_first() {
            write!(f, "<{first}")?;
            for param in rest {
                write!(f, ", {param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl EnumSchema for TypeTag {
    const TYPE_NAME: &'static str = "TypeTag";
    const VARIANTS: &'static [&'static str] = &[
        "Bool", "U8", "U64", "U128", "Address", "Signer", "Vector", "Struct", "U16", "U32", "U256",
    ];

    fn variant_index(&self) -> u32 {
        match self {
            Self::Bool => 0,
            Self::U8 => 1,
            Self::U64 => 2,
            Self::U128 => 3,
            Self::Address => 4,
            Self::Signer => 5,
            Self::Vector(_) => 6,
            Self::Struct(_) => 7,
            Self::U16 => 8,
            Self::U32 => 9,
            Self::U256 => 10,
        }
    }
}

impl Serializable for TypeTag {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        match self {
            Self::Vector(inner) => inner.serialize(writer),
            Self::Struct(tag) => tag.serialize(writer),
            _ => Ok(()),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Self::decode_at_depth(reader, 0)
    }
}

impl Serializable for StructTag {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.address.serialize(writer)?;
        writer.write_var_string(&self.module)?;
        writer.write_var_string(&self.name)?;
        self.type_params.serialize(writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Self::decode_at_depth(reader, 0)
    }
}
