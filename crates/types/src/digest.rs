//! Implementation of `Digest` and `ObjectDigest`.

use crate::error::{SchemaError, SchemaResult};
use ptb_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of `Digest` values in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// A 32-byte transaction or object digest.
///
/// Textual form is base58. Encodes as exactly 32 raw bytes.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl Digest {
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Creates a digest from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidLength` if the input is not exactly 32 bytes.
    pub fn from_bytes(value: &[u8]) -> SchemaResult<Self> {
        let bytes: [u8; DIGEST_LENGTH] =
            value.try_into().map_err(|_| SchemaError::InvalidLength {
                type_name: "Digest",
                expected: DIGEST_LENGTH,
                actual: value.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Decodes a base58 digest string.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidBase58` for undecodable text or a decoded
    /// length other than 32 bytes.
    pub fn from_base58(s: &str) -> SchemaResult<Self> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| SchemaError::invalid_base58(s, e))?;
        if decoded.len() != DIGEST_LENGTH {
            return Err(SchemaError::invalid_base58(
                s,
                format!("decoded to {} bytes, expected {DIGEST_LENGTH}", decoded.len()),
            ));
        }
        Self::from_bytes(&decoded)
    }

    #[must_use]
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }
}

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Digest {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_base58())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as Deserialize>::deserialize(deserializer)?;
        Self::from_base58(&text).map_err(serde::de::Error::custom)
    }
}

impl Serializable for Digest {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(&self.0);
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_fixed::<DIGEST_LENGTH>().map(Self)
    }
}

/// The digest carried inside an object reference.
///
/// The network encodes object digests as a byte vector, so the wire form is
/// a ULEB128 length of 32 followed by the digest bytes.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectDigest(pub Digest);

impl ObjectDigest {
    /// Encoded size: one length byte plus the digest.
    pub const ENCODED_LENGTH: usize = DIGEST_LENGTH + 1;

    pub fn from_base58(s: &str) -> SchemaResult<Self> {
        Digest::from_base58(s).map(Self)
    }

    #[inline]
    #[must_use]
    pub const fn digest(&self) -> &Digest {
        &self.0
    }
}

impl From<Digest> for ObjectDigest {
    fn from(digest: Digest) -> Self {
        Self(digest)
    }
}

impl fmt::Display for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectDigest({})", self.0.to_base58())
    }
}

impl Serializable for ObjectDigest {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_var_bytes(self.0.as_bytes())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let length = reader.read_length()?;
        if length != DIGEST_LENGTH {
            return Err(IoError::invalid_data(format!(
                "object digest length {length}, expected {DIGEST_LENGTH}"
            )));
        }
        reader.read_fixed::<DIGEST_LENGTH>().map(|bytes| Self(Digest(bytes)))
    }
}
