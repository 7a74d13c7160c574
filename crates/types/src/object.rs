//! Object references and the object-read data they are built from.

use crate::address::{Address, ObjectId};
use crate::digest::{Digest, ObjectDigest};
use crate::error::{SchemaError, SchemaResult};
use crate::serde_helpers::u64_from_number_or_string;
use ptb_io::{impl_serializable_struct, BinaryWriter, EnumSchema, IoError, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

/// Object version number.
pub type SequenceNumber = u64;

/// Reference to an owned or immutable object at a specific version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectReference {
    pub object_id: ObjectId,
    pub version: SequenceNumber,
    pub digest: ObjectDigest,
}

impl_serializable_struct!(ObjectReference {
    object_id,
    version,
    digest
});

impl ObjectReference {
    pub fn new(object_id: ObjectId, version: SequenceNumber, digest: Digest) -> Self {
        Self {
            object_id,
            version,
            digest: ObjectDigest(digest),
        }
    }

    /// Builds a reference from object-read data.
    ///
    /// # Errors
    ///
    /// Fails if the object id is not valid hex or the digest is not valid base58.
    pub fn from_object_read(read: &ObjectRead) -> SchemaResult<Self> {
        Ok(Self::new(
            Address::parse(&read.object_id)?,
            read.version,
            Digest::from_base58(&read.digest)?,
        ))
    }
}

/// Reference to a shared object, keyed by the version at which it became shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedObjectReference {
    pub object_id: ObjectId,
    pub initial_shared_version: SequenceNumber,
    pub mutable: bool,
}

impl_serializable_struct!(SharedObjectReference {
    object_id,
    initial_shared_version,
    mutable
});

impl SharedObjectReference {
    pub fn new(object_id: ObjectId, initial_shared_version: SequenceNumber, mutable: bool) -> Self {
        Self {
            object_id,
            initial_shared_version,
            mutable,
        }
    }

    /// Builds a shared reference from object-read data.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotSharedObject` if the owner is not `Shared`.
    pub fn from_object_read(read: &ObjectRead, mutable: bool) -> SchemaResult<Self> {
        match read.owner {
            ObjectOwner::Shared {
                initial_shared_version,
            } => Ok(Self::new(
                Address::parse(&read.object_id)?,
                initial_shared_version,
                mutable,
            )),
            _ => Err(SchemaError::NotSharedObject(read.object_id.clone())),
        }
    }
}

/// How an object is passed into a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectReference),
    SharedObject(SharedObjectReference),
}

impl ObjectArg {
    /// Chooses the shared or owned form from the object's owner.
    pub fn from_object_read(read: &ObjectRead, mutable: bool) -> SchemaResult<Self> {
        tracing::trace!(object_id = %read.object_id, owner = ?read.owner, "resolving object argument");
        match read.owner {
            ObjectOwner::Shared { .. } => {
                SharedObjectReference::from_object_read(read, mutable).map(Self::SharedObject)
            }
            _ => ObjectReference::from_object_read(read).map(Self::ImmOrOwnedObject),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        match self {
            Self::ImmOrOwnedObject(reference) => reference.object_id,
            Self::SharedObject(reference) => reference.object_id,
        }
    }
}

impl From<ObjectReference> for ObjectArg {
    fn from(reference: ObjectReference) -> Self {
        Self::ImmOrOwnedObject(reference)
    }
}

impl From<SharedObjectReference> for ObjectArg {
    fn from(reference: SharedObjectReference) -> Self {
        Self::SharedObject(reference)
    }
}

impl EnumSchema for ObjectArg {
    const TYPE_NAME: &'static str = "ObjectArg";
    const VARIANTS: &'static [&'static str] = &["ImmOrOwnedObject", "SharedObject"];

    fn variant_index(&self) -> u32 {
        match self {
            Self::ImmOrOwnedObject(_) => 0,
            Self::SharedObject(_) => 1,
        }
    }
}

impl Serializable for ObjectArg {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        match self {
            Self::ImmOrOwnedObject(reference) => Serializable::serialize(reference, writer),
            Self::SharedObject(reference) => Serializable::serialize(reference, writer),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_variant_index()? {
            0 => Ok(Self::ImmOrOwnedObject(<ObjectReference as Serializable>::deserialize(reader)?)),
            1 => Ok(Self::SharedObject(<SharedObjectReference as Serializable>::deserialize(reader)?)),
            index => Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        }
    }
}

/// Ownership of an object as reported by the query layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectOwner {
    AddressOwner(String),
    ObjectOwner(String),
    Shared {
        #[serde(deserialize_with = "u64_from_number_or_string")]
        initial_shared_version: SequenceNumber,
    },
    Immutable,
}

/// Object data returned by an object read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRead {
    pub object_id: String,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub version: SequenceNumber,
    pub digest: String,
    pub owner: ObjectOwner,
}
