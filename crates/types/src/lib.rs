//! # PTB Types
//!
//! The programmable transaction schema with canonical encodings: addresses
//! and digests, object references, inputs, type tags, commands and the
//! transaction envelope.
//!
//! Every type implements [`ptb_io::Serializable`]. Tagged unions also
//! implement [`ptb_io::EnumSchema`], whose variant table is the wire order.

pub mod address;
pub mod argument;
pub mod call_arg;
pub mod command;
pub mod digest;
pub mod error;
pub mod object;
pub mod serde_helpers;
pub mod transaction;
pub mod type_tag;

pub use address::{Address, ObjectId, ADDRESS_LENGTH};
pub use argument::Argument;
pub use call_arg::CallArg;
pub use command::{
    Command, CommandKind, MakeMoveVec, MergeCoins, MoveCallTarget, ProgrammableMoveCall, Publish,
    SplitCoin, TransferObjects, Upgrade,
};
pub use digest::{Digest, ObjectDigest, DIGEST_LENGTH};
pub use error::{SchemaError, SchemaResult};
pub use object::{
    ObjectArg, ObjectOwner, ObjectRead, ObjectReference, SequenceNumber, SharedObjectReference,
};
pub use transaction::{
    GasData, ProgrammableTransaction, TransactionData, TransactionDataV1, TransactionExpiration,
    TransactionKind,
};
pub use type_tag::{StructTag, TypeTag, MAX_TYPE_TAG_DEPTH};
