//! # PTB IO
//!
//! Canonical binary serialization (BCS) primitives:
//!
//! - [`BinaryWriter`] / [`MemoryReader`]: little-endian fixed-width scalars,
//!   ULEB128 lengths and enum tags, raw and length-prefixed byte runs.
//! - [`Serializable`]: the encode/decode contract every schema type implements.
//! - [`EnumSchema`]: declaration-ordered variant tables for tagged unions.
//! - [`U256`]: 256-bit unsigned integers with range-checked construction.
//!
//! Decoding is strict: premature end of input, non-canonical ULEB128, unknown
//! variant tags and trailing bytes are all errors.

#[macro_use]
mod macros;

mod binary_writer;
mod error;
mod memory_reader;
pub mod serializable;
mod uint256;

pub use binary_writer::BinaryWriter;
pub use error::{IoError, IoResult};
pub use memory_reader::MemoryReader;
pub use serializable::{helper, EnumSchema, Serializable, SerializableExt};
pub use uint256::{U256, U256_SIZE};

/// Largest sequence length accepted by the canonical format (`2^31 - 1`).
pub const MAX_SEQUENCE_LENGTH: usize = (1 << 31) - 1;
