//! Error types for canonical encoding and decoding.

use thiserror::Error;

/// Errors raised while encoding or decoding canonical bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoError {
    /// The input ended before a complete value could be read.
    #[error("unexpected end of input while reading {context}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// What was being read.
        context: &'static str,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the input.
        remaining: usize,
    },

    /// A decoded enum tag does not name any declared variant.
    #[error("invalid variant index {index} for {type_name}")]
    InvalidVariant {
        /// Name of the enum being decoded.
        type_name: &'static str,
        /// The offending tag.
        index: u32,
    },

    /// A variant lookup by index was outside the declared variant list.
    #[error("{type_name} has only {count} variants, index {index} requested")]
    VariantOutOfRange {
        /// Name of the enum.
        type_name: &'static str,
        /// The requested index.
        index: u32,
        /// Number of declared variants.
        count: usize,
    },

    /// A ULEB128 value was encoded with redundant continuation bytes.
    #[error("non-canonical ULEB128 encoding")]
    NonCanonicalUleb128,

    /// A ULEB128 value does not fit in 32 bits.
    #[error("ULEB128 value overflows u32")]
    Uleb128Overflow,

    /// A sequence length exceeds the canonical maximum.
    #[error("sequence length {length} exceeds maximum {max}")]
    SequenceTooLong {
        /// Declared or actual length.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// Bytes remained after a complete value was decoded.
    #[error("{remaining} trailing bytes after decoding")]
    TrailingBytes {
        /// Number of unread bytes.
        remaining: usize,
    },

    /// A numeric value cannot be represented by the target type.
    #[error("value out of range for {type_name}: {value}")]
    OutOfRange {
        /// Target type name.
        type_name: &'static str,
        /// Textual form of the rejected value.
        value: String,
    },

    /// Structurally invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl IoError {
    /// Creates an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    /// Creates an invalid variant error for the named enum.
    pub fn invalid_variant(type_name: &'static str, index: u32) -> Self {
        Self::InvalidVariant { type_name, index }
    }

    /// Creates an out of range error for the named type.
    pub fn out_of_range(type_name: &'static str, value: impl ToString) -> Self {
        Self::OutOfRange {
            type_name,
            value: value.to_string(),
        }
    }

    /// Returns a stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedEof { .. } => "IO_UNEXPECTED_EOF",
            Self::InvalidVariant { .. } => "IO_INVALID_VARIANT",
            Self::VariantOutOfRange { .. } => "IO_VARIANT_OUT_OF_RANGE",
            Self::NonCanonicalUleb128 => "IO_NON_CANONICAL_ULEB128",
            Self::Uleb128Overflow => "IO_ULEB128_OVERFLOW",
            Self::SequenceTooLong { .. } => "IO_SEQUENCE_TOO_LONG",
            Self::TrailingBytes { .. } => "IO_TRAILING_BYTES",
            Self::OutOfRange { .. } => "IO_OUT_OF_RANGE",
            Self::InvalidData(_) => "IO_INVALID_DATA",
        }
    }
}

/// Result type for codec operations.
pub type IoResult<T> = Result<T, IoError>;
