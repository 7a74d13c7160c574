//! Value errors raised while constructing schema types from caller input.

use ptb_io::IoError;
use thiserror::Error;

/// Errors for malformed textual or raw input to schema constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A hex string could not be decoded.
    #[error("invalid hex string {value:?}: {reason}")]
    InvalidHex {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A base58 string could not be decoded.
    #[error("invalid base58 string {value:?}: {reason}")]
    InvalidBase58 {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Raw bytes had the wrong length for a fixed-size type.
    #[error("invalid length for {type_name}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Target type name.
        type_name: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A struct tag did not have the `address::module::name` shape.
    #[error("ill formed struct tag {0:?}")]
    MalformedStructTag(String),

    /// No type tag form matched the input.
    #[error("{0:?} not a recognized type tag")]
    UnrecognizedTypeTag(String),

    /// A Move call target did not have the `package::module::function` shape.
    #[error("ill formed move call target {0:?}")]
    InvalidMoveTarget(String),

    /// A shared object reference was requested for an object that is not shared.
    #[error("object {0} is not a shared object")]
    NotSharedObject(String),

    /// Canonical encoding or decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] IoError),
}

impl SchemaError {
    /// Create an invalid hex error.
    pub fn invalid_hex<S: Into<String>, R: ToString>(value: S, reason: R) -> Self {
        Self::InvalidHex {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid base58 error.
    pub fn invalid_base58<S: Into<String>, R: ToString>(value: S, reason: R) -> Self {
        Self::InvalidBase58 {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns a stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidHex { .. } => "SCHEMA_INVALID_HEX",
            Self::InvalidBase58 { .. } => "SCHEMA_INVALID_BASE58",
            Self::InvalidLength { .. } => "SCHEMA_INVALID_LENGTH",
            Self::MalformedStructTag(_) => "SCHEMA_MALFORMED_STRUCT_TAG",
            Self::UnrecognizedTypeTag(_) => "SCHEMA_UNRECOGNIZED_TYPE_TAG",
            Self::InvalidMoveTarget(_) => "SCHEMA_INVALID_MOVE_TARGET",
            Self::NotSharedObject(_) => "SCHEMA_NOT_SHARED_OBJECT",
            Self::Codec(inner) => inner.code(),
        }
    }
}

/// Result type for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;
