//! Builder error types.

use ptb_io::IoError;
use ptb_types::SchemaError;
use thiserror::Error;

/// Errors raised while assembling, verifying or finalizing a transaction.
///
/// Exceeding a protocol limit is not an error; the verifier reports it as
/// data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// The input table is full.
    #[error("too many inputs: at most {limit} are addressable")]
    TooManyInputs { limit: usize },

    /// The command list is full.
    #[error("too many commands: at most {limit} are addressable")]
    TooManyCommands { limit: usize },

    #[error("codec error: {0}")]
    Codec(#[from] IoError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The Move compiler failed or produced unusable output.
    #[error("move compiler error: {0}")]
    Compiler(String),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The protocol configuration source could not answer.
    #[error("protocol config error: {0}")]
    Provider(String),
}

impl BuilderError {
    pub fn compiler<S: ToString>(message: S) -> Self {
        Self::Compiler(message.to_string())
    }

    pub fn provider<S: ToString>(message: S) -> Self {
        Self::Provider(message.to_string())
    }

    /// Returns a stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooManyInputs { .. } => "BUILDER_TOO_MANY_INPUTS",
            Self::TooManyCommands { .. } => "BUILDER_TOO_MANY_COMMANDS",
            Self::Codec(inner) => inner.code(),
            Self::Schema(inner) => inner.code(),
            Self::Compiler(_) => "BUILDER_COMPILER",
            Self::Base64(_) => "BUILDER_BASE64",
            Self::Provider(_) => "BUILDER_PROVIDER",
        }
    }
}

/// Result type for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;
