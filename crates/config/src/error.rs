//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to render TOML configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns a stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO",
            Self::Toml(_) => "CONFIG_TOML",
            Self::TomlSerialize(_) => "CONFIG_TOML_SERIALIZE",
            Self::Json(_) => "CONFIG_JSON",
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
