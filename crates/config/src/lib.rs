//! PTB Configuration Module
//!
//! Builder settings and the protocol limits transactions are verified
//! against. Settings load from TOML; constraints also load from
//! protocol-config JSON.

pub mod builder_config;
pub mod constraints;
pub mod error;

pub use builder_config::{BuilderConfig, DEFAULT_GAS_BUDGET};
pub use constraints::{ConstraintLimit, TransactionConstraints};
pub use error::{ConfigError, ConfigResult};
