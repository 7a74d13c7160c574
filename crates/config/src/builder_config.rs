//! Transaction builder settings.

use crate::constraints::TransactionConstraints;
use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Gas budget used when none is configured.
pub const DEFAULT_GAS_BUDGET: u64 = 4_000_000;

/// Settings for assembling and verifying transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Deduplicate pure inputs with identical encodings.
    pub compress_inputs: bool,
    /// Carried to the session for the signing layer, which decides whether
    /// to merge gas coins to cover the budget. Assembly and verification
    /// do not read it.
    pub merge_gas_budget: bool,
    pub gas_budget: u64,
    /// Overrides the reference gas price reported by the network.
    pub gas_price: Option<u64>,
    /// Limits used when the protocol does not supply them.
    pub constraints: TransactionConstraints,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            compress_inputs: true,
            merge_gas_budget: false,
            gas_budget: DEFAULT_GAS_BUDGET,
            gas_price: None,
            constraints: TransactionConstraints::default(),
        }
    }
}

impl BuilderConfig {
    /// Parses TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded builder configuration");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert!(config.compress_inputs);
        assert!(!config.merge_gas_budget);
        assert_eq!(config.gas_budget, 4_000_000);
        assert_eq!(config.gas_price, None);
        assert_eq!(config.constraints, TransactionConstraints::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = BuilderConfig::from_toml_str(
            r#"
compress_inputs = false
gas_price = 750

[constraints]
max_programmable_tx_commands = 1024
"#,
        )
        .unwrap();
        assert!(!config.compress_inputs);
        assert_eq!(config.gas_price, Some(750));
        assert_eq!(config.gas_budget, DEFAULT_GAS_BUDGET);
        assert_eq!(config.constraints.max_programmable_tx_commands, 1024);
    }

    #[test]
    fn test_invalid_toml() {
        let err = BuilderConfig::from_toml_str("gas_budget = \"many\"").unwrap_err();
        assert_eq!(err.code(), "CONFIG_TOML");
    }
}
