//! Source of protocol limits and gas pricing.

use crate::error::BuilderResult;
use ptb_config::{BuilderConfig, TransactionConstraints};

/// Reference gas price assumed when none is configured.
pub const DEFAULT_REFERENCE_GAS_PRICE: u64 = 1_000;

/// Answers the protocol questions a transaction session needs.
pub trait ProtocolConfigProvider {
    fn transaction_constraints(&self) -> BuilderResult<TransactionConstraints>;

    fn reference_gas_price(&self) -> BuilderResult<u64>;
}

/// Fixed answers, typically from local configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticProtocolConfig {
    pub constraints: TransactionConstraints,
    pub reference_gas_price: u64,
}

impl StaticProtocolConfig {
    pub fn new(constraints: TransactionConstraints, reference_gas_price: u64) -> Self {
        Self {
            constraints,
            reference_gas_price,
        }
    }

    pub fn from_config(config: &BuilderConfig) -> Self {
        Self::new(
            config.constraints,
            config.gas_price.unwrap_or(DEFAULT_REFERENCE_GAS_PRICE),
        )
    }
}

impl ProtocolConfigProvider for StaticProtocolConfig {
    fn transaction_constraints(&self) -> BuilderResult<TransactionConstraints> {
        Ok(self.constraints)
    }

    fn reference_gas_price(&self) -> BuilderResult<u64> {
        Ok(self.reference_gas_price)
    }
}
