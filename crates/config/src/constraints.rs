//! Protocol limits on the shape of a transaction.

use crate::error::ConfigResult;
use ptb_types::serde_helpers::u64_from_number_or_string;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names of the limits in [`TransactionConstraints`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintLimit {
    MaxPureArgumentSize,
    MaxInputObjects,
    MaxArguments,
    MaxTypeArguments,
    MaxNumTransferredMoveObjectIds,
    MaxProgrammableTxCommands,
    MaxTxSizeBytes,
}

impl ConstraintLimit {
    pub const ALL: [ConstraintLimit; 7] = [
        Self::MaxPureArgumentSize,
        Self::MaxInputObjects,
        Self::MaxArguments,
        Self::MaxTypeArguments,
        Self::MaxNumTransferredMoveObjectIds,
        Self::MaxProgrammableTxCommands,
        Self::MaxTxSizeBytes,
    ];

    /// The protocol-config attribute name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxPureArgumentSize => "max_pure_argument_size",
            Self::MaxInputObjects => "max_input_objects",
            Self::MaxArguments => "max_arguments",
            Self::MaxTypeArguments => "max_type_arguments",
            Self::MaxNumTransferredMoveObjectIds => "max_num_transferred_move_object_ids",
            Self::MaxProgrammableTxCommands => "max_programmable_tx_commands",
            Self::MaxTxSizeBytes => "max_tx_size_bytes",
        }
    }
}

impl fmt::Display for ConstraintLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|limit| limit.as_str() == s)
            .ok_or_else(|| format!("Unknown constraint limit: {}", s))
    }
}

/// Network-wide limits a transaction must respect.
///
/// Every field defaults to zero. Deserialization accepts snake_case or
/// camelCase keys, numbers or decimal strings, and ignores unknown keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionConstraints {
    #[serde(alias = "maxPureArgumentSize", deserialize_with = "u64_from_number_or_string")]
    pub max_pure_argument_size: u64,
    #[serde(alias = "maxInputObjects", deserialize_with = "u64_from_number_or_string")]
    pub max_input_objects: u64,
    #[serde(alias = "maxArguments", deserialize_with = "u64_from_number_or_string")]
    pub max_arguments: u64,
    #[serde(alias = "maxTypeArguments", deserialize_with = "u64_from_number_or_string")]
    pub max_type_arguments: u64,
    #[serde(
        alias = "maxNumTransferredMoveObjectIds",
        deserialize_with = "u64_from_number_or_string"
    )]
    pub max_num_transferred_move_object_ids: u64,
    #[serde(
        alias = "maxProgrammableTxCommands",
        deserialize_with = "u64_from_number_or_string"
    )]
    pub max_programmable_tx_commands: u64,
    #[serde(alias = "maxTxSizeBytes", deserialize_with = "u64_from_number_or_string")]
    pub max_tx_size_bytes: u64,
}

impl TransactionConstraints {
    /// Parses protocol-config JSON.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let constraints = serde_json::from_str(json)?;
        tracing::debug!(?constraints, "loaded transaction constraints");
        Ok(constraints)
    }

    pub fn get(&self, limit: ConstraintLimit) -> u64 {
        match limit {
            ConstraintLimit::MaxPureArgumentSize => self.max_pure_argument_size,
            ConstraintLimit::MaxInputObjects => self.max_input_objects,
            ConstraintLimit::MaxArguments => self.max_arguments,
            ConstraintLimit::MaxTypeArguments => self.max_type_arguments,
            ConstraintLimit::MaxNumTransferredMoveObjectIds => {
                self.max_num_transferred_move_object_ids
            }
            ConstraintLimit::MaxProgrammableTxCommands => self.max_programmable_tx_commands,
            ConstraintLimit::MaxTxSizeBytes => self.max_tx_size_bytes,
        }
    }

    pub fn set(&mut self, limit: ConstraintLimit, value: u64) {
        let field = match limit {
            ConstraintLimit::MaxPureArgumentSize => &mut self.max_pure_argument_size,
            ConstraintLimit::MaxInputObjects => &mut self.max_input_objects,
            ConstraintLimit::MaxArguments => &mut self.max_arguments,
            ConstraintLimit::MaxTypeArguments => &mut self.max_type_arguments,
            ConstraintLimit::MaxNumTransferredMoveObjectIds => {
                &mut self.max_num_transferred_move_object_ids
            }
            ConstraintLimit::MaxProgrammableTxCommands => &mut self.max_programmable_tx_commands,
            ConstraintLimit::MaxTxSizeBytes => &mut self.max_tx_size_bytes,
        };
        *field = value;
    }

    /// All limits with their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstraintLimit, u64)> + '_ {
        ConstraintLimit::ALL
            .into_iter()
            .map(move |limit| (limit, self.get(limit)))
    }
}
